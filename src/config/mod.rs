//! Configuration loading and validated scoring weights.

mod schema;

pub use schema::{CategoryWeightsConfig, Config};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{metric_id_from_str, Category, CurveId, MetricId};

pub const CONFIG_FILENAME: &str = ".sitegaugerc.json";

/// Weight sums may drift from 1.0 by at most this much.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Invalid scoring configuration. Raised at engine construction, before any
/// analysis runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("category weights sum to {sum}, expected 1.0")]
    CategoryWeightSum { sum: f64 },
    #[error("metric weights for {category} sum to {sum}, expected 1.0")]
    MetricWeightSum { category: Category, sum: f64 },
    #[error("unknown metric id in metricWeights: {0}")]
    UnknownMetric(String),
    #[error("curve {curve} is not applicable to metric {metric}")]
    CurveMismatch { metric: MetricId, curve: CurveId },
}

/// Find and load config. Searches `work_dir` then its parents; a missing
/// file yields the defaults.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path)
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in config: {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Search for .sitegaugerc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default metric weights within each category. Sums to 1.0 per category.
pub fn default_metric_weight(id: MetricId) -> f64 {
    match id {
        MetricId::TitleLength => 0.20,
        MetricId::MetaDescriptionLength => 0.20,
        MetricId::H1Count => 0.15,
        MetricId::InternalLinkCount => 0.10,
        MetricId::ExternalLinkCount => 0.05,
        MetricId::InternalLinkRatio => 0.05,
        MetricId::ImagesMissingAlt => 0.15,
        MetricId::InlineAssets => 0.10,
        MetricId::SemanticRatio => 0.40,
        MetricId::ValidityIssues => 0.30,
        MetricId::HeadingOrderViolations => 0.30,
        MetricId::Indexability => 0.30,
        MetricId::SitemapPresent => 0.20,
        MetricId::TextHtmlRatio => 0.20,
        MetricId::LoadTime => 0.15,
        MetricId::LlmBotDirectives => 0.15,
        MetricId::FleschReadingEase => 0.40,
        MetricId::AvgSentenceLength => 0.30,
        MetricId::LexicalComplexity => 0.30,
    }
}

/// Validated weights driving normalization-free aggregation. Construction
/// is the only place weights are checked; afterwards lookups are infallible.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    category_weights: HashMap<Category, f64>,
    metric_weights: HashMap<MetricId, f64>,
}

impl ScoringConfig {
    /// Equal category weighting, default metric weights.
    pub fn default_weights() -> Self {
        let mut category_weights = HashMap::new();
        for category in Category::ALL {
            category_weights.insert(category, 0.25);
        }
        let mut metric_weights = HashMap::new();
        for id in MetricId::ALL {
            metric_weights.insert(id, default_metric_weight(id));
        }
        Self {
            category_weights,
            metric_weights,
        }
    }

    /// Build from a loaded config file, validating every weight sum.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let mut scoring = Self::default_weights();

        if let Some(w) = config.category_weights {
            scoring.category_weights.insert(Category::Seo, w.seo);
            scoring
                .category_weights
                .insert(Category::AiReadability, w.ai_readability);
            scoring
                .category_weights
                .insert(Category::Crawlability, w.crawlability);
            scoring
                .category_weights
                .insert(Category::TextReadability, w.text_readability);
        }

        for (name, weight) in &config.metric_weights {
            let id = metric_id_from_str(name)
                .ok_or_else(|| ConfigurationError::UnknownMetric(name.clone()))?;
            scoring.metric_weights.insert(id, *weight);
        }

        scoring.validate()?;
        Ok(scoring)
    }

    /// Check every weight group sums to 1.0 within tolerance.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let sum: f64 = self.category_weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigurationError::CategoryWeightSum { sum });
        }

        for category in Category::ALL {
            let sum: f64 = MetricId::ALL
                .iter()
                .filter(|id| id.category() == category)
                .map(|id| self.metric_weights[id])
                .sum();
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(ConfigurationError::MetricWeightSum { category, sum });
            }
        }
        Ok(())
    }

    pub fn category_weight(&self, category: Category) -> f64 {
        self.category_weights[&category]
    }

    pub fn metric_weight(&self, id: MetricId) -> f64 {
        self.metric_weights[&id]
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_weights_validate() {
        ScoringConfig::default_weights().validate().unwrap();
    }

    #[test]
    fn test_category_weights_must_sum_to_one() {
        let config = Config {
            category_weights: Some(CategoryWeightsConfig {
                seo: 0.5,
                ai_readability: 0.5,
                crawlability: 0.5,
                text_readability: 0.5,
            }),
            ..Config::default()
        };
        let err = ScoringConfig::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigurationError::CategoryWeightSum { .. }));
    }

    #[test]
    fn test_metric_weight_override_must_keep_category_sum() {
        let mut config = Config::default();
        config
            .metric_weights
            .insert("semantic-ratio".to_string(), 0.9);
        let err = ScoringConfig::from_config(&config).unwrap_err();
        match err {
            ConfigurationError::MetricWeightSum { category, .. } => {
                assert_eq!(category, Category::AiReadability);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_consistent_metric_override_accepted() {
        let mut config = Config::default();
        config
            .metric_weights
            .insert("semantic-ratio".to_string(), 0.5);
        config
            .metric_weights
            .insert("validity-issues".to_string(), 0.25);
        config
            .metric_weights
            .insert("heading-order-violations".to_string(), 0.25);
        let scoring = ScoringConfig::from_config(&config).unwrap();
        assert_eq!(scoring.metric_weight(MetricId::SemanticRatio), 0.5);
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let mut config = Config::default();
        config.metric_weights.insert("no-such-metric".to_string(), 1.0);
        let err = ScoringConfig::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownMetric(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"{{ "threshold": 70.0, "timeoutSecs": 10, "userAgent": "gauge-test" }}"#
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.threshold, Some(70.0));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.user_agent.as_deref(), Some("gauge-test"));
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.json")));
        assert!(err.is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            threshold: Some(50.0),
            ..Config::default()
        };
        let merged = config.merge_with_cli(Some(80.0), Some(5));
        assert_eq!(merged.threshold, Some(80.0));
        assert_eq!(merged.timeout_secs, Some(5));
    }
}
