//! Config schema and deserialization

use serde::Deserialize;
use std::collections::HashMap;

/// Composite weights for the four categories. All four must be given
/// together so the sum can be validated.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeightsConfig {
    pub seo: f64,
    pub ai_readability: f64,
    pub crawlability: f64,
    pub text_readability: f64,
}

/// Root config structure for .sitegaugerc.json
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Minimum composite score (exit 1 if below). Default: none
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Composite weights per category (default: 0.25 each)
    #[serde(default)]
    pub category_weights: Option<CategoryWeightsConfig>,

    /// Per-metric weight overrides, keyed by metric id in kebab-case.
    /// Weights within each category must still sum to 1.
    #[serde(default)]
    pub metric_weights: HashMap<String, f64>,

    /// HTTP timeout in seconds (default: 30)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent by the fetcher
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<f64>, cli_timeout: Option<u64>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_timeout.is_some() {
            self.timeout_secs = cli_timeout;
        }
        self
    }
}
