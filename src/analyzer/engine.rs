//! Analysis engine - orchestrates the four analyzers

use std::collections::HashMap;

use super::{
    AiReadabilityAnalyzer, AnalyzerOutput, CrawlabilityAnalyzer, PageAnalyzer, SeoAnalyzer,
    TextReadabilityAnalyzer,
};
use crate::config::{ConfigurationError, ScoringConfig};
use crate::score::{self, normalize};
use crate::snapshot::PageSnapshot;
use crate::{
    AnalysisError, AnalysisReport, Category, Finding, NormalizedScore, RawMetric, Severity,
};

/// Runs the four analyzers in parallel over one snapshot, merges their
/// outputs and hands them to normalization and aggregation.
pub struct AnalysisEngine {
    scoring: ScoringConfig,
}

impl AnalysisEngine {
    /// Validate the configuration and the normalization table up front;
    /// a bad weight vector never reaches analysis.
    pub fn new(scoring: ScoringConfig) -> Result<Self, ConfigurationError> {
        scoring.validate()?;
        normalize::check_table()?;
        Ok(Self { scoring })
    }

    pub fn with_defaults() -> Result<Self, ConfigurationError> {
        Self::new(ScoringConfig::default_weights())
    }

    /// Analyze one snapshot. Deterministic: the same snapshot always yields
    /// the same report.
    pub fn analyze(&self, snapshot: &PageSnapshot) -> AnalysisReport {
        let seo = SeoAnalyzer::new();
        let ai = AiReadabilityAnalyzer::new();
        let crawl = CrawlabilityAnalyzer::new();
        let text = TextReadabilityAnalyzer::new();

        // The analyzers are independent pure functions of the snapshot;
        // their outputs are merged in a fixed order after the join.
        let ((seo_result, ai_result), (crawl_result, text_result)) = rayon::join(
            || {
                rayon::join(
                    || seo.analyze(snapshot),
                    || ai.analyze(snapshot),
                )
            },
            || {
                rayon::join(
                    || crawl.analyze(snapshot),
                    || text.analyze(snapshot),
                )
            },
        );

        let mut metrics: Vec<RawMetric> = Vec::new();
        let mut findings: Vec<Finding> = Vec::new();
        let mut unavailable: HashMap<Category, String> = HashMap::new();

        let results: [(Category, Result<AnalyzerOutput, AnalysisError>); 4] = [
            (Category::Seo, seo_result),
            (Category::AiReadability, ai_result),
            (Category::Crawlability, crawl_result),
            (Category::TextReadability, text_result),
        ];

        for (category, result) in results {
            match result {
                Ok(output) => {
                    metrics.extend(output.metrics);
                    findings.extend(output.findings);
                }
                Err(err) => {
                    findings.push(Finding::new(
                        category,
                        Severity::Error,
                        format!("{} analysis unavailable: {}", category, err),
                    ));
                    unavailable.insert(category, err.to_string());
                }
            }
        }

        let mut scores: Vec<NormalizedScore> = Vec::with_capacity(metrics.len());
        for metric in &metrics {
            match normalize::normalize(metric) {
                Ok(score) => scores.push(score),
                // Unreachable after check_table(), but a table bug must not
                // take the whole run down
                Err(err) => findings.push(Finding::new(
                    metric.category,
                    Severity::Error,
                    format!("metric {} could not be normalized: {}", metric.id, err),
                )),
            }
        }

        score::build_report(snapshot, &self.scoring, metrics, scores, findings, unavailable)
    }
}
