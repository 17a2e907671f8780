//! Sitegauge: SEO, crawlability and AI-readability analyzer for web pages
//!
//! This library analyzes a single fetched page along four independent axes,
//! normalizes every raw measurement onto a common 0-100 scale and combines
//! the per-axis scores into one weighted composite score.

pub mod analyzer;
pub mod commentary;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod reporter;
pub mod score;
pub mod snapshot;
pub mod text;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Structural SEO quality (meta tags, headings, links, images)
    Seo,
    /// Rule-based structure heuristics for machine consumers
    AiReadability,
    /// Robots directives, sitemap, content density, latency
    Crawlability,
    /// Plain-text readability statistics
    TextReadability,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Seo,
        Category::AiReadability,
        Category::Crawlability,
        Category::TextReadability,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Seo => write!(f, "SEO"),
            Category::AiReadability => write!(f, "AI Readability"),
            Category::Crawlability => write!(f, "Crawlability"),
            Category::TextReadability => write!(f, "Text Readability"),
        }
    }
}

/// Identifier for every raw metric the analyzers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricId {
    // SEO
    TitleLength,
    MetaDescriptionLength,
    H1Count,
    InternalLinkCount,
    ExternalLinkCount,
    InternalLinkRatio,
    ImagesMissingAlt,
    InlineAssets,
    // AI readability
    SemanticRatio,
    ValidityIssues,
    HeadingOrderViolations,
    // Crawlability
    Indexability,
    SitemapPresent,
    TextHtmlRatio,
    LoadTime,
    LlmBotDirectives,
    // Text readability
    FleschReadingEase,
    AvgSentenceLength,
    LexicalComplexity,
}

impl MetricId {
    /// The category this metric belongs to.
    pub fn category(&self) -> Category {
        use MetricId::*;
        match self {
            TitleLength | MetaDescriptionLength | H1Count | InternalLinkCount
            | ExternalLinkCount | InternalLinkRatio | ImagesMissingAlt | InlineAssets => {
                Category::Seo
            }
            SemanticRatio | ValidityIssues | HeadingOrderViolations => Category::AiReadability,
            Indexability | SitemapPresent | TextHtmlRatio | LoadTime | LlmBotDirectives => {
                Category::Crawlability
            }
            FleschReadingEase | AvgSentenceLength | LexicalComplexity => Category::TextReadability,
        }
    }

    pub const ALL: [MetricId; 19] = [
        MetricId::TitleLength,
        MetricId::MetaDescriptionLength,
        MetricId::H1Count,
        MetricId::InternalLinkCount,
        MetricId::ExternalLinkCount,
        MetricId::InternalLinkRatio,
        MetricId::ImagesMissingAlt,
        MetricId::InlineAssets,
        MetricId::SemanticRatio,
        MetricId::ValidityIssues,
        MetricId::HeadingOrderViolations,
        MetricId::Indexability,
        MetricId::SitemapPresent,
        MetricId::TextHtmlRatio,
        MetricId::LoadTime,
        MetricId::LlmBotDirectives,
        MetricId::FleschReadingEase,
        MetricId::AvgSentenceLength,
        MetricId::LexicalComplexity,
    ];
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MetricId::TitleLength => "title-length",
            MetricId::MetaDescriptionLength => "meta-description-length",
            MetricId::H1Count => "h1-count",
            MetricId::InternalLinkCount => "internal-link-count",
            MetricId::ExternalLinkCount => "external-link-count",
            MetricId::InternalLinkRatio => "internal-link-ratio",
            MetricId::ImagesMissingAlt => "images-missing-alt",
            MetricId::InlineAssets => "inline-assets",
            MetricId::SemanticRatio => "semantic-ratio",
            MetricId::ValidityIssues => "validity-issues",
            MetricId::HeadingOrderViolations => "heading-order-violations",
            MetricId::Indexability => "indexability",
            MetricId::SitemapPresent => "sitemap-present",
            MetricId::TextHtmlRatio => "text-html-ratio",
            MetricId::LoadTime => "load-time",
            MetricId::LlmBotDirectives => "llm-bot-directives",
            MetricId::FleschReadingEase => "flesch-reading-ease",
            MetricId::AvgSentenceLength => "avg-sentence-length",
            MetricId::LexicalComplexity => "lexical-complexity",
        };
        write!(f, "{}", s)
    }
}

/// Parse a metric id from its kebab-case name (used for config overrides).
pub fn metric_id_from_str(s: &str) -> Option<MetricId> {
    MetricId::ALL.iter().copied().find(|m| m.to_string() == s)
}

/// A measured value with an explicit kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum MetricValue {
    /// A non-negative count (characters, elements, violations)
    Count(u64),
    /// A ratio, nominally within [0, 1]
    Ratio(f64),
    /// A pass/fail observation
    Boolean(bool),
    /// A duration in milliseconds
    DurationMs(f64),
    /// A value on an analyzer-defined open scale (e.g. Flesch Reading Ease)
    Scale(f64),
}

/// A single raw measurement produced by one analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetric {
    /// Which metric this is
    pub id: MetricId,
    /// Owning category
    pub category: Category,
    /// The measured value
    pub value: MetricValue,
}

impl RawMetric {
    pub fn new(id: MetricId, value: MetricValue) -> Self {
        Self {
            id,
            category: id.category(),
            value,
        }
    }
}

/// A raw metric mapped onto the common 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedScore {
    /// The metric this score was derived from
    pub metric: MetricId,
    /// Score in [0, 100], clamped
    pub score: f64,
    /// The normalization curve that produced it
    pub curve: CurveId,
}

/// Identifier of the normalization curve applied to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveId {
    BooleanPass,
    TargetRange,
    CountPenalty,
    DurationRamp,
}

impl std::fmt::Display for CurveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveId::BooleanPass => write!(f, "boolean-pass"),
            CurveId::TargetRange => write!(f, "target-range"),
            CurveId::CountPenalty => write!(f, "count-penalty"),
            CurveId::DurationRamp => write!(f, "duration-ramp"),
        }
    }
}

/// Severity levels for findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// An advisory, human-readable flag raised during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Category the finding belongs to
    pub category: Category,
    /// How serious it is
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
}

impl Finding {
    pub fn new(category: Category, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            message: message.into(),
        }
    }
}

/// Whether a category could be computed for this run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CategoryStatus {
    /// The category score was computed normally
    Computed { score: f64 },
    /// The category's analyzer failed; the reason is surfaced instead of a zero score
    Unavailable { reason: String },
}

impl CategoryStatus {
    pub fn score(&self) -> Option<f64> {
        match self {
            CategoryStatus::Computed { score } => Some(*score),
            CategoryStatus::Unavailable { .. } => None,
        }
    }
}

/// Per-category result within the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    /// The category
    pub category: Category,
    /// Computed score or the reason it is unavailable
    #[serde(flatten)]
    pub status: CategoryStatus,
    /// Weight this category carried in the composite (after re-normalization)
    pub weight: f64,
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score.round() as i64 {
            90..=100 => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// The terminal artifact of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// The analyzed URL
    pub url: String,
    /// When the page was fetched (copied from the snapshot, so re-analysis
    /// of the same snapshot yields an identical report)
    pub fetched_at: chrono::DateTime<chrono::Utc>,
    /// Weighted composite score, 0-100
    pub composite: f64,
    /// Letter grade derived from the composite
    pub grade: Grade,
    /// Per-category scores and weights
    pub categories: Vec<CategoryReport>,
    /// Every raw metric, for traceability
    pub metrics: Vec<RawMetric>,
    /// Every normalized score, for traceability
    pub scores: Vec<NormalizedScore>,
    /// Advisory findings collected across all analyzers
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    /// Look up one category's report.
    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Errors an individual analyzer can fail with. A failure degrades that
/// analyzer's category to unavailable; it never aborts sibling analyzers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A required input structure is missing or empty
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The extracted text has no sentences or no words
    #[error("insufficient text: {0}")]
    InsufficientText(String),
}

/// Public API: fetch a URL and run the full analysis pipeline.
///
/// * `url` - the page to analyze
/// * `config` - scoring configuration (weights validated at engine construction)
pub fn analyze_url(url: &str, config: &config::Config) -> anyhow::Result<AnalysisReport> {
    let scoring = config::ScoringConfig::from_config(config)?;
    let engine = analyzer::AnalysisEngine::new(scoring)?;
    let fetcher =
        fetcher::Fetcher::new(config.timeout_secs.unwrap_or(30), config.user_agent.clone())?;
    let snapshot = fetcher.snapshot(url)?;
    Ok(engine.analyze(&snapshot))
}
