//! The four page analyzers and the engine that orchestrates them.

pub mod ai_readability;
pub mod crawlability;
pub mod engine;
pub mod readability;
pub mod seo;

pub use ai_readability::AiReadabilityAnalyzer;
pub use crawlability::CrawlabilityAnalyzer;
pub use engine::AnalysisEngine;
pub use readability::TextReadabilityAnalyzer;
pub use seo::SeoAnalyzer;

use crate::snapshot::PageSnapshot;
use crate::{AnalysisError, Category, Finding, RawMetric};

/// Raw metrics and advisory findings produced by one analyzer.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOutput {
    pub metrics: Vec<RawMetric>,
    pub findings: Vec<Finding>,
}

/// One analysis axis. Implementations are pure functions of the snapshot:
/// no I/O, no shared mutable state, safe to run in parallel.
pub trait PageAnalyzer: Send + Sync {
    /// The category this analyzer reports under.
    fn category(&self) -> Category;

    /// Analyze the snapshot. A failure degrades this analyzer's category to
    /// unavailable; it never affects the other analyzers.
    fn analyze(&self, snapshot: &PageSnapshot) -> Result<AnalyzerOutput, AnalysisError>;
}
