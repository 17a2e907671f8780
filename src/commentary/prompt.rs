//! Prompt generator for qualitative page commentary

use crate::{AnalysisReport, CategoryStatus, Severity};

/// Builds a commentary prompt from a finished analysis report.
pub struct CommentaryPrompt {
    /// Include the full metric table in the prompt
    detailed: bool,
}

impl CommentaryPrompt {
    pub fn new() -> Self {
        Self { detailed: true }
    }

    /// Set detailed mode
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    /// Generate a prompt asking for qualitative commentary on the page.
    pub fn generate(&self, report: &AnalysisReport) -> String {
        let categories = report
            .categories
            .iter()
            .map(|c| match &c.status {
                CategoryStatus::Computed { score } => {
                    format!("- {}: {:.1}/100 (weight {:.0}%)", c.category, score, c.weight * 100.0)
                }
                CategoryStatus::Unavailable { reason } => {
                    format!("- {}: unavailable ({})", c.category, reason)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        let findings = if report.findings.is_empty() {
            "none".to_string()
        } else {
            report
                .findings
                .iter()
                .map(|f| {
                    let label = match f.severity {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                        Severity::Info => "info",
                    };
                    format!("- [{}] {}: {}", label, f.category, f.message)
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let metrics = if self.detailed {
            let rows = report
                .metrics
                .iter()
                .map(|m| format!("- {}: {:?}", m.id, m.value))
                .collect::<Vec<_>>()
                .join("\n");
            format!("\n## Raw Metrics\n{}\n", rows)
        } else {
            String::new()
        };

        format!(
            r#"You are a technical SEO consultant. Write a short, actionable assessment of the page below for a site owner. Focus on the weakest categories and the most impactful fixes; do not restate the numbers.

## Page
{url}

## Scores
Composite: {composite:.1}/100 (grade {grade})
{categories}

## Findings
{findings}
{metrics}
Respond with three to five concrete recommendations, most impactful first."#,
            url = report.url,
            composite = report.composite,
            grade = report.grade,
            categories = categories,
            findings = findings,
            metrics = metrics,
        )
    }
}

impl Default for CommentaryPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::snapshot::PageSnapshot;

    #[test]
    fn test_prompt_includes_scores_and_findings() {
        let engine = AnalysisEngine::with_defaults().unwrap();
        let snapshot = PageSnapshot::from_html(
            "https://example.com/",
            "<html><body><p>A page without title or headings. Two sentences here.</p></body></html>",
        );
        let report = engine.analyze(&snapshot);

        let prompt = CommentaryPrompt::new().generate(&report);
        assert!(prompt.contains("https://example.com/"));
        assert!(prompt.contains("Composite:"));
        assert!(prompt.contains("missing <title>"));
        assert!(prompt.contains("## Raw Metrics"));
    }

    #[test]
    fn test_compact_prompt_omits_metric_table() {
        let engine = AnalysisEngine::with_defaults().unwrap();
        let snapshot = PageSnapshot::from_html(
            "https://example.com/",
            "<html><body><p>Short text. Two sentences.</p></body></html>",
        );
        let report = engine.analyze(&snapshot);

        let prompt = CommentaryPrompt::new().detailed(false).generate(&report);
        assert!(!prompt.contains("## Raw Metrics"));
    }
}
