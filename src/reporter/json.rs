//! JSON reporter for machine-readable output

use crate::AnalysisReport;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Serialize an analysis report as JSON
    pub fn report(&self, report: &AnalysisReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::snapshot::PageSnapshot;
    use crate::Category;

    fn make_report() -> AnalysisReport {
        let engine = AnalysisEngine::with_defaults().unwrap();
        let snapshot = PageSnapshot::from_html(
            "https://example.com/page",
            "<html><head><title>t</title></head><body><h1>h</h1>\
             <p>Some text for the analyzers to chew on. More than one sentence.</p></body></html>",
        );
        engine.analyze(&snapshot)
    }

    #[test]
    fn test_json_has_expected_keys() {
        let report = make_report();
        let json = JsonReporter::new().report(&report);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed.get("url").is_some());
        assert!(parsed.get("composite").is_some());
        assert!(parsed.get("grade").is_some());
        assert!(parsed.get("categories").is_some());
        assert!(parsed.get("metrics").is_some());
        assert!(parsed.get("scores").is_some());
        assert!(parsed.get("findings").is_some());
        assert!(parsed.get("fetchedAt").is_some());

        let categories = parsed["categories"].as_array().unwrap();
        assert_eq!(categories.len(), Category::ALL.len());
        assert!(categories[0].get("status").is_some());
        assert!(categories[0].get("weight").is_some());
    }

    #[test]
    fn test_metric_ids_serialize_kebab_case() {
        let report = make_report();
        let json = JsonReporter::new().report(&report);
        assert!(json.contains("\"title-length\""));
        assert!(json.contains("\"flesch-reading-ease\""));
    }

    #[test]
    fn test_pretty_output_has_newlines() {
        let report = make_report();
        let json = JsonReporter::new().pretty().report(&report);
        assert!(json.contains('\n'), "pretty JSON should have newlines");
        assert!(json.contains("  "), "pretty JSON should have indentation");
    }
}
