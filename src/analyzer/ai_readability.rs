//! Rule-based structure heuristics for machine consumers: semantic element
//! usage, rough HTML validity, and heading hierarchy order.

use regex::Regex;
use std::collections::HashMap;

use super::{AnalyzerOutput, PageAnalyzer};
use crate::snapshot::PageSnapshot;
use crate::{AnalysisError, Category, Finding, MetricId, MetricValue, RawMetric, Severity};

/// Sectioning elements that carry meaning, as opposed to generic `<div>`s.
const SEMANTIC_TAGS: [&str; 6] = ["header", "nav", "main", "article", "section", "footer"];

/// Non-void tags whose open/close imbalance is counted as a validity issue.
/// Tags with optional end tags (`<p>`, `<li>`, ...) are excluded to avoid
/// false positives.
const BALANCED_TAGS: [&str; 16] = [
    "div", "span", "a", "ul", "ol", "table", "section", "article", "header", "footer", "nav",
    "main", "form", "button", "h1", "h2",
];

/// Analyzer for the AI-readability category.
pub struct AiReadabilityAnalyzer;

impl AiReadabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn analyze_semantic_usage(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let semantic: usize = SEMANTIC_TAGS
            .iter()
            .map(|tag| snapshot.tree.count(tag))
            .sum();
        let divs = snapshot.tree.count("div");
        let sections = semantic + divs;
        let ratio = if sections > 0 {
            semantic as f64 / sections as f64
        } else {
            0.0
        };

        out.metrics.push(RawMetric::new(
            MetricId::SemanticRatio,
            MetricValue::Ratio(ratio),
        ));

        if sections > 0 && ratio < 0.5 {
            out.findings.push(Finding::new(
                Category::AiReadability,
                Severity::Info,
                format!(
                    "only {:.0}% of sectioning elements are semantic, prefer <main>/<article>/<nav> over <div>",
                    ratio * 100.0
                ),
            ));
        }
    }

    fn analyze_validity(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let duplicate_ids = self.count_duplicate_ids(snapshot);
        let unclosed = self.count_unbalanced_tags(&snapshot.html);
        let issues = duplicate_ids + unclosed;

        out.metrics.push(RawMetric::new(
            MetricId::ValidityIssues,
            MetricValue::Count(issues as u64),
        ));

        if duplicate_ids > 0 {
            out.findings.push(Finding::new(
                Category::AiReadability,
                Severity::Warning,
                format!("{} duplicate id attributes", duplicate_ids),
            ));
        }
        if unclosed > 0 {
            out.findings.push(Finding::new(
                Category::AiReadability,
                Severity::Warning,
                format!("{} unclosed or unbalanced tags", unclosed),
            ));
        }
    }

    /// Extra occurrences of an already-seen id each count as one issue.
    fn count_duplicate_ids(&self, snapshot: &PageSnapshot) -> usize {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for node in snapshot.tree.nodes() {
            if let Some(id) = node.attr("id") {
                if !id.is_empty() {
                    *seen.entry(id).or_insert(0) += 1;
                }
            }
        }
        seen.values().filter(|&&n| n > 1).map(|n| n - 1).sum()
    }

    /// Heuristic open/close imbalance over the raw HTML. Not a validator:
    /// the parsed tree auto-corrects, so this scans the source text.
    fn count_unbalanced_tags(&self, html: &str) -> usize {
        let mut issues = 0;
        for tag in BALANCED_TAGS {
            let open = Regex::new(&format!(r"(?i)<{}[\s>]", tag))
                .map(|re| re.find_iter(html).count())
                .unwrap_or(0);
            let close = Regex::new(&format!(r"(?i)</{}\s*>", tag))
                .map(|re| re.find_iter(html).count())
                .unwrap_or(0);
            issues += open.abs_diff(close);
        }
        issues
    }

    /// Walk headings in document order. A heading may go at most one level
    /// deeper than the current one; moving to the same or any shallower
    /// level is always allowed.
    fn analyze_heading_order(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let mut current_level: u8 = 0;
        let mut violations: u64 = 0;

        for (level, node) in snapshot.tree.headings() {
            if level > current_level + 1 {
                violations += 1;
                let text = truncate(&node.text, 60);
                let from = if current_level == 0 {
                    "document start".to_string()
                } else {
                    format!("h{}", current_level)
                };
                out.findings.push(Finding::new(
                    Category::AiReadability,
                    Severity::Warning,
                    format!("heading level skipped: {} to h{} (\"{}\")", from, level, text),
                ));
            }
            current_level = level;
        }

        out.metrics.push(RawMetric::new(
            MetricId::HeadingOrderViolations,
            MetricValue::Count(violations),
        ));
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

impl Default for AiReadabilityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageAnalyzer for AiReadabilityAnalyzer {
    fn category(&self) -> Category {
        Category::AiReadability
    }

    fn analyze(&self, snapshot: &PageSnapshot) -> Result<AnalyzerOutput, AnalysisError> {
        if snapshot.tree.is_empty() {
            return Err(AnalysisError::MalformedInput(
                "page produced an empty tag tree".to_string(),
            ));
        }

        let mut out = AnalyzerOutput::default();
        self.analyze_semantic_usage(snapshot, &mut out);
        self.analyze_validity(snapshot, &mut out);
        self.analyze_heading_order(snapshot, &mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(html: &str) -> AnalyzerOutput {
        let snapshot = PageSnapshot::from_html("https://example.com/", html);
        AiReadabilityAnalyzer::new().analyze(&snapshot).unwrap()
    }

    fn metric(out: &AnalyzerOutput, id: MetricId) -> MetricValue {
        out.metrics
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.value)
            .expect("metric present")
    }

    fn violations(html: &str) -> u64 {
        match metric(&analyze(html), MetricId::HeadingOrderViolations) {
            MetricValue::Count(n) => n,
            other => panic!("expected count, got {:?}", other),
        }
    }

    #[test]
    fn test_heading_order_in_sequence() {
        assert_eq!(violations("<h1>a</h1><h2>b</h2><h3>c</h3>"), 0);
    }

    #[test]
    fn test_heading_order_skip_is_violation() {
        assert_eq!(violations("<h1>a</h1><h3>b</h3>"), 1);
    }

    #[test]
    fn test_heading_order_going_up_is_allowed() {
        assert_eq!(violations("<h1>a</h1><h2>b</h2><h2>c</h2><h1>d</h1>"), 0);
    }

    #[test]
    fn test_heading_order_first_heading_deeper_than_h1() {
        // Document starts at level 0, so an opening h2 already skips a level
        assert_eq!(violations("<h2>a</h2><h4>b</h4>"), 2);
    }

    #[test]
    fn test_heading_violation_records_offending_text() {
        let out = analyze("<h1>ok</h1><h4>Deep dive</h4>");
        assert!(out
            .findings
            .iter()
            .any(|f| f.message.contains("h1 to h4") && f.message.contains("Deep dive")));
    }

    #[test]
    fn test_semantic_ratio() {
        let out = analyze(
            "<body><main>m</main><nav>n</nav><div>a</div><div>b</div></body>",
        );
        match metric(&out, MetricId::SemanticRatio) {
            MetricValue::Ratio(r) => assert!((r - 0.5).abs() < 1e-9),
            other => panic!("expected ratio, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_counted() {
        let out = analyze(
            r#"<div id="x"></div><span id="x"></span><p id="y"></p><p id="x"></p>"#,
        );
        match metric(&out, MetricId::ValidityIssues) {
            MetricValue::Count(n) => assert_eq!(n, 2),
            other => panic!("expected count, got {:?}", other),
        }
        let finding = out
            .findings
            .iter()
            .find(|f| f.message.contains("duplicate id"))
            .unwrap();
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn test_unbalanced_tags_counted() {
        let analyzer = AiReadabilityAnalyzer::new();
        assert_eq!(
            analyzer.count_unbalanced_tags("<div><span>text</span>"),
            1
        );
        assert_eq!(
            analyzer.count_unbalanced_tags("<div><span>ok</span></div>"),
            0
        );
    }
}
