//! Structural SEO analysis: meta tags, headings, links, images, inline assets.

use url::Url;

use super::{AnalyzerOutput, PageAnalyzer};
use crate::snapshot::PageSnapshot;
use crate::{AnalysisError, Category, Finding, MetricId, MetricValue, RawMetric, Severity};

/// Meta description shorter than this is flagged as too short.
const DESCRIPTION_MIN: usize = 50;
/// Meta description longer than this is flagged as too long.
const DESCRIPTION_MAX: usize = 160;

/// Analyzer for the structural SEO category.
pub struct SeoAnalyzer;

impl SeoAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn analyze_title(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let title = snapshot.tree.first("title").map(|t| t.text.clone());
        let length = title.as_deref().map(str::len).unwrap_or(0);
        out.metrics.push(RawMetric::new(
            MetricId::TitleLength,
            MetricValue::Count(length as u64),
        ));

        if title.is_none() || length == 0 {
            out.findings.push(Finding::new(
                Category::Seo,
                Severity::Warning,
                "missing <title> tag",
            ));
        }
    }

    fn analyze_description(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let description = snapshot.tree.meta_content("description");
        let length = description.map(str::len).unwrap_or(0);
        out.metrics.push(RawMetric::new(
            MetricId::MetaDescriptionLength,
            MetricValue::Count(length as u64),
        ));

        match length {
            0 => out.findings.push(Finding::new(
                Category::Seo,
                Severity::Warning,
                "missing meta description",
            )),
            l if l < DESCRIPTION_MIN => out.findings.push(Finding::new(
                Category::Seo,
                Severity::Info,
                format!(
                    "meta description is short ({} chars, aim for {}-{})",
                    l, DESCRIPTION_MIN, DESCRIPTION_MAX
                ),
            )),
            l if l > DESCRIPTION_MAX => out.findings.push(Finding::new(
                Category::Seo,
                Severity::Info,
                format!(
                    "meta description is long ({} chars, may be truncated beyond {})",
                    l, DESCRIPTION_MAX
                ),
            )),
            _ => {}
        }
    }

    fn analyze_headings(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let h1_count = snapshot.tree.count("h1");
        out.metrics.push(RawMetric::new(
            MetricId::H1Count,
            MetricValue::Count(h1_count as u64),
        ));

        match h1_count {
            0 => out.findings.push(Finding::new(
                Category::Seo,
                Severity::Warning,
                "no H1 heading on the page",
            )),
            1 => {}
            n => out.findings.push(Finding::new(
                Category::Seo,
                Severity::Warning,
                format!("{} H1 headings found, expected exactly one", n),
            )),
        }
    }

    fn analyze_links(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let mut internal: u64 = 0;
        let mut external: u64 = 0;

        for link in snapshot.tree.elements("a") {
            let Some(href) = link.attr("href") else {
                continue;
            };
            if href.starts_with("mailto:")
                || href.starts_with("tel:")
                || href.starts_with("javascript:")
            {
                continue;
            }
            if Self::is_internal(&snapshot.url, href) {
                internal += 1;
            } else {
                external += 1;
            }
        }

        let total = internal + external;
        let ratio = if total > 0 {
            internal as f64 / total as f64
        } else {
            0.0
        };

        out.metrics.push(RawMetric::new(
            MetricId::InternalLinkCount,
            MetricValue::Count(internal),
        ));
        out.metrics.push(RawMetric::new(
            MetricId::ExternalLinkCount,
            MetricValue::Count(external),
        ));
        out.metrics.push(RawMetric::new(
            MetricId::InternalLinkRatio,
            MetricValue::Ratio(ratio),
        ));

        if total == 0 {
            out.findings.push(Finding::new(
                Category::Seo,
                Severity::Info,
                "page has no links",
            ));
        }
    }

    /// Relative hrefs and same-host absolute hrefs count as internal.
    fn is_internal(base: &Url, href: &str) -> bool {
        match base.join(href) {
            Ok(resolved) => resolved.host_str() == base.host_str(),
            // An href the URL parser rejects can't leave the site
            Err(_) => true,
        }
    }

    fn analyze_images(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let total = snapshot.tree.count("img");
        let missing_alt = snapshot
            .tree
            .elements("img")
            .filter(|img| img.attr("alt").map(str::trim).unwrap_or("").is_empty())
            .count();

        out.metrics.push(RawMetric::new(
            MetricId::ImagesMissingAlt,
            MetricValue::Count(missing_alt as u64),
        ));

        if missing_alt > 0 {
            out.findings.push(Finding::new(
                Category::Seo,
                Severity::Warning,
                format!("{} of {} images missing alt text", missing_alt, total),
            ));
        }
    }

    fn analyze_inline_assets(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let inline_scripts = snapshot
            .tree
            .elements("script")
            .filter(|s| s.attr("src").is_none())
            .count();
        let style_blocks = snapshot.tree.count("style");
        let inline = inline_scripts + style_blocks;

        out.metrics.push(RawMetric::new(
            MetricId::InlineAssets,
            MetricValue::Count(inline as u64),
        ));

        if inline > 0 {
            out.findings.push(Finding::new(
                Category::Seo,
                Severity::Info,
                format!(
                    "{} inline script/style blocks, consider moving to external assets",
                    inline
                ),
            ));
        }
    }
}

impl Default for SeoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageAnalyzer for SeoAnalyzer {
    fn category(&self) -> Category {
        Category::Seo
    }

    fn analyze(&self, snapshot: &PageSnapshot) -> Result<AnalyzerOutput, AnalysisError> {
        if snapshot.tree.is_empty() {
            return Err(AnalysisError::MalformedInput(
                "page produced an empty tag tree".to_string(),
            ));
        }

        let mut out = AnalyzerOutput::default();
        self.analyze_title(snapshot, &mut out);
        self.analyze_description(snapshot, &mut out);
        self.analyze_headings(snapshot, &mut out);
        self.analyze_links(snapshot, &mut out);
        self.analyze_images(snapshot, &mut out);
        self.analyze_inline_assets(snapshot, &mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(out: &AnalyzerOutput, id: MetricId) -> MetricValue {
        out.metrics
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.value)
            .expect("metric present")
    }

    fn analyze(html: &str) -> AnalyzerOutput {
        let snapshot = PageSnapshot::from_html("https://example.com/page", html);
        SeoAnalyzer::new().analyze(&snapshot).unwrap()
    }

    #[test]
    fn test_empty_tree_is_malformed_input() {
        let snapshot = PageSnapshot::from_html("https://example.com/", "");
        let err = SeoAnalyzer::new().analyze(&snapshot).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedInput(_)));
    }

    #[test]
    fn test_title_and_description_lengths() {
        let out = analyze(
            r#"<html><head>
                <title>Hello</title>
                <meta name="description" content="Short.">
            </head><body><h1>H</h1></body></html>"#,
        );
        assert_eq!(metric(&out, MetricId::TitleLength), MetricValue::Count(5));
        assert_eq!(
            metric(&out, MetricId::MetaDescriptionLength),
            MetricValue::Count(6)
        );
        assert!(out
            .findings
            .iter()
            .any(|f| f.message.contains("description is short")));
    }

    #[test]
    fn test_missing_title_and_description_flagged() {
        let out = analyze("<html><body><p>text</p></body></html>");
        assert_eq!(metric(&out, MetricId::TitleLength), MetricValue::Count(0));
        assert!(out.findings.iter().any(|f| f.message.contains("<title>")));
        assert!(out
            .findings
            .iter()
            .any(|f| f.message == "missing meta description"));
    }

    #[test]
    fn test_multiple_h1_flagged() {
        let out = analyze("<body><h1>a</h1><h1>b</h1></body>");
        assert_eq!(metric(&out, MetricId::H1Count), MetricValue::Count(2));
        assert!(out
            .findings
            .iter()
            .any(|f| f.message.contains("expected exactly one")));
    }

    #[test]
    fn test_link_classification() {
        let out = analyze(
            r#"<body>
                <a href="/about">about</a>
                <a href="https://example.com/contact">contact</a>
                <a href="https://other.org/">other</a>
                <a href="mailto:hi@example.com">mail</a>
            </body>"#,
        );
        assert_eq!(
            metric(&out, MetricId::InternalLinkCount),
            MetricValue::Count(2)
        );
        assert_eq!(
            metric(&out, MetricId::ExternalLinkCount),
            MetricValue::Count(1)
        );
        match metric(&out, MetricId::InternalLinkRatio) {
            MetricValue::Ratio(r) => assert!((r - 2.0 / 3.0).abs() < 1e-9),
            other => panic!("expected ratio, got {:?}", other),
        }
    }

    #[test]
    fn test_images_missing_alt() {
        let out = analyze(
            r#"<body>
                <img src="a.png" alt="described">
                <img src="b.png" alt="">
                <img src="c.png">
            </body>"#,
        );
        assert_eq!(
            metric(&out, MetricId::ImagesMissingAlt),
            MetricValue::Count(2)
        );
        assert!(out
            .findings
            .iter()
            .any(|f| f.message.contains("2 of 3 images")));
    }

    #[test]
    fn test_inline_assets_counted() {
        let out = analyze(
            r#"<head>
                <script src="app.js"></script>
                <script>inline()</script>
                <style>.a{}</style>
            </head><body></body>"#,
        );
        assert_eq!(metric(&out, MetricId::InlineAssets), MetricValue::Count(2));
    }
}
