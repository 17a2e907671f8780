//! Crawlability analysis: robots directives, sitemap presence, content
//! density, latency and AI-crawler policy. Pure parsing and arithmetic over
//! the snapshot; all network work happened in the fetcher.

use super::{AnalyzerOutput, PageAnalyzer};
use crate::snapshot::PageSnapshot;
use crate::{AnalysisError, Category, Finding, MetricId, MetricValue, RawMetric, Severity};

/// User agents of recognized AI crawlers.
pub const LLM_BOTS: [&str; 11] = [
    "GPTBot",
    "ClaudeBot",
    "anthropic-ai",
    "Google-Extended",
    "CCBot",
    "PerplexityBot",
    "Amazonbot",
    "YouBot",
    "Neevabot",
    "facebookexternalhit",
    "MetaBot",
];

/// Below this text-to-HTML ratio the page is flagged as thin content.
const THIN_CONTENT_RATIO: f64 = 0.1;
/// Load times above this are flagged as slow.
const SLOW_LOAD_MS: f64 = 3000.0;

/// One `User-agent` group from robots.txt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotsGroup {
    /// User agents this group applies to (consecutive User-agent lines)
    pub agents: Vec<String>,
    /// Disallowed path prefixes (empty values dropped)
    pub disallows: Vec<String>,
    /// Allowed path prefixes
    pub allows: Vec<String>,
    /// Crawl-delay in seconds, when present
    pub crawl_delay: Option<u32>,
}

impl RobotsGroup {
    /// Whether this group names the given user agent (case-insensitive).
    pub fn applies_to(&self, agent: &str) -> bool {
        self.agents.iter().any(|a| a.eq_ignore_ascii_case(agent))
    }
}

/// Parse robots.txt into user-agent groups. Consecutive `User-agent` lines
/// share the directives that follow them; comments and blank lines are
/// skipped; unknown directives are ignored.
pub fn parse_robots(content: &str) -> Vec<RobotsGroup> {
    let mut groups: Vec<RobotsGroup> = Vec::new();
    let mut current: Option<RobotsGroup> = None;
    let mut collecting_agents = false;

    for raw_line in content.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim();

        match field.as_str() {
            "user-agent" => {
                if !collecting_agents {
                    if let Some(group) = current.take() {
                        groups.push(group);
                    }
                    current = Some(RobotsGroup::default());
                    collecting_agents = true;
                }
                if let Some(group) = current.as_mut() {
                    group.agents.push(value.to_string());
                }
            }
            "disallow" => {
                collecting_agents = false;
                if let (Some(group), false) = (current.as_mut(), value.is_empty()) {
                    group.disallows.push(value.to_string());
                }
            }
            "allow" => {
                collecting_agents = false;
                if let (Some(group), false) = (current.as_mut(), value.is_empty()) {
                    group.allows.push(value.to_string());
                }
            }
            "crawl-delay" => {
                collecting_agents = false;
                if let Some(group) = current.as_mut() {
                    group.crawl_delay = value.parse().ok();
                }
            }
            _ => {
                collecting_agents = false;
            }
        }
    }

    if let Some(group) = current.take() {
        groups.push(group);
    }
    groups
}

/// Analyzer for the crawlability category.
pub struct CrawlabilityAnalyzer;

impl CrawlabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn analyze_robots(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let groups = match snapshot.robots_txt.as_deref() {
            Some(content) => parse_robots(content),
            None => {
                out.findings.push(Finding::new(
                    Category::Crawlability,
                    Severity::Info,
                    "no robots.txt found",
                ));
                Vec::new()
            }
        };

        let page_path = snapshot.url.path();

        // The page is not indexable when the default group or a group for a
        // recognized AI crawler disallows a prefix of the page path.
        let mut blocked_by: Option<String> = None;
        for group in &groups {
            let relevant = group.applies_to("*")
                || LLM_BOTS.iter().any(|bot| group.applies_to(bot));
            if !relevant {
                continue;
            }
            if let Some(path) = group
                .disallows
                .iter()
                .find(|path| page_path.starts_with(path.as_str()))
            {
                blocked_by = Some(format!(
                    "{} (user-agent: {})",
                    path,
                    group.agents.join(", ")
                ));
                break;
            }
        }

        let indexable = blocked_by.is_none();
        out.metrics.push(RawMetric::new(
            MetricId::Indexability,
            MetricValue::Boolean(indexable),
        ));
        if let Some(rule) = blocked_by {
            out.findings.push(Finding::new(
                Category::Crawlability,
                Severity::Error,
                format!("page path blocked by robots.txt rule Disallow: {}", rule),
            ));
        }

        let has_llm_directives = groups
            .iter()
            .any(|g| LLM_BOTS.iter().any(|bot| g.applies_to(bot)));
        out.metrics.push(RawMetric::new(
            MetricId::LlmBotDirectives,
            MetricValue::Boolean(has_llm_directives),
        ));
        if !has_llm_directives && !groups.is_empty() {
            out.findings.push(Finding::new(
                Category::Crawlability,
                Severity::Info,
                "robots.txt has no directives for AI crawlers",
            ));
        }

        for group in &groups {
            if let Some(delay) = group.crawl_delay {
                if LLM_BOTS.iter().any(|bot| group.applies_to(bot)) {
                    out.findings.push(Finding::new(
                        Category::Crawlability,
                        Severity::Info,
                        format!(
                            "crawl delay of {}s for {}",
                            delay,
                            group.agents.join(", ")
                        ),
                    ));
                }
            }
        }
    }

    fn analyze_sitemap(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        out.metrics.push(RawMetric::new(
            MetricId::SitemapPresent,
            MetricValue::Boolean(snapshot.sitemap_present),
        ));
        if !snapshot.sitemap_present {
            out.findings.push(Finding::new(
                Category::Crawlability,
                Severity::Info,
                "no sitemap.xml found",
            ));
        }
    }

    fn analyze_text_ratio(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let html_bytes = snapshot.html.len();
        let text_bytes = snapshot.visible_text.len();
        let ratio = if html_bytes > 0 {
            (text_bytes as f64 / html_bytes as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        out.metrics.push(RawMetric::new(
            MetricId::TextHtmlRatio,
            MetricValue::Ratio(ratio),
        ));
        if ratio < THIN_CONTENT_RATIO {
            out.findings.push(Finding::new(
                Category::Crawlability,
                Severity::Warning,
                format!(
                    "thin content: text-to-HTML ratio {:.2} is below {}",
                    ratio, THIN_CONTENT_RATIO
                ),
            ));
        }
    }

    fn analyze_load_time(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        let ms = snapshot.latency.as_secs_f64() * 1000.0;
        out.metrics.push(RawMetric::new(
            MetricId::LoadTime,
            MetricValue::DurationMs(ms),
        ));
        if ms > SLOW_LOAD_MS {
            out.findings.push(Finding::new(
                Category::Crawlability,
                Severity::Warning,
                format!("slow page load ({:.1}s)", ms / 1000.0),
            ));
        }
    }

    fn analyze_headers(&self, snapshot: &PageSnapshot, out: &mut AnalyzerOutput) {
        if let Some(value) = snapshot.header("x-robots-tag") {
            if value.to_ascii_lowercase().contains("noindex") {
                out.findings.push(Finding::new(
                    Category::Crawlability,
                    Severity::Warning,
                    "X-Robots-Tag response header contains noindex",
                ));
            }
        }
    }
}

impl Default for CrawlabilityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageAnalyzer for CrawlabilityAnalyzer {
    fn category(&self) -> Category {
        Category::Crawlability
    }

    fn analyze(&self, snapshot: &PageSnapshot) -> Result<AnalyzerOutput, AnalysisError> {
        let mut out = AnalyzerOutput::default();
        self.analyze_robots(snapshot, &mut out);
        self.analyze_sitemap(snapshot, &mut out);
        self.analyze_text_ratio(snapshot, &mut out);
        self.analyze_load_time(snapshot, &mut out);
        self.analyze_headers(snapshot, &mut out);
        Ok(out)
    }
}
