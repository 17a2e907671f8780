//! The immutable input bundle for one analysis run.

use chrono::{DateTime, Utc};
use std::time::Duration;
use url::Url;

use crate::parser::{self, TagTree};

/// Everything the analyzers need about one fetched page. Built once per run
/// and passed by shared reference; nothing here is ever mutated.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// The analyzed URL
    pub url: Url,
    /// Final HTTP status
    pub status: u16,
    /// Raw HTML body
    pub html: String,
    /// Parsed, read-only tag tree
    pub tree: TagTree,
    /// Response headers as (name, value) pairs
    pub headers: Vec<(String, String)>,
    /// Time to first full response
    pub latency: Duration,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
    /// robots.txt body, None when absent or unreachable
    pub robots_txt: Option<String>,
    /// Whether a sitemap.xml resource exists
    pub sitemap_present: bool,
    /// Visible text with markup stripped
    pub visible_text: String,
}

impl PageSnapshot {
    /// Build a snapshot from fetched parts, parsing the HTML once.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        url: Url,
        status: u16,
        html: String,
        headers: Vec<(String, String)>,
        latency: Duration,
        fetched_at: DateTime<Utc>,
        robots_txt: Option<String>,
        sitemap_present: bool,
    ) -> Self {
        let parsed = parser::parse_page(&html);
        Self {
            url,
            status,
            html,
            tree: parsed.tree,
            headers,
            latency,
            fetched_at,
            robots_txt,
            sitemap_present,
            visible_text: parsed.visible_text,
        }
    }

    /// Convenience constructor for offline analysis of a bare HTML document:
    /// 200 status, no headers, zero latency, no robots.txt, no sitemap.
    pub fn from_html(url: &str, html: &str) -> Self {
        let url = Url::parse(url).unwrap_or_else(|_| Url::parse("http://localhost/").unwrap());
        Self::new(
            url,
            200,
            html.to_string(),
            Vec::new(),
            Duration::ZERO,
            DateTime::<Utc>::UNIX_EPOCH,
            None,
            false,
        )
    }

    /// Case-insensitive response header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
