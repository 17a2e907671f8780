//! Blocking HTTP fetcher: page body, robots.txt and sitemap probe.
//!
//! All network work happens here, before the snapshot is built; the
//! analyzers themselves never touch the network.

use chrono::Utc;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

use crate::snapshot::PageSnapshot;

const DEFAULT_USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; sitegauge/", env!("CARGO_PKG_VERSION"), ")");

/// Errors from fetching a page. Network failure and non-2xx status are
/// distinct: only successfully fetched pages are analyzed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },
}

/// Blocking fetcher for one analysis run.
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(timeout_secs: u64, user_agent: Option<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the page plus robots.txt and sitemap presence, and build the
    /// snapshot. The latency metric covers the page request only.
    pub fn snapshot(&self, url: &str) -> Result<PageSnapshot, FetchError> {
        let url = Url::parse(url)?;

        let started = Instant::now();
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("").to_string(),
                )
            })
            .collect();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text()?;
        let latency = started.elapsed();
        let fetched_at = Utc::now();

        let robots_txt = self.fetch_robots(&url);
        let sitemap_present = self.sitemap_exists(&url);

        Ok(PageSnapshot::new(
            url,
            status.as_u16(),
            html,
            headers,
            latency,
            fetched_at,
            robots_txt,
            sitemap_present,
        ))
    }

    /// robots.txt body, or None when absent or unreachable.
    fn fetch_robots(&self, page_url: &Url) -> Option<String> {
        let robots_url = page_url.join("/robots.txt").ok()?;
        let response = self.client.get(robots_url).send().ok()?;
        if response.status().is_success() {
            response.text().ok()
        } else {
            None
        }
    }

    /// Whether /sitemap.xml answers with a success status.
    fn sitemap_exists(&self, page_url: &Url) -> bool {
        let Ok(sitemap_url) = page_url.join("/sitemap.xml") else {
            return false;
        };
        self.client
            .get(sitemap_url)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}
