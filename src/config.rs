// src/config.rs
// =============================================================================
// The crawl configuration.
//
// Built once from the command line, validated here, then shared read-only
// (behind an Arc) by every crawl task. Nothing in it changes after the crawl
// starts.
// =============================================================================

use url::Url;

use crate::error::CrawlError;

pub const DEFAULT_MAX_CONCURRENCY: usize = 5;
pub const DEFAULT_MAX_PAGES: usize = 10;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts. Its host is the only host we fetch from.
    pub base_url: Url,
    /// How many crawl tasks may be in flight at once
    pub max_concurrency: usize,
    /// The most distinct pages the ledger will ever record
    pub max_pages: usize,
}

impl CrawlConfig {
    pub fn new(
        raw_base_url: &str,
        max_concurrency: usize,
        max_pages: usize,
    ) -> Result<Self, CrawlError> {
        let base_url = Url::parse(raw_base_url)
            .map_err(|e| CrawlError::Config(format!("invalid URL '{}': {}", raw_base_url, e)))?;

        if base_url.host_str().is_none() {
            return Err(CrawlError::Config(format!(
                "URL has no host: {}",
                raw_base_url
            )));
        }

        // An empty admission pool would leave the seed task waiting forever
        if max_concurrency == 0 {
            return Err(CrawlError::Config(
                "maxConcurrency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            max_concurrency,
            max_pages,
        })
    }

    // The host every fetched page must be on
    pub fn base_host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }
}
