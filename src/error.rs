// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Every per-page error below is recoverable: the crawl task that hit it logs
// it and stops, and the rest of the crawl carries on. Only `Config` is fatal,
// and it can only happen before any crawling starts.
//
// Note that "this page is not HTML" is NOT an error. The fetcher reports it
// as `FetchOutcome::NotHtml`, which simply means "no links on this page".
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error and Display
// - Enums with data: each variant carries the details of what went wrong
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The raw string could not be read as an absolute URL
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Non-success HTTP status or a transport failure (never retried)
    #[error("failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// The page body could not be turned into a list of links
    #[error("failed to parse page body: {0}")]
    ParseFailure(String),

    /// Bad command-line input, fatal before the crawl starts
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CrawlError {
    pub fn malformed(url: &str, reason: impl ToString) -> Self {
        CrawlError::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        CrawlError::FetchFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_url() {
        let err = CrawlError::fetch("https://example.com/a", "HTTP 404 Not Found");
        assert_eq!(
            err.to_string(),
            "failed to fetch https://example.com/a: HTTP 404 Not Found"
        );
    }
}
