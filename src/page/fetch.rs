// src/page/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// The crawler only talks to the `PageFetcher` trait, so tests can hand it an
// in-memory fake instead of a real HTTP client. The real implementation,
// `HttpFetcher`, uses reqwest.
//
// Three outcomes are possible:
// - Ok(FetchOutcome::Html(body))     -> a text/html page, go find its links
// - Ok(FetchOutcome::NotHtml(type))  -> fine, but there are no links to find
// - Err(CrawlError::FetchFailure)    -> HTTP status >= 400 or network failure
//
// Failed fetches are never retried.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::error::CrawlError;

// What a successful fetch produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page body of a text/html response
    Html(String),
    /// Any other content type (holds the Content-Type header, maybe empty)
    NotHtml(String),
}

// The capability "give me the text of this page"
//
// Send + Sync because one fetcher is shared by every crawl task, and tasks
// run on tokio's multi-threaded scheduler.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, CrawlError>;
}

// Fetches pages over HTTP(S) with reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds a fetcher with one shared client (connection pooling)
    //
    // The timeout is the only limit on how long a task may wait for a page:
    // the crawl engine itself never cancels a fetch.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("samehost-crawl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlError::fetch(url, describe_transport_error(&e)))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(CrawlError::fetch(url, format!("HTTP {}", status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html(&content_type) {
            return Ok(FetchOutcome::NotHtml(content_type));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CrawlError::fetch(url, describe_transport_error(&e)))?;

        Ok(FetchOutcome::Html(body))
    }
}

// "text/html; charset=utf-8" counts as HTML, "application/pdf" does not
fn is_html(content_type: &str) -> bool {
    content_type.trim_start().starts_with("text/html")
}

// Turns a reqwest error into a short, human-readable reason
fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}
