// src/page/mod.rs
// =============================================================================
// Everything the crawler needs to know about a single page.
//
// Submodules:
// - normalize: turns a URL into the key used by the visitation ledger
// - html: extracts link targets from a page body
// - fetch: downloads a page (or says why it couldn't)
//
// None of these hold any shared state. The crawl engine in src/crawl/ is the
// only place where tasks meet.
// =============================================================================

mod fetch;
mod html;
mod normalize;

pub use fetch::{FetchOutcome, HttpFetcher, PageFetcher};
pub use html::extract_links;
pub use normalize::normalize_url;
