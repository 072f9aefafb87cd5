// src/crawl/mod.rs
// =============================================================================
// This module is the concurrent crawl engine.
//
// Features:
// - One tokio task per discovered link, run in parallel
// - A fixed-size admission pool caps how many tasks fetch at once
// - A shared ledger counts references per page and caps distinct pages
// - A join barrier tells the caller when every task (children included)
//   has finished
// - Same-host restriction: other hosts are counted, never fetched
//
// Rust concepts:
// - Arc: shared ownership of the crawl state between tasks
// - Mutex / Semaphore / atomics: three independent synchronization tools,
//   never nested inside one another across an .await
// =============================================================================

mod dispatcher;
mod ledger;
mod tracker;

// Re-export the main crawling function
pub use dispatcher::crawl;
