// src/crawl/dispatcher.rs
// =============================================================================
// The crawl dispatcher: one tokio task per discovered link.
//
// Each task walks through the same gates, and may stop (skip) at any of them:
//
//   1. Admission  - wait for a slot in the concurrency pool (a Semaphore)
//   2. Normalize  - turn the raw URL into a ledger key
//   3. Register   - try_register(key); only the first sighting continues
//   4. Host check - other hosts are counted in the ledger but never fetched
//   5. Fetch      - download the page; failures and non-HTML stop here
//   6. Extract    - pull the links out of the body
//   7. Recurse    - spawn a new task for every link, without waiting on it
//
// Nothing is retried, and no error ever escapes a task: it is logged and the
// task ends. The caller finds out the crawl is over through the completion
// tracker, whose count covers every task spawned transitively from the seed.
//
// Locking: the ledger lock lives inside try_register only, and the semaphore
// permit is the only thing held across .await. So no lock is ever held while
// a task waits for a fetch or for admission.
// =============================================================================

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use super::ledger::{Ledger, Registration};
use super::tracker::CompletionTracker;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::page::{extract_links, normalize_url, FetchOutcome, PageFetcher};

// How a crawl task ended when nothing went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
enum Visit {
    /// Page fetched, `links` child tasks spawned
    Expanded { links: usize },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SkipReason {
    AlreadySeen,
    CeilingReached,
    OtherHost(String),
    NotHtml(String),
    // Only reachable if the admission semaphore were closed, which the
    // crawler never does
    AdmissionClosed,
}

pub struct Crawler {
    config: Arc<CrawlConfig>,
    ledger: Ledger,
    fetcher: Arc<dyn PageFetcher>,
    admission: Arc<Semaphore>,
    tracker: Arc<CompletionTracker>,
}

// Crawls from config.base_url until no task is left running
//
// Returns the final ledger as (normalized url, reference count) pairs, in no
// particular order. Use report::sort_pages() to rank them.
pub async fn crawl(config: CrawlConfig, fetcher: Arc<dyn PageFetcher>) -> Vec<(String, usize)> {
    Crawler::new(config, fetcher).run().await
}

impl Crawler {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn PageFetcher>) -> Arc<Self> {
        Arc::new(Self {
            ledger: Ledger::new(config.max_pages),
            admission: Arc::new(Semaphore::new(config.max_concurrency)),
            tracker: CompletionTracker::new(),
            config: Arc::new(config),
            fetcher,
        })
    }

    // Spawns the seed task, waits for the whole crawl to drain, and returns
    // the ledger contents
    pub async fn run(self: &Arc<Self>) -> Vec<(String, usize)> {
        let seed = self.config.base_url.to_string();
        info!(base = %seed, max_concurrency = self.config.max_concurrency,
              max_pages = self.config.max_pages, "starting crawl");

        self.spawn(seed);
        self.tracker.wait().await;

        let pages = self.ledger.snapshot();
        info!(pages = pages.len(), "crawl finished");
        pages
    }

    // Starts a crawl task for `raw_url` without waiting for it
    //
    // The tracker is entered HERE, synchronously, so the new task is counted
    // before the spawning task can finish and drop its own guard.
    fn spawn(self: &Arc<Self>, raw_url: String) {
        let guard = self.tracker.enter();
        let crawler = Arc::clone(self);

        tokio::spawn(async move {
            let _guard = guard;

            match crawler.visit(&raw_url).await {
                Ok(Visit::Expanded { links }) => {
                    info!(url = %raw_url, links, "crawled page");
                }
                Ok(Visit::Skipped(reason)) => {
                    debug!(url = %raw_url, ?reason, "skipped");
                }
                Err(e) => {
                    warn!(url = %raw_url, error = %e, "skipping page");
                }
            }
        });
    }

    // One crawl task, gates 1 to 7
    async fn visit(self: &Arc<Self>, raw_url: &str) -> Result<Visit, CrawlError> {
        // 1. Admission. The permit is released when it drops, on every return
        //    path below, before the task's tracker guard drops. acquire_owned
        //    only fails on a closed semaphore, and ours is never closed.
        let Ok(_permit) = Arc::clone(&self.admission).acquire_owned().await else {
            return Ok(Visit::Skipped(SkipReason::AdmissionClosed));
        };

        // 2. Normalize
        let key = normalize_url(raw_url)?;

        // 3. Register (the one and only dedup point)
        match self.ledger.try_register(&key) {
            Registration::Registered => {}
            Registration::AlreadySeen => return Ok(Visit::Skipped(SkipReason::AlreadySeen)),
            Registration::CeilingReached => {
                return Ok(Visit::Skipped(SkipReason::CeilingReached))
            }
        }

        // 4. Same host only. Both sides go through Url::host_str(), which
        //    lowercases, so "A.COM" and "a.com" count as the same host.
        let current = Url::parse(raw_url).map_err(|e| CrawlError::malformed(raw_url, e))?;
        let host = current.host_str().unwrap_or_default();
        if host != self.config.base_host() {
            return Ok(Visit::Skipped(SkipReason::OtherHost(host.to_string())));
        }

        // 5. Fetch
        let body = match self.fetcher.fetch(raw_url).await? {
            FetchOutcome::Html(body) => body,
            FetchOutcome::NotHtml(content_type) => {
                return Ok(Visit::Skipped(SkipReason::NotHtml(content_type)))
            }
        };

        // 6. Extract, relative links resolve against the crawl's base URL
        let links = extract_links(&body, &self.config.base_url)?;

        // 7. Recurse
        let count = links.len();
        for link in links {
            self.spawn(link);
        }

        Ok(Visit::Expanded { links: count })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does a task take its admission slot BEFORE checking the ledger?
//    - Spawning is unbounded (one task per link), running is not
//    - Waiting tasks are cheap: a parked future, no socket, no parse tree
//    - So the pool bounds open connections no matter how wide the fan-out
//
// 2. Why `self: &Arc<Self>`?
//    - Child tasks outlive the call that spawned them
//    - Each one needs its own owning handle to the crawler, so we clone
//      the Arc (a refcount bump) instead of borrowing
//
// 3. Why doesn't a parent wait for its children?
//    - A parent holds an admission slot; if it waited on children that
//      need slots too, a small pool would deadlock
//    - The completion tracker does the waiting for everyone instead
//
// 4. Cross-host links
//    - They are registered (and counted) like any other link at step 3
//    - Step 4 stops them before any network traffic happens
// -----------------------------------------------------------------------------
