// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   crawl <baseURL> [maxConcurrency] [maxPages] [--json] [--timeout-secs N] [-v]
//
// The two numbers are positional, like the URL, and fall back to 5 and 10.
// clap rejects anything that isn't a non-negative integer; main.rs turns
// that rejection into exit code 1.
// =============================================================================

use clap::Parser;

use crate::config::{DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_PAGES};

#[derive(Parser, Debug)]
#[command(
    name = "crawl",
    version,
    about = "Crawl a website and count internal links to each page",
    long_about = "crawl visits every page reachable from the base URL through links on the same \
                  host, counts how many times each page is linked to, and prints the pages \
                  ranked by that count. Links to other hosts are counted but never followed."
)]
pub struct Cli {
    /// Website to start from (e.g., https://example.com)
    pub base_url: String,

    /// How many pages may be fetched at the same time
    #[arg(default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// The most distinct pages to record before the crawl winds down
    #[arg(default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Output the report in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Log every skipped page, not just fetched ones
    #[arg(short, long)]
    pub verbose: bool,
}
