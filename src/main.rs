// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a CrawlConfig (bad input stops us before any crawling)
// 3. Run the crawl and wait for every task to finish
// 4. Sort the ledger and print the report
// 5. Exit with proper code (0 = done, 1 = bad arguments, 2 = internal error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - validated crawl settings
mod crawl;    // src/crawl/ - the concurrent crawl engine
mod error;    // src/error.rs - error types
mod logging;  // src/logging.rs - tracing setup
mod page;     // src/page/ - normalize, fetch and extract links from pages
mod report;   // src/report.rs - ranking and printing

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;
use config::CrawlConfig;
use error::CrawlError;
use page::HttpFetcher;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<CrawlError>() {
                Some(CrawlError::Config(_)) => ExitCode::from(1),
                _ => ExitCode::from(2),
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CrawlConfig::new(&cli.base_url, cli.max_concurrency, cli.max_pages)?;
    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout_secs))
        .context("failed to create HTTP client")?;

    // Keep stdout clean for --json consumers
    if !cli.json {
        println!("starting crawl of: {}", cli.base_url);
    }

    let pages = crawl::crawl(config, Arc::new(fetcher)).await;
    let pages = report::sort_pages(pages);

    if cli.json {
        println!("{}", report::render_json(&cli.base_url, &pages)?);
    } else {
        print!("{}", report::render_text(&cli.base_url, &pages));
    }

    Ok(())
}
