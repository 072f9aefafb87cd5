// src/logging.rs
// =============================================================================
// Logging setup.
//
// Log events go to stderr so stdout carries nothing but the report (which
// keeps `crawl ... --json | jq` working). The level comes from RUST_LOG when
// it is set, otherwise from the --verbose flag.
//
// Event targets start with the crate name of the binary being built
// ("crawl", from the [[bin]] name), not the package name, so the filter is
// built from CARGO_CRATE_NAME rather than spelled out.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// "warn" for dependencies, info (or debug with -v) for our own events
fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level)
}
