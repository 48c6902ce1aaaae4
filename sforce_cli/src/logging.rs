//! Logger setup. Everything goes to stderr; stdout carries MCP messages.

use log::LevelFilter;

/// Default level for the given verbosity. `RUST_LOG` still overrides it.
pub fn level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn initialize_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(level(verbose))
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .init();
}
