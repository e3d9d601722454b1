//! Diagnostic logging setup.
//!
//! Console status lines go through [`crate::output::OutputFormatter`]. The
//! `log` macros carry diagnostics only (per-row filter decisions, unreadable
//! rows, cross-device fallbacks) and are silent below `warn` unless asked for.

use log::LevelFilter;

/// Initialises `env_logger`. `RUST_LOG` wins over the default level.
pub fn setup_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();

    builder.filter(None, default_level(verbose));

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}

fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
