//! Subscriber set-up for neodb
//!
//! The library only emits `tracing` events. Binaries install a subscriber
//! once through `init_logging`; `RUST_LOG` overrides the configured level.

use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log levels accepted in configuration
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Resolves a configured level, falling back to `info` for unknown values
pub fn resolve_level(level: &str) -> LevelFilter {
    if !LOG_LEVELS.contains(&level) {
        return LevelFilter::INFO;
    }
    LevelFilter::from_str(level).unwrap_or(LevelFilter::INFO)
}

/// Installs the global subscriber writing to stderr.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(resolve_level(level).into())
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_levels() {
        assert_eq!(resolve_level("debug"), LevelFilter::DEBUG);
        assert_eq!(resolve_level("warn"), LevelFilter::WARN);
    }

    #[test]
    fn test_resolve_unknown_level_defaults_to_info() {
        assert_eq!(resolve_level("verbose"), LevelFilter::INFO);
        assert_eq!(resolve_level(""), LevelFilter::INFO);
    }
}
