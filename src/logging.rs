//! Logging setup for the CLI.
//!
//! Library code emits `tracing` events and never installs a subscriber; the
//! binary calls [`init_logging`] once at startup. Output goes to stderr so
//! rendered HTML on stdout stays clean.
//!
//! | Level | Used for |
//! |-------|----------|
//! | `error` | dataset could not be loaded |
//! | `warn` | skipped records, duplicate ids, preference write failures |
//! | `info` | command progress |
//! | `debug` | recompute and view transition details |
//!
//! `RUST_LOG` takes precedence over the `-v` count.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for a `-v` count: 0 → warn, 1 → info, 2 → debug, 3+ → trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global fmt subscriber.
///
/// Calling it twice is harmless; the second install is ignored.
pub fn init_logging(verbosity: u8) {
    let default_level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
