//! Logging bootstrap for the binary
//!
//! The library only emits records through `log`; installing a backend is left
//! to the process entry point.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable holding `env_logger` filter directives
pub const LOG_ENV: &str = "DAYPORT_LOG";

/// Map repeated `-v` flags onto a level, starting from warnings
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. `DAYPORT_LOG`, when set, wins over `verbosity`.
pub fn init(verbosity: u8) {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .format_timestamp(None)
        .parse_env(Env::new().filter(LOG_ENV));

    // A second initialization (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}
