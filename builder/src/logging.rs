//! Stderr logging for the `highlight-pack` binary.
//!
//! Library code logs through the `log` facade. The binary installs a
//! `tracing-subscriber` formatter on standard error; its `tracing-log` bridge
//! forwards `log` records, so targets such as `pack::styles` survive.

use tracing_subscriber::filter::LevelFilter;

/// Chooses the maximum level from the CLI verbosity flags.
///
/// # Examples
///
/// ```
/// use highlight_pack_builder::logging::level_for;
/// use tracing_subscriber::filter::LevelFilter;
///
/// assert_eq!(level_for(0, false), LevelFilter::INFO);
/// assert_eq!(level_for(0, true), LevelFilter::ERROR);
/// assert_eq!(level_for(2, false), LevelFilter::TRACE);
/// ```
#[must_use]
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the stderr formatter as the global subscriber.
///
/// Records below `level` are discarded. Timestamps are omitted; the level
/// and target prefix each line.
///
/// # Errors
///
/// Returns an error if a global subscriber or `log` logger is already
/// installed.
pub fn init(level: LevelFilter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .try_init()
}
