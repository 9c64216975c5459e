//! Subscriber setup for the binaries: `-v` verbosity and optional JSON lines on stderr.

use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, fmt, registry};

/// Map `-v` occurrences to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber used by the binaries. Output goes to stderr
/// so that stdout stays clean for reports and `-` exports.
pub fn init_logging(verbosity: u8, json: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = level_for(verbosity);

    let json_layer = json.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .json()
            .with_ansi(false)
            .with_filter(level)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_filter(level)
    });

    let collector = registry().with(json_layer).with(text_layer);
    tracing::subscriber::set_global_default(collector)
}
