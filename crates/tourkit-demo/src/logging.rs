#![forbid(unsafe_code)]

//! File logging.
//!
//! The terminal belongs to the UI, so logs only ever go to a file. Without
//! `--log-file` no subscriber is installed and every tourkit event is
//! dropped at the call site.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::DemoError;

/// Parse a filter string.
pub fn filter(directives: &str) -> Result<EnvFilter, DemoError> {
    Ok(EnvFilter::try_new(directives)?)
}

/// Install a global subscriber writing to `path`, if given.
///
/// Returns whether logging is on.
pub fn init(path: Option<&Path>, directives: &str) -> Result<bool, DemoError> {
    let Some(path) = path else {
        return Ok(false);
    };
    let filter = filter(directives)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| DemoError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(log_file = %path.display(), "logging started");
    Ok(true)
}
