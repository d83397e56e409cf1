#![forbid(unsafe_code)]

//! Demo error type.

use std::io;
use std::path::PathBuf;

/// Everything that can stop the demo.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Terminal setup, input, or output failed.
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),

    /// The log file could not be opened.
    #[error("cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `--log-filter` / `RUST_LOG` did not parse.
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed.
    #[error("cannot install log subscriber: {0}")]
    LogInit(#[from] tracing_subscriber::util::TryInitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        let err = DemoError::LogFile {
            path: PathBuf::from("/nope/demo.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "cannot open log file /nope/demo.log: missing");

        let err = DemoError::from(io::Error::other("tty gone"));
        assert_eq!(err.to_string(), "terminal i/o failed: tty gone");
    }

    #[test]
    fn bad_filter_converts() {
        let parse = tracing_subscriber::EnvFilter::try_new("tourkit=loudest");
        let err = DemoError::from(parse.unwrap_err());
        assert!(err.to_string().starts_with("invalid log filter"));
    }
}
