use std::path::PathBuf;

/// Errors that abort a conversion run.
///
/// Per-file failures inside the entry walk are logged and skipped by the
/// repository adapter; they never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A date argument was not in `YYYY-MM-DD` form.
    #[error("invalid date {value:?} (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    /// Local midnight of the given date falls into a clock gap.
    #[error("local midnight of {date} does not exist in this time zone")]
    NonexistentLocalTime { date: String },

    /// A timestamp key could not be turned into a local date and time.
    #[error("timestamp {key:?} cannot be rendered as a local time")]
    InvalidTimestamp { key: String },

    /// Filesystem failure, with the path that caused it.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConversionError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
