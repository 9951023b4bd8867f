//! Error types for the timeline pipeline.
//!
//! Two layers exist:
//!
//! - [`TimelineError`] covers failures that stop a command: unreadable
//!   files, an unusable configuration, a table without a header.
//! - [`RecordIssue`] describes a single bad record. Issues are logged and
//!   collected, the offending record is skipped, and the pipeline carries on.
//!
//! # Example
//!
//! ```rust
//! use contrib_timeline::errors::{RecordIssue, TimelineError};
//!
//! let issue = RecordIssue::MalformedTimestamp {
//!     id: "osm-changeset-1".into(),
//!     value: "yesterday".into(),
//! };
//! assert!(issue.to_string().contains("yesterday"));
//!
//! let err = TimelineError::config("unknown bucketing mode `week`");
//! assert_eq!(err.to_string(), "Configuration error: unknown bucketing mode `week`");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised by the library.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// File system errors with the path that failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record table is structurally unusable
    #[error("Table error: {0}")]
    Table(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TimelineError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn table(message: impl Into<String>) -> Self {
        Self::Table(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias using the library error type
pub type Result<T> = std::result::Result<T, TimelineError>;

/// A problem with one record. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIssue {
    /// The timestamp field could not be parsed as a point in time
    #[error("record `{id}` has an unparseable timestamp `{value}`")]
    MalformedTimestamp { id: String, value: String },

    /// Both the ecosystem and the type field are empty
    #[error("row {line} has neither an ecosystem nor a type")]
    MissingOrigin { line: usize },
}

impl RecordIssue {
    /// Short machine-readable tag used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedTimestamp { .. } => "malformed_timestamp",
            Self::MissingOrigin { .. } => "missing_origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = TimelineError::io(
            "data/timeline.tsv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("data/timeline.tsv"));
        assert!(message.contains("missing"));
    }

    #[test]
    fn test_record_issue_kinds() {
        let malformed = RecordIssue::MalformedTimestamp {
            id: "a".into(),
            value: "b".into(),
        };
        assert_eq!(malformed.kind(), "malformed_timestamp");
        assert_eq!(RecordIssue::MissingOrigin { line: 3 }.kind(), "missing_origin");
        assert_eq!(
            RecordIssue::MissingOrigin { line: 3 }.to_string(),
            "row 3 has neither an ecosystem nor a type"
        );
    }
}
