use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the resource loaders.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors raised while reading a resource file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: file not found or not readable", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: read failed", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {kind}", path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        kind: DecodeErrorKind,
    },

    #[error("{}: invalid JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// `true` for malformed content, as opposed to a missing or unreadable file.
    pub fn is_decode(&self) -> bool {
        matches!(self, LoadError::Decode { .. } | LoadError::Json { .. })
    }
}

/// What was wrong with a single line.
#[derive(Debug, Error)]
pub enum DecodeErrorKind {
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("'{field}' is not a base-10 integer")]
    InvalidInteger {
        field: String,
        #[source]
        source: ParseIntError,
    },

    #[error("missing '{0}' delimiter")]
    MissingDelimiter(char),

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// A required key or value is absent from a mapping handed to the chart or
/// the console reporter.
#[derive(Debug, Error, PartialEq)]
pub enum PreconditionError {
    #[error("split '{split}' not in results (available: {available:?})")]
    MissingSplit {
        split: String,
        available: Vec<String>,
    },

    #[error("metrics are missing '{0}'")]
    MissingKey(String),

    #[error("metrics field '{0}' is not a number")]
    NotANumber(String),

    #[error("metrics field '{0}' is not an object")]
    NotAnObject(String),

    #[error("unknown ESCI class id {0}")]
    UnknownClassId(String),
}
