//! Error types.

use thiserror::Error;

/// Problems found while reading configuration values.
///
/// `NotNumeric` and `OutOfRange` are reported and then repaired (default or
/// clamp); only file-level problems are returned to callers.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field value could not be read as a number.
    #[error("{field}: expected a number")]
    NotNumeric { field: &'static str },

    /// Field value lies outside its accepted range.
    #[error("{field}: {value} outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Document root is not a JSON object.
    #[error("expected a JSON object")]
    NotAnObject,

    /// File could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drawing surface failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// Neither the native canvas nor the element tree is available.
    #[error("no drawing surface available")]
    BackendUnavailable,
}
