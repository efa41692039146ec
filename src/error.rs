//! Error types for mailscrub library.

use std::io;
use thiserror::Error;

/// Result type alias for mailscrub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mailscrub library.
///
/// Cleaning a document never fails; every variant here is raised either while
/// building a [`ContentCleaner`](crate::ContentCleaner) or by the file and
/// serialization helpers around it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configured pattern failed to compile.
    #[error("Invalid pattern in {set}: {pattern:?}: {source}")]
    InvalidPattern {
        /// Name of the pattern set the pattern belongs to.
        set: &'static str,
        /// The offending pattern source.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: regex::Error,
    },

    /// A threshold or limit is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
