//! Error types for schema resolution, extraction, and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during example extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The caller passed a null component. This is a programmer error, not a
    /// data error; extraction never produces a partial result for it.
    #[error("no schema received")]
    MissingSchema,

    #[error("schema cycle detected after {depth} levels")]
    SchemaCycle { depth: usize },
}

/// Errors during object-definition resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Formatter failure while stringifying an example, re-raised with the
    /// offending schema's serialized form so the failing node can be located.
    #[error("failed to format example for schema {schema}: {message}")]
    FormatFailed { schema: String, message: String },

    #[error("schema cycle detected: scope {scope:?} revisited")]
    ScopeCycle { scope: String },

    #[error("schema cycle detected after {depth} levels")]
    SchemaCycle { depth: usize },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Formatter failure with a human-readable message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(source: serde_json::Error) -> Self {
        Self {
            message: source.to_string(),
        }
    }
}

/// Errors while loading schema documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

impl ResolveError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
