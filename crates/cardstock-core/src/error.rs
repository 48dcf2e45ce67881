//! Error types for the cardstock pipeline.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! Data-shape problems (malformed headers, unmatched node shapes) are
//! never errors: those degrade in place. `Error` covers I/O, configuration,
//! and remote-contract failures only.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all cardstock operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A named source is missing from its collection
    #[error("Source not found in collection '{collection}': {name}")]
    SourceNotFound { collection: String, name: String },

    /// Collection content root is missing or unusable
    #[error("Invalid content root: {path}")]
    InvalidContentRoot { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Remote like service returned a non-success status
    #[error("Remote service returned status {status}")]
    RemoteStatus { status: u16 },

    /// Remote like service transport or contract failure
    #[error("Remote service error: {reason}")]
    Remote { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a source not found error
    pub fn source_not_found(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Error::SourceNotFound {
            collection: collection.into(),
            name: name.into(),
        }
    }

    /// Create an invalid content root error
    pub fn invalid_content_root(path: impl Into<PathBuf>) -> Self {
        Error::InvalidContentRoot { path: path.into() }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a remote status error
    pub fn remote_status(status: u16) -> Self {
        Error::RemoteStatus { status }
    }

    /// Create a remote transport/contract error
    pub fn remote(reason: impl Into<String>) -> Self {
        Error::Remote {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::source_not_found("posts", "missing-entry");
        assert!(err.to_string().contains("Source not found"));

        let err = Error::remote_status(503);
        assert!(err.to_string().contains("503"));
    }
}
