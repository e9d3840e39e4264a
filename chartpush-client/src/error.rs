//! Error types for the chartpush client

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the repository client
///
/// HTTP responses with an error status are not errors here; they are
/// returned to the caller untouched.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid base URL or unusable TLS material
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Local chart package could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Request could not be sent (DNS, connect, TLS handshake, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request target could not be derived from the configuration
    #[error("Invalid request target: {0}")]
    InvalidTarget(String),
}

/// Coarse classification of a [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Io,
    Transport,
}

impl ClientError {
    /// Create an I/O error for the given path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Io { .. } => ErrorKind::Io,
            Self::Transport(_) | Self::InvalidTarget(_) => ErrorKind::Transport,
        }
    }

    /// Check if the request gave up because the configured timeout elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = ClientError::io(
            "/tmp/missing.tgz",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/tmp/missing.tgz"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_invalid_target_is_transport_kind() {
        let err = ClientError::InvalidTarget("no repository".into());
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
