//! Error types for the rucaptcha-solver library.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for the rucaptcha-solver library.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Missing or invalid client configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The image could not be read from its source
    #[error("Failed to fetch image: {0}")]
    ImageFetch(#[from] ImageFetchError),

    /// The service rejected the submitted image
    #[error("Captcha submission rejected: {message}")]
    Submission { message: String },

    /// The service reported a terminal failure while polling
    #[error("Captcha solving failed: {message}")]
    Poll { message: String },

    /// Network or HTTP-layer failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// No answer arrived within the configured poll timeout
    #[error("Timed out after {elapsed:?} waiting for captcha answer")]
    Timeout { elapsed: Duration },

    /// The operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Invalid response from server
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of the HTTP layer underneath a [`Transport`](crate::transport::Transport).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Error raised by the bundled rquest client, including non-2xx statuses
    #[error(transparent)]
    Http(#[from] rquest::Error),

    /// Error raised by a caller-provided transport
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wrap any error produced by a custom transport implementation.
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TransportError::Custom(err.into())
    }
}

/// Why an image could not be turned into bytes.
#[derive(Error, Debug)]
pub enum ImageFetchError {
    /// Local file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote image could not be downloaded
    #[error("cannot download {url}: {source}")]
    Remote {
        url: String,
        #[source]
        source: TransportError,
    },

    /// Text looked like base64 but did not decode
    #[error("invalid base64 image: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type alias for rucaptcha-solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_service_text() {
        let err = SolverError::Poll {
            message: "ERROR_CAPTCHA_UNSOLVABLE".into(),
        };
        assert!(err.to_string().contains("ERROR_CAPTCHA_UNSOLVABLE"));

        let err = SolverError::Submission {
            message: "ERROR_ZERO_BALANCE".into(),
        };
        assert!(err.to_string().contains("ERROR_ZERO_BALANCE"));
    }

    #[test]
    fn test_image_fetch_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SolverError = ImageFetchError::Io {
            path: PathBuf::from("/tmp/missing.png"),
            source: io,
        }
        .into();

        let source = std::error::Error::source(&err)
            .and_then(|e| e.source())
            .and_then(|e| e.downcast_ref::<std::io::Error>())
            .expect("io error in chain");
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    }
}
