//! Stub server error types and utilities

use thiserror::Error;

/// Stub-server-specific error types
#[derive(Error, Debug)]
pub enum StubError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] hyper::http::Error),

    #[error("Connection error: {0}")]
    ConnectionError(#[from] hyper::Error),
}

impl StubError {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            StubError::ConfigurationError(_) => "STUB001",
            StubError::ServerError(_) => "STUB002",
            StubError::IoError(_) => "STUB003",
            StubError::SerializationError(_) => "STUB004",
            StubError::HttpError(_) => "STUB005",
            StubError::ConnectionError(_) => "STUB006",
        }
    }
}

/// Stub-server-specific result type
pub type Result<T> = std::result::Result<T, StubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StubError::ConfigurationError("test".to_string()).code(),
            "STUB001"
        );
        assert_eq!(StubError::ServerError("test".to_string()).code(), "STUB002");
        let io: StubError = std::io::Error::new(std::io::ErrorKind::Other, "io").into();
        assert_eq!(io.code(), "STUB003");
    }

    #[test]
    fn test_error_display() {
        let error = StubError::ConfigurationError("files argument must be a JSON array".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: files argument must be a JSON array"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let error: StubError = io.into();
        assert!(matches!(error, StubError::IoError(_)));
    }
}
