//! Error types for the Tunebox server client.

use thiserror::Error;
use tunebox_core::TuneboxError;

/// Errors that can occur when talking to a Tunebox server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available, or the token was rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Authenticated, but not allowed to do this (admin-only endpoints)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Rate limited by server
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

impl ServerClientError {
    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServerError { status: 404, .. })
    }
}

impl From<ServerClientError> for TuneboxError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::AuthRequired => {
                TuneboxError::permission_denied("authentication required")
            }
            ServerClientError::Forbidden(msg) => TuneboxError::permission_denied(msg),
            ServerClientError::InvalidUrl(msg) => TuneboxError::invalid_input(msg),
            ServerClientError::FileNotFound(path) => TuneboxError::not_found("File", path),
            ServerClientError::Io(e) => TuneboxError::Io(e),
            ServerClientError::ParseError(msg) => TuneboxError::Other(msg),
            other @ (ServerClientError::Request(_)
            | ServerClientError::ServerError { .. }
            | ServerClientError::ServerUnreachable(_)
            | ServerClientError::RateLimited { .. }) => TuneboxError::Network(other.to_string()),
        }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_become_permission_denied() {
        let err: TuneboxError = ServerClientError::AuthRequired.into();
        assert!(matches!(err, TuneboxError::PermissionDenied(_)));

        let err: TuneboxError = ServerClientError::Forbidden("admins only".into()).into();
        assert_eq!(err.to_string(), "Permission denied: admins only");
    }

    #[test]
    fn server_errors_become_network_errors() {
        let err: TuneboxError = ServerClientError::ServerError {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Network error: Server error (500): boom");
    }

    #[test]
    fn missing_upload_is_not_found() {
        let err: TuneboxError = ServerClientError::FileNotFound("/tmp/x.mp3".into()).into();
        assert!(err.is_not_found());
    }
}
