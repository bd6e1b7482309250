//! Admin client errors

use thiserror::Error;

/// Result type for client calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Admin client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL lacks an http(s) scheme
    #[error("Invalid API URL: {0}")]
    InvalidBaseUrl(String),

    /// Health probe failed
    #[error("Cannot reach backend at {base_url}: {reason}")]
    Unreachable { base_url: String, reason: String },

    /// Connection, timeout or body read failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    /// Success body did not match the contract
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "404 Not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_unreachable_has_no_status() {
        let err = ClientError::Unreachable {
            base_url: "http://127.0.0.1:1".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("Cannot reach backend at"));
    }
}
