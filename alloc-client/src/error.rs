//! Client error types

use shared::{ApiErrorBody, DomainError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, cancelled, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not the expected JSON shape
    #[error("Decoding error: {0}")]
    Decoding(#[from] serde_json::Error),

    /// Non-2xx response
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// Lookup matched nothing
    #[error("No results: {}", .message.as_deref().or(.title.as_deref()).unwrap_or("nothing found"))]
    NoResults {
        title: Option<String>,
        message: Option<String>,
        resolution: Option<String>,
    },

    /// Decoded payload is structurally invalid
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A newer refresh started before this one finished
    #[error("Refresh superseded by a newer request")]
    Superseded,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a non-2xx response to an error.
    ///
    /// 404, or a body titled "No Definitions Found", means an empty lookup.
    /// Anything else is a server error carrying the body's message or title.
    pub fn from_status(status: u16, body: Option<ApiErrorBody>) -> Self {
        match body {
            Some(body) if status == 404 || body.is_no_results() => Self::NoResults {
                title: body.title,
                message: body.message,
                resolution: body.resolution,
            },
            Some(body) => Self::Server {
                status,
                message: body.describe(),
            },
            None => Self::Server {
                status,
                message: None,
            },
        }
    }

    /// Text suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => {
                "The request timed out. Please try again later.".to_string()
            }
            Self::Network(e) if e.is_connect() => {
                "No internet connection. Please check your network and try again.".to_string()
            }
            Self::Network(_) => "A network error occurred. Please try again.".to_string(),
            Self::Server { message, .. } => message
                .clone()
                .unwrap_or_else(|| "A server error occurred. Please try again.".to_string()),
            Self::Decoding(_) => "There was a problem reading the server response.".to_string(),
            Self::InvalidResponse(_) => "Received an invalid response from the server.".to_string(),
            Self::NoResults { message, .. } => message
                .clone()
                .unwrap_or_else(|| "No matching records were found.".to_string()),
            Self::InvalidConfig(_) => "The client is misconfigured.".to_string(),
            Self::Superseded => "The request was cancelled.".to_string(),
        }
    }

    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(title: Option<&str>, message: Option<&str>) -> ApiErrorBody {
        ApiErrorBody {
            title: title.map(str::to_string),
            message: message.map(str::to_string),
            resolution: Some("Try again later".to_string()),
        }
    }

    #[test]
    fn test_not_found_maps_to_no_results() {
        let err = ClientError::from_status(404, Some(body(Some("Not Found"), Some("no such request"))));
        match err {
            ClientError::NoResults { message, resolution, .. } => {
                assert_eq!(message.as_deref(), Some("no such request"));
                assert_eq!(resolution.as_deref(), Some("Try again later"));
            }
            other => panic!("expected NoResults, got {other:?}"),
        }
    }

    #[test]
    fn test_no_definitions_title_maps_to_no_results() {
        let err = ClientError::from_status(400, Some(body(Some("NO DEFINITIONS FOUND"), None)));
        assert!(matches!(err, ClientError::NoResults { .. }));
        assert_eq!(err.user_message(), "No matching records were found.");
    }

    #[test]
    fn test_server_error_mapping() {
        let err = ClientError::from_status(500, Some(body(Some("Internal"), Some("db down"))));
        assert!(matches!(&err, ClientError::Server { status: 500, message: Some(m) } if m == "db down"));
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), "db down");

        let title_only = ClientError::from_status(422, Some(body(Some("Unprocessable"), None)));
        assert!(matches!(&title_only, ClientError::Server { message: Some(m), .. } if m == "Unprocessable"));
        assert!(!title_only.is_retryable());

        let bare = ClientError::from_status(404, None);
        assert!(matches!(bare, ClientError::Server { status: 404, message: None }));
        assert_eq!(bare.user_message(), "A server error occurred. Please try again.");
    }

    #[test]
    fn test_domain_error_becomes_invalid_response() {
        let err: ClientError = DomainError::missing_identifier("resource").into();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(!err.is_retryable());
        assert!(!ClientError::Superseded.is_retryable());
    }
}
