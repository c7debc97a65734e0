//! Typed errors for the remote endpoints
//!
//! The taxonomy distinguishes transport failures from application-level
//! failures (non-OK status or a missing expected field). Nothing here is
//! retried and nothing is fatal to the session: a failed exchange only
//! produces a displayed message (chat) or leaves state unchanged (auth).

use thiserror::Error;

/// Failure of a single request/response exchange
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-OK HTTP status; carries the server-provided error text if the
    /// body had an `{ "error": ... }` field, otherwise the raw body.
    #[error("endpoint error ({status}): {message}")]
    Endpoint { status: u16, message: String },

    /// HTTP OK but the body did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Connection refused, timeout, DNS failure and friends
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Convert a non-success HTTP status and body into a typed error,
    /// extracting the `error` field when the body is a JSON error object.
    pub fn from_http_status(status: reqwest::StatusCode, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Endpoint {
            status: status.as_u16(),
            message,
        }
    }

    /// Convert transport-level reqwest errors into typed errors
    pub fn from_network(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Network(format!("request timeout: {}", e))
        } else if e.is_connect() {
            ApiError::Network(format!("connection failed: {}", e))
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, &e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }

    /// Whether this failure never reached the server
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// Server-provided error text, if there was any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Endpoint { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field_from_json_body() {
        let err = ApiError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "GigaChat API error: quota"}"#,
        );
        match err {
            ApiError::Endpoint { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "GigaChat API error: quota");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = ApiError::from_http_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.server_message(), Some("upstream down"));
        assert!(!err.is_transport());
    }

    #[test]
    fn network_errors_have_no_server_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.is_transport());
        assert_eq!(err.server_message(), None);
    }
}
