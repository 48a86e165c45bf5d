//! Backend call errors.

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach inventory backend at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    Http(String),
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response body: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Transport-level failures worth retrying on the next refresh tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
            || matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}

/// `{"error": "..."}` body the backend sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Best human-readable message from an error response body.
pub(crate) fn status_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_prefers_error_field() {
        assert_eq!(status_message(r#"{"error":"Item exists"}"#), "Item exists");
        assert_eq!(status_message(r#"{"message":"Bad branch"}"#), "Bad branch");
    }

    #[test]
    fn status_message_falls_back_to_body() {
        assert_eq!(status_message("Internal Server Error"), "Internal Server Error");
        assert_eq!(status_message(""), "no response body");
        assert_eq!(status_message(r#"{"error":""}"#), r#"{"error":""}"#);
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        assert_eq!(status_message(&body).len(), 200);
    }

    #[test]
    fn transient_classification() {
        assert!(ApiError::Connection("http://127.0.0.1:5000".into()).is_transient());
        assert!(ApiError::Timeout(15).is_transient());
        assert!(ApiError::Status {
            status: 503,
            message: String::new()
        }
        .is_transient());
        assert!(!ApiError::Status {
            status: 404,
            message: String::new()
        }
        .is_transient());
        assert!(!ApiError::Decode("x".into()).is_transient());
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::Status {
            status: 400,
            message: "Name required".into(),
        };
        assert_eq!(err.to_string(), "Backend returned 400: Name required");
    }
}
