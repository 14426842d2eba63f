/// Errors from the HTTP/API layer.
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Longest raw body excerpt carried in a status error message.
const BODY_SNIPPET_CHARS: usize = 300;

/// Typed errors from talking to the Tavily API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client or request could not be constructed.
    #[error("failed to build request: {0}")]
    Build(String),

    /// No response within the allotted time.
    #[error("request to {endpoint} timed out after {seconds}s")]
    Timeout {
        /// Endpoint path, e.g. `/search`.
        endpoint: String,
        /// Timeout that elapsed.
        seconds: u64,
    },

    /// Connection, TLS, or other transport failure.
    #[error("network error calling {endpoint}: {message}")]
    Network {
        /// Endpoint path.
        endpoint: String,
        /// Transport error text.
        message: String,
    },

    /// The API answered with a non-2xx status.
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// Best-effort human-readable message extracted from the body.
        message: String,
        /// Parsed JSON body, if the body was JSON.
        body: Option<Value>,
    },

    /// The body of a 2xx response was not valid JSON.
    #[error("malformed JSON response from {endpoint}: {message}")]
    Decode {
        /// Endpoint path.
        endpoint: String,
        /// Parser error text.
        message: String,
    },
}

impl ApiError {
    /// Map a `reqwest` transport error for `endpoint`.
    pub(crate) fn from_transport(err: &reqwest::Error, endpoint: &str, seconds: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                endpoint: endpoint.to_owned(),
                seconds,
            }
        } else if err.is_builder() {
            Self::Build(err.to_string())
        } else {
            Self::Network {
                endpoint: endpoint.to_owned(),
                message: err.to_string(),
            }
        }
    }

    /// Build a `Status` error from a non-2xx response body.
    ///
    /// The message prefers `detail.error`, then a string `detail`, then a
    /// top-level `error`; otherwise a snippet of the raw body.
    pub(crate) fn from_status(status: StatusCode, raw: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(raw).ok();
        let message = body
            .as_ref()
            .and_then(detail_message)
            .unwrap_or_else(|| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("no response body")
                        .to_owned()
                } else {
                    snippet(trimmed)
                }
            });
        Self::Status {
            status,
            message,
            body,
        }
    }
}

fn detail_message(body: &Value) -> Option<String> {
    let detail = body.get("detail");
    detail
        .and_then(|d| d.get("error"))
        .and_then(Value::as_str)
        .or_else(|| detail.and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::to_owned)
}

fn snippet(raw: &str) -> String {
    match raw.char_indices().nth(BODY_SNIPPET_CHARS) {
        Some((idx, _)) => format!("{}…", &raw[..idx]),
        None => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_nested_detail_error() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":{"error":"Unauthorized: missing or invalid API key."}}"#,
        );
        match err {
            ApiError::Status {
                status,
                message,
                body,
            } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Unauthorized: missing or invalid API key.");
                assert!(body.is_some());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_status_string_detail_and_error_field() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail":"bad query"}"#);
        assert_eq!(err.to_string(), "API returned 400 Bad Request: bad query");

        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error":"nope"}"#);
        assert!(err.to_string().ends_with(": nope"));
    }

    #[test]
    fn test_status_plain_text_body() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down\n");
        match err {
            ApiError::Status { message, body, .. } => {
                assert_eq!(message, "upstream down");
                assert!(body.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_status_empty_body_uses_reason() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(err.to_string().contains("Too Many Requests"));
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(BODY_SNIPPET_CHARS + 50);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), BODY_SNIPPET_CHARS + 1);
        assert!(s.ends_with('…'));
    }
}
