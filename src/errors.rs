/// Application-level errors surfaced to the user.
use thiserror::Error;

use crate::api::ApiError;

/// Where to get a key; shown whenever no key is configured.
pub const SIGNUP_URL: &str = "https://app.tavily.com";

/// Errors that terminate an invocation.
#[derive(Debug, Error)]
pub enum TavilyError {
    /// Neither `--api-key` nor `TAVILY_API_KEY` supplied a key.
    #[error("No API key provided.")]
    MissingApiKey,

    /// Transport or API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response could not be re-serialized for output.
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the rendered response failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl TavilyError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingApiKey | Self::Api(_) | Self::Serialize(_) | Self::Io(_) => 1,
        }
    }

    /// Machine-readable error code (`snake_case`).
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "missing_api_key",
            Self::Api(ApiError::Build(_)) => "request_build_failed",
            Self::Api(ApiError::Timeout { .. }) => "timeout",
            Self::Api(ApiError::Network { .. }) => "network_error",
            Self::Api(ApiError::Status { .. }) => "api_error",
            Self::Api(ApiError::Decode { .. }) => "malformed_response",
            Self::Serialize(_) => "serialize_error",
            Self::Io(_) => "io_error",
        }
    }

    /// Follow-up lines telling the user how to fix the problem, if any.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingApiKey => Some(format!(
                "Set TAVILY_API_KEY environment variable or use --api-key option.\n\
                 Get your free API key at: {SIGNUP_URL}"
            )),
            Self::Api(ApiError::Status { status, .. }) if status.as_u16() == 401 => Some(format!(
                "Check that your API key is valid. Manage keys at: {SIGNUP_URL}"
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_every_error_exits_one() {
        assert_eq!(TavilyError::MissingApiKey.exit_code(), 1);
        let api = TavilyError::from(ApiError::from_status(StatusCode::BAD_GATEWAY, ""));
        assert_eq!(api.exit_code(), 1);
        assert_eq!(api.code(), "api_error");
        let io = TavilyError::from(std::io::Error::other("disk full"));
        assert_eq!(io.exit_code(), 1);
        assert_eq!(io.code(), "io_error");
    }

    #[test]
    fn test_missing_key_message_and_hint() {
        let err = TavilyError::MissingApiKey;
        assert_eq!(err.to_string(), "No API key provided.");
        let hint = err.hint().unwrap_or_default();
        assert!(hint.contains("TAVILY_API_KEY"));
        assert!(hint.contains("--api-key"));
        assert!(hint.contains(SIGNUP_URL));
    }

    #[test]
    fn test_api_error_is_transparent() {
        let err = TavilyError::from(ApiError::Timeout {
            endpoint: "/usage".to_owned(),
            seconds: 10,
        });
        assert_eq!(err.to_string(), "request to /usage timed out after 10s");
        assert_eq!(err.code(), "timeout");
        assert!(err.hint().is_none());
    }
}
