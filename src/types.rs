/// Serializable envelope for errors written to stderr.
///
/// API responses themselves are passed through as `serde_json::Value`; only
/// the error shape is owned by this tool.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiError;
use crate::errors::TavilyError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (`snake_case`).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// How to fix it, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// HTTP status for API errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// JSON body returned by the API alongside an error status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorOutput {
    /// Construct from a `TavilyError`.
    #[must_use]
    pub fn from_error(err: &TavilyError) -> Self {
        let (status, details) = match err {
            TavilyError::Api(ApiError::Status { status, body, .. }) => {
                (Some(status.as_u16()), body.clone())
            }
            _ => (None, None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                hint: err.hint(),
                status,
                details,
            },
        }
    }
}
