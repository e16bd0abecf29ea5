//! Response envelope for command endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ErrorCode};

/// Response envelope.
///
/// Serializes as `{"ok": true, ...payload}` on success and
/// `{"ok": false, "error": CODE, "message": "..."}` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Success payload, flattened into the envelope (present when ok=true).
    #[serde(flatten)]
    pub payload: Option<T>,
    /// Error code (present when ok=false).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    /// Error message (present when ok=false).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(payload: T) -> Self {
        Self {
            ok: true,
            payload: Some(payload),
            error: None,
            message: None,
        }
    }

    /// Create an error response.
    pub fn failure(error: ApiError) -> Self {
        Self {
            ok: false,
            payload: None,
            error: Some(error.code),
            message: Some(error.message),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(e),
        }
    }
}
