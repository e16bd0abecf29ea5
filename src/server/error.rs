//! Mapping of request-level failures onto HTTP responses.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use washline_protocol::{ApiError, ApiResponse, ErrorCode};

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
        ErrorCode::Busy
        | ErrorCode::OwnerMustClear
        | ErrorCode::MustScanOut
        | ErrorCode::NothingToClear => StatusCode::CONFLICT,
    }
}

/// Envelope plus status code, ready to send.
pub struct Reply<T>(pub Result<T, ApiError>);

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Ok(_) => StatusCode::OK,
            Err(e) => status_for(e.code),
        };
        (status, Json(ApiResponse::from(self.0))).into_response()
    }
}

/// Decode a JSON body regardless of content type. An empty body reads as `{}`.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_argument(format!("invalid request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use washline_protocol::ops::{HeartbeatRequest, StartRequest};

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorCode::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::Busy), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::NothingToClear), StatusCode::CONFLICT);
    }

    #[test]
    fn test_empty_body_reads_as_empty_object() {
        let request: HeartbeatRequest = decode_body(&Bytes::from_static(b"  ")).unwrap();
        assert!(request.phase.is_none());
        assert!(request.owner.is_none());
    }

    #[test]
    fn test_missing_required_field_is_invalid() {
        let err = decode_body::<StartRequest>(&Bytes::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = decode_body::<StartRequest>(&Bytes::from_static(b"{\"expectedMinutes\": \"ten\"}")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_legacy_field_names() {
        let request: StartRequest = decode_body(&Bytes::from_static(b"{\"expected\": 30, \"rfid\": \"card1\"}")).unwrap();
        assert_eq!(request.expected_minutes, 30);
        assert_eq!(request.requester_id.as_deref(), Some("card1"));
    }
}
