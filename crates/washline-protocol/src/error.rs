//! Error types for the washline API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::phase::Phase;

/// Error codes returned in failed responses.
///
/// These codes are stable and used by the device firmware for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed JSON, missing required fields, or invalid field values.
    InvalidArgument,
    /// A cycle is already running.
    Busy,
    /// The identity that left the machine finished must scan out before reusing it.
    OwnerMustClear,
    /// An aborted or locked cycle must be scanned out first.
    MustScanOut,
    /// Scan-out requested while no terminal cycle is outstanding.
    NothingToClear,
    /// Identifier is neither the owner nor the lock holder.
    Unauthorized,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::Busy => write!(f, "BUSY"),
            Self::OwnerMustClear => write!(f, "OWNER_MUST_CLEAR"),
            Self::MustScanOut => write!(f, "MUST_SCAN_OUT"),
            Self::NothingToClear => write!(f, "NOTHING_TO_CLEAR"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
        }
    }
}

/// A request-level failure.
///
/// Never fatal to the server; always reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code from the registry.
    pub code: ErrorCode,
    /// Human-readable, single-line error message.
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an INVALID_ARGUMENT error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    /// Create a BUSY error.
    pub fn busy() -> Self {
        Self::new(ErrorCode::Busy, "a cycle is already running")
    }

    /// Create an OWNER_MUST_CLEAR error.
    pub fn owner_must_clear() -> Self {
        Self::new(
            ErrorCode::OwnerMustClear,
            "owner must scan out before starting again",
        )
    }

    /// Create a MUST_SCAN_OUT error.
    pub fn must_scan_out(phase: Phase) -> Self {
        Self::new(
            ErrorCode::MustScanOut,
            format!("machine is {}, scan out first", phase),
        )
    }

    /// Create a NOTHING_TO_CLEAR error.
    pub fn nothing_to_clear(phase: Phase) -> Self {
        Self::new(
            ErrorCode::NothingToClear,
            format!("nothing to clear while machine is {}", phase),
        )
    }

    /// Create an UNAUTHORIZED error.
    pub fn unauthorized(requester_id: &str) -> Self {
        Self::new(
            ErrorCode::Unauthorized,
            format!("'{}' may not clear this cycle", requester_id),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
