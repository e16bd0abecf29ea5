//! Scan-out operation types.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Scan-out request payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutRequest {
    /// Identifier presented to clear the machine. Required.
    #[serde(default, alias = "rfid", skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<String>,
}

/// Scan-out response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutResponse {
    /// Phase after the scan-out (always Idle on success).
    pub phase: Phase,
}
