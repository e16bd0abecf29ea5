//! Start operation types.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Start request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    /// Requested cycle length in minutes. Must be positive.
    #[serde(alias = "expected")]
    pub expected_minutes: i64,
    /// Identifier (RFID) of whoever starts the cycle, if the device has read one.
    #[serde(default, alias = "rfid", skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<String>,
}

/// Start response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartResponse {
    /// Phase after the start was applied.
    pub phase: Phase,
}
