//! Heartbeat operation types.

use serde::{Deserialize, Serialize};

use super::state::LegacyStatus;
use crate::phase::Phase;

/// Heartbeat request payload.
///
/// Both fields are optional; an empty body is a bare liveness signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    /// The device's own view of the phase, as free text.
    #[serde(default, alias = "state", skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Late-bound identifier. An empty string clears the owner.
    #[serde(default, alias = "rfid", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Heartbeat response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatResponse {
    /// Authoritative phase.
    pub phase: Phase,
    /// Authoritative remaining time, so the device can correct drift.
    pub remaining_seconds: u64,
    #[serde(flatten)]
    pub legacy: LegacyStatus,
}

impl HeartbeatResponse {
    pub fn new(phase: Phase, remaining_seconds: u64) -> Self {
        Self {
            phase,
            remaining_seconds,
            legacy: LegacyStatus::new(phase, remaining_seconds),
        }
    }
}
