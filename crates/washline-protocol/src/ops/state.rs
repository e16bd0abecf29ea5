//! State read types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Reconciled machine state as shown to the UI and the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub owner: Option<String>,
    pub lock_holder: Option<String>,
    pub expected_minutes: u32,
    pub aborted: bool,
    pub finished_at: Option<DateTime<Utc>>,
    /// Remaining time formatted `MM:SS` for display.
    pub time: String,
    #[serde(flatten)]
    pub legacy: LegacyStatus,
}

/// Field names older device firmware reads for drift correction.
///
/// Mirrors `phase` and `remainingSeconds`; serialized alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyStatus {
    pub state: Phase,
    pub remaining_s: u64,
}

impl LegacyStatus {
    pub fn new(phase: Phase, remaining_seconds: u64) -> Self {
        Self {
            state: phase,
            remaining_s: remaining_seconds,
        }
    }
}

/// Format a second count as zero-padded `MM:SS`.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
