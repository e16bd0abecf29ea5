//! Event log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Kind of audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Start,
    OverrideStart,
    AutoIdle,
    CycleComplete,
    AutoLock,
    FinishAborted,
    FinishComplete,
    FinishRepeat,
    FinishIgnored,
    ScanOutOk,
    ScanOutDenied,
    Heartbeat,
}

/// One immutable audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Monotonic sequence number within this server process.
    pub seq: u64,
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    pub event: EventKind,
    /// Phase right after the event was applied.
    pub phase: Phase,
    /// Owner right after the event was applied.
    pub owner: Option<String>,
    pub info: String,
}
