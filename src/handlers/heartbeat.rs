//! Heartbeat operation handler.
//!
//! The device calls this every few seconds. Every heartbeat refreshes the
//! staleness clock; it may also carry the device's own phase reading and a
//! late-bound owner identifier.

use washline_protocol::ops::{EventKind, HeartbeatRequest, HeartbeatResponse};
use washline_protocol::{ApiError, Phase, OWNER_CLEAR_SENTINEL};

use crate::machine::Session;

/// Handle the heartbeat operation.
pub fn handle(request: &HeartbeatRequest, session: &mut Session<'_>) -> Result<HeartbeatResponse, ApiError> {
    let reported_text = request
        .phase
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());
    let reported = reported_text
        .map(|text| {
            text.parse::<Phase>()
                .map_err(|e| ApiError::invalid_argument(e.to_string()))
        })
        .transpose()?;

    if let Some(reported) = reported {
        apply_reported_phase(session, reported);
    }
    if let Some(owner) = request.owner.as_deref() {
        apply_reported_owner(session, owner);
    }

    session.state.last_update = Some(session.now());
    session.record(EventKind::Heartbeat, reported_text.unwrap_or_default());

    Ok(HeartbeatResponse::new(
        session.state.phase,
        session.state.remaining_seconds(),
    ))
}

fn apply_reported_phase(session: &mut Session<'_>, reported: Phase) {
    let current = session.state.phase;
    match reported {
        // Idle has no countdown to resume; only start begins a cycle. Aborted
        // and Locked wait for a scan-out, so a late Running report cannot
        // skip the grace window or release the lock.
        Phase::Running if matches!(current, Phase::Idle | Phase::Aborted | Phase::Locked) => {
            tracing::debug!(current = %current, "running report ignored");
        }
        Phase::Running if current == Phase::Finished => {
            tracing::info!(from = %current, "device reports running; forcing Running");
            session.state.phase = Phase::Running;
            session.state.finished_at = None;
            session.state.aborted = false;
        }
        Phase::Running | Phase::Idle => {}
        // Syncs only ever tighten: a device that saw the drum stop early may
        // downgrade Finished to Aborted. Locked is the server's own escalation.
        Phase::Aborted if current == Phase::Finished => {
            tracing::info!(from = %current, "device reports aborted; syncing");
            session.state.phase = Phase::Aborted;
            session.state.aborted = true;
        }
        terminal => {
            tracing::debug!(current = %current, reported = %terminal, "reported phase ignored");
        }
    }
}

fn apply_reported_owner(session: &mut Session<'_>, owner: &str) {
    if session.state.phase == Phase::Idle {
        tracing::debug!("owner report ignored while idle");
        return;
    }
    let owner = owner.trim();
    let next = (owner != OWNER_CLEAR_SENTINEL).then(|| owner.to_string());
    if next != session.state.owner {
        tracing::info!(previous = ?session.state.owner, owner = ?next, "owner updated by heartbeat");
        session.state.owner = next;
    }
}
