//! Scan-out operation handler.
//!
//! Clears a terminal cycle and returns the machine to Idle, but only for the
//! identity that owns the cycle or holds its lock.

use washline_protocol::ops::{EventKind, ScanOutRequest, ScanOutResponse};
use washline_protocol::ApiError;

use super::normalize_id;
use crate::machine::Session;

/// Handle the scan-out operation.
pub fn handle(request: &ScanOutRequest, session: &mut Session<'_>) -> Result<ScanOutResponse, ApiError> {
    let requester = normalize_id(request.requester_id.as_deref())
        .ok_or_else(|| ApiError::invalid_argument("requesterId is required"))?;

    let phase = session.state.phase;
    if !phase.is_terminal() {
        return Err(ApiError::nothing_to_clear(phase));
    }

    if !session.state.may_scan_out(&requester) {
        tracing::warn!(
            requester = %requester,
            owner = ?session.state.owner,
            lock_holder = ?session.state.lock_holder,
            %phase,
            "scan-out denied"
        );
        session.record(EventKind::ScanOutDenied, requester.as_str());
        return Err(ApiError::unauthorized(&requester));
    }

    session.state.reset_to_idle();
    session.state.last_update = Some(session.now());
    tracing::info!(requester = %requester, cleared = %phase, "scan-out accepted");
    session.record(EventKind::ScanOutOk, requester);

    Ok(ScanOutResponse {
        phase: session.state.phase,
    })
}
