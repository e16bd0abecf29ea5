//! Start operation handler.
//!
//! Begins a cycle on an idle machine, or lets a different identity take over
//! a finished one.

use washline_protocol::ops::{EventKind, StartRequest, StartResponse};
use washline_protocol::{ApiError, Phase};

use super::normalize_id;
use crate::machine::Session;

/// Longest cycle accepted, in minutes.
const MAX_EXPECTED_MINUTES: i64 = 24 * 60;

/// Handle the start operation.
pub fn handle(request: &StartRequest, session: &mut Session<'_>) -> Result<StartResponse, ApiError> {
    let expected_minutes = validate_minutes(request.expected_minutes)?;
    let requester = normalize_id(request.requester_id.as_deref());

    let event = match session.state.phase {
        Phase::Idle => EventKind::Start,
        Phase::Finished => {
            // An unowned finished cycle can only be cleared, never taken over.
            if session.state.owner.is_none() || requester == session.state.owner {
                return Err(ApiError::owner_must_clear());
            }
            EventKind::OverrideStart
        }
        phase @ (Phase::Aborted | Phase::Locked) => return Err(ApiError::must_scan_out(phase)),
        Phase::Running => return Err(ApiError::busy()),
    };

    let previous_owner = session.state.owner.take();
    session
        .state
        .begin_cycle(requester.clone(), expected_minutes, session.now());

    tracing::info!(
        owner = ?requester,
        expected_minutes,
        previous_owner = ?previous_owner,
        override_start = event == EventKind::OverrideStart,
        "cycle started"
    );
    session.record(event, requester.unwrap_or_default());

    Ok(StartResponse {
        phase: session.state.phase,
    })
}

fn validate_minutes(value: i64) -> Result<u32, ApiError> {
    if value <= 0 {
        return Err(ApiError::invalid_argument(format!(
            "expectedMinutes must be > 0, got {}",
            value
        )));
    }
    if value > MAX_EXPECTED_MINUTES {
        return Err(ApiError::invalid_argument(format!(
            "expectedMinutes must be <= {}, got {}",
            MAX_EXPECTED_MINUTES, value
        )));
    }
    Ok(value as u32)
}
