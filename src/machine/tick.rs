//! Reconciliation of machine state against wall-clock time
//!
//! Runs first on every request, read or write, under the same lock as the
//! command that follows it:
//! - heartbeat timeout: a Running machine silent for longer than
//!   `heartbeat_timeout` drops straight to Idle
//! - countdown: a Running machine loses the elapsed time and finishes at zero
//! - abort grace: an Aborted machine left unclaimed past `abort_grace` locks
//!
//! There is no background timer; staleness is discovered on the next call.

use chrono::Duration;
use washline_protocol::ops::EventKind;
use washline_protocol::Phase;

use super::Session;
use crate::config::MachineConfig;
use crate::notify::Notice;

/// Timing thresholds applied by [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPolicy {
    /// Longest gap between observations a Running machine tolerates
    pub heartbeat_timeout: Duration,

    /// How long an aborted cycle may wait for pickup before locking
    pub abort_grace: Duration,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            heartbeat_timeout: Duration::seconds(20),
            abort_grace: Duration::seconds(600),
        }
    }
}

impl From<&MachineConfig> for TimingPolicy {
    fn from(config: &MachineConfig) -> Self {
        Self {
            heartbeat_timeout: Duration::seconds(config.heartbeat_timeout_seconds as i64),
            abort_grace: Duration::seconds(config.abort_grace_seconds as i64),
        }
    }
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// First observation; the baseline was recorded
    Baseline,
    /// No time has passed since the last observation
    NoElapsed,
    /// Time passed without a phase change
    Advanced,
    /// Running machine went silent and was returned to Idle
    AutoIdle,
    /// Countdown reached zero
    CycleComplete,
    /// Aborted cycle outlived the grace window
    AutoLock,
}

/// Bring the session's state up to date with its `now`.
///
/// At most one transition fires per call, in priority order: heartbeat
/// timeout, countdown completion, abort escalation.
pub fn reconcile(session: &mut Session<'_>, policy: &TimingPolicy) -> TickOutcome {
    let now = session.now();

    let Some(last_update) = session.state.last_update else {
        session.state.last_update = Some(now);
        return TickOutcome::Baseline;
    };

    let delta = now - last_update;
    if delta <= Duration::zero() {
        return TickOutcome::NoElapsed;
    }

    let outcome = match session.state.phase {
        Phase::Running if delta > policy.heartbeat_timeout => {
            let owner = session.state.owner.clone();
            session.state.reset_to_idle();
            tracing::warn!(
                silent_seconds = delta.num_seconds(),
                owner = ?owner,
                "no heartbeat from running machine; returning to idle"
            );
            session.record(
                EventKind::AutoIdle,
                format!("no heartbeat for {}s", delta.num_seconds()),
            );
            TickOutcome::AutoIdle
        }
        Phase::Running => {
            if session.state.count_down(delta) {
                session.state.phase = Phase::Finished;
                session.state.aborted = false;
                session.state.finished_at = Some(now);
                tracing::info!(owner = ?session.state.owner, "cycle complete");
                session.record(EventKind::CycleComplete, "");
                session.notify(Notice::CycleComplete);
                TickOutcome::CycleComplete
            } else {
                TickOutcome::Advanced
            }
        }
        Phase::Aborted => match session.state.finished_at {
            Some(finished_at) if now - finished_at > policy.abort_grace => {
                session.state.phase = Phase::Locked;
                tracing::warn!(
                    owner = ?session.state.owner,
                    lock_holder = ?session.state.lock_holder,
                    "aborted cycle not cleared in time; locking machine"
                );
                session.record(
                    EventKind::AutoLock,
                    format!("unclaimed for {}s", (now - finished_at).num_seconds()),
                );
                session.notify(Notice::AutoLock);
                TickOutcome::AutoLock
            }
            _ => TickOutcome::Advanced,
        },
        Phase::Idle | Phase::Finished | Phase::Locked => TickOutcome::Advanced,
    };

    session.state.last_update = Some(now);
    outcome
}
