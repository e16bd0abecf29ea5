//! The single mutable record describing the appliance.

use chrono::{DateTime, Duration, Utc};
use washline_protocol::ops::state::format_mm_ss;
use washline_protocol::ops::{LegacyStatus, StateView};
use washline_protocol::Phase;

/// Authoritative appliance state.
///
/// The countdown is private: only cycle start, the tick engine's
/// [`MachineState::count_down`], a reported stop and a reset may touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineState {
    /// Current lifecycle phase
    pub phase: Phase,

    /// Identifier that started the current or most recent cycle
    pub owner: Option<String>,

    /// Identifier allowed to scan out; captured from `owner` at cycle start
    pub lock_holder: Option<String>,

    /// Requested cycle length
    pub expected_minutes: u32,

    /// Countdown in milliseconds, so frequent polls do not lose sub-second time
    remaining_ms: u64,

    /// Last instant the tick engine or a heartbeat applied
    pub last_update: Option<DateTime<Utc>>,

    /// When the cycle left Running
    pub finished_at: Option<DateTime<Utc>>,

    /// Whether the last termination came before the countdown ran out
    pub aborted: bool,
}

impl MachineState {
    /// A fresh, never-observed machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining time in whole seconds, rounded up.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }

    /// Begin a new cycle owned by `owner`.
    pub fn begin_cycle(&mut self, owner: Option<String>, expected_minutes: u32, now: DateTime<Utc>) {
        self.phase = Phase::Running;
        self.lock_holder = owner.clone();
        self.owner = owner;
        self.expected_minutes = expected_minutes;
        self.remaining_ms = u64::from(expected_minutes) * 60 * 1000;
        self.finished_at = None;
        self.aborted = false;
        self.last_update = Some(now);
    }

    /// Subtract elapsed time from the countdown. Returns true only on the call
    /// that takes it from above zero to zero.
    pub(crate) fn count_down(&mut self, elapsed: Duration) -> bool {
        if self.remaining_ms == 0 {
            return false;
        }
        let elapsed_ms = u64::try_from(elapsed.num_milliseconds()).unwrap_or(0);
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }

    /// Record a physical stop. Returns true if time was still left (an abort).
    pub(crate) fn stop(&mut self, now: DateTime<Utc>) -> bool {
        let aborted = self.remaining_ms > 0;
        self.remaining_ms = 0;
        self.finished_at = Some(now);
        self.last_update = Some(now);
        self.aborted = aborted;
        aborted
    }

    /// Clear every cycle field and return to Idle. `last_update` is left to the caller.
    pub fn reset_to_idle(&mut self) {
        self.phase = Phase::Idle;
        self.owner = None;
        self.lock_holder = None;
        self.expected_minutes = 0;
        self.remaining_ms = 0;
        self.finished_at = None;
        self.aborted = false;
    }

    /// Check if `id` may clear the current terminal phase.
    pub fn may_scan_out(&self, id: &str) -> bool {
        self.owner.as_deref() == Some(id) || self.lock_holder.as_deref() == Some(id)
    }

    /// First violated state invariant, if any.
    pub fn invariant_violation(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Idle => {
                if self.owner.is_some() || self.lock_holder.is_some() {
                    return Some("idle machine still has an owner");
                }
                if self.expected_minutes != 0 || self.remaining_ms != 0 {
                    return Some("idle machine still has cycle time");
                }
                if self.finished_at.is_some() {
                    return Some("idle machine still has a finish time");
                }
            }
            Phase::Running => {
                if self.finished_at.is_some() {
                    return Some("running machine has a finish time");
                }
            }
            Phase::Finished | Phase::Aborted | Phase::Locked => {
                if self.remaining_ms != 0 {
                    return Some("terminal machine still has time left");
                }
                if self.finished_at.is_none() {
                    return Some("terminal machine has no finish time");
                }
            }
        }
        None
    }

    /// The view served to callers.
    pub fn view(&self) -> StateView {
        let remaining_seconds = self.remaining_seconds();
        StateView {
            phase: self.phase,
            remaining_seconds,
            owner: self.owner.clone(),
            lock_holder: self.lock_holder.clone(),
            expected_minutes: self.expected_minutes,
            aborted: self.aborted,
            finished_at: self.finished_at,
            time: format_mm_ss(remaining_seconds),
            legacy: LegacyStatus::new(self.phase, remaining_seconds),
        }
    }
}
