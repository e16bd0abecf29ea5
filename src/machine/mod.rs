//! Machine context
//!
//! One [`Laundry`] exists per server process. It owns the machine state and
//! the event log behind a single mutex; every request locks it once, runs the
//! tick engine, applies its command, and releases it before any notification
//! leaves the process.

mod event_log;
mod state;
pub mod tick;

pub use event_log::{EventLog, DEFAULT_CAPACITY};
pub use state::MachineState;
pub use tick::{reconcile, TickOutcome, TimingPolicy};

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use washline_protocol::ops::{
    EventKind, EventLogEntry, FinishResponse, HeartbeatRequest, HeartbeatResponse,
    ScanOutRequest, ScanOutResponse, StartRequest, StartResponse, StateView,
};
use washline_protocol::ApiError;

use crate::clock::Clock;
use crate::config::MachineConfig;
use crate::handlers;
use crate::notify::{Notice, Notifier};

/// Exclusive view of the machine for the duration of one request.
pub struct Session<'a> {
    /// The machine record
    pub state: &'a mut MachineState,
    log: &'a mut EventLog,
    now: DateTime<Utc>,
    notices: Vec<Notice>,
}

impl<'a> Session<'a> {
    /// Open a session at `now`.
    pub fn new(state: &'a mut MachineState, log: &'a mut EventLog, now: DateTime<Utc>) -> Self {
        Self {
            state,
            log,
            now,
            notices: Vec::new(),
        }
    }

    /// The single instant this request is evaluated at.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Append an audit entry stamped with the current phase and owner.
    pub fn record(&mut self, event: EventKind, info: impl Into<String>) {
        let owner = self.state.owner.clone();
        self.log.record(self.now, event, self.state.phase, owner, info);
    }

    /// Queue a notification for delivery once the lock is released.
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Read-only access to the log.
    pub fn log(&self) -> &EventLog {
        &*self.log
    }

    /// Notifications queued so far.
    pub fn into_notices(self) -> Vec<Notice> {
        self.notices
    }
}

struct Inner {
    state: MachineState,
    log: EventLog,
}

/// The process-wide machine context shared by every request handler.
pub struct Laundry {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    policy: TimingPolicy,
}

impl Laundry {
    /// Create a context with an idle, never-observed machine.
    pub fn new(config: &MachineConfig, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: MachineState::new(),
                log: EventLog::new(config.max_log_entries),
            }),
            clock,
            notifier,
            policy: TimingPolicy::from(config),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // State is only ever mutated in whole steps, so a panicked holder leaves it usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `op` as one atomic tick-then-act unit.
    ///
    /// Notices raised by either the tick or the command are delivered after the
    /// lock is released, even when the command itself fails.
    pub fn run<T>(&self, op: impl FnOnce(&mut Session<'_>) -> T) -> T {
        let now = self.clock.now();
        let (result, notices) = {
            let mut guard = self.lock();
            let Inner { state, log } = &mut *guard;
            let mut session = Session::new(state, log, now);
            reconcile(&mut session, &self.policy);
            let result = op(&mut session);
            (result, session.into_notices())
        };

        for notice in notices {
            tracing::debug!(?notice, "dispatching notification");
            self.notifier.notify(notice.message());
        }
        result
    }

    /// Reconciled state.
    pub fn state(&self) -> StateView {
        self.run(|session| handlers::status::handle(session))
    }

    /// Reconciled event log, most recent first.
    pub fn log(&self) -> Vec<EventLogEntry> {
        self.run(|session| handlers::log::handle(session))
    }

    pub fn start(&self, request: &StartRequest) -> Result<StartResponse, ApiError> {
        self.run(|session| handlers::start::handle(request, session))
    }

    pub fn finish(&self) -> Result<FinishResponse, ApiError> {
        self.run(|session| handlers::finish::handle(session))
    }

    pub fn scan_out(&self, request: &ScanOutRequest) -> Result<ScanOutResponse, ApiError> {
        self.run(|session| handlers::scan_out::handle(request, session))
    }

    pub fn heartbeat(&self, request: &HeartbeatRequest) -> Result<HeartbeatResponse, ApiError> {
        self.run(|session| handlers::heartbeat::handle(request, session))
    }

    /// Raw state without reconciling; for diagnostics and tests.
    pub fn snapshot(&self) -> MachineState {
        self.lock().state.clone()
    }
}
