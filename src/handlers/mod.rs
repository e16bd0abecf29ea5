//! Command handlers.
//!
//! Each operation has its own handler module. Handlers run inside a
//! [`Session`](crate::machine::Session) that has already been reconciled,
//! so they always decide against current state.

pub mod finish;
pub mod heartbeat;
pub mod log;
pub mod scan_out;
pub mod start;
pub mod status;

/// Treat an empty identifier the same as a missing one.
pub(crate) fn normalize_id(id: Option<&str>) -> Option<String> {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the handler tests.

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::machine::{reconcile, EventLog, MachineState, Session, TimingPolicy};
    use crate::notify::Notice;

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    pub fn at(secs: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(secs)
    }

    /// A machine plus its log, driven the same way `Laundry::run` drives it.
    pub struct Bench {
        pub state: MachineState,
        pub log: EventLog,
    }

    impl Bench {
        pub fn new() -> Self {
            Self {
                state: MachineState::new(),
                log: EventLog::default(),
            }
        }

        /// Reconcile at `now`, then run `op`.
        pub fn run<T>(&mut self, now: DateTime<Utc>, op: impl FnOnce(&mut Session<'_>) -> T) -> (T, Vec<Notice>) {
            let mut session = Session::new(&mut self.state, &mut self.log, now);
            reconcile(&mut session, &TimingPolicy::default());
            let result = op(&mut session);
            (result, session.into_notices())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(Some("card1")), Some("card1".to_string()));
        assert_eq!(normalize_id(Some("  ")), None);
        assert_eq!(normalize_id(Some("")), None);
        assert_eq!(normalize_id(None), None);
    }
}
