//! Report-stop ("finish") operation handler.
//!
//! Called by the device when the drum stops moving or its program ends.

use washline_protocol::ops::{EventKind, FinishResponse};
use washline_protocol::{ApiError, Phase};

use crate::machine::Session;
use crate::notify::Notice;

/// Handle the finish operation.
pub fn handle(session: &mut Session<'_>) -> Result<FinishResponse, ApiError> {
    let now = session.now();

    match session.state.phase {
        Phase::Running => {
            let left_seconds = session.state.remaining_seconds();
            let aborted = session.state.stop(now);
            if aborted {
                session.state.phase = Phase::Aborted;
                tracing::warn!(owner = ?session.state.owner, left_seconds, "cycle aborted");
                session.record(EventKind::FinishAborted, "");
                session.notify(Notice::FinishAborted);
            } else {
                session.state.phase = Phase::Finished;
                tracing::info!(owner = ?session.state.owner, "cycle finished");
                session.record(EventKind::FinishComplete, "");
                session.notify(Notice::FinishComplete);
            }
        }
        Phase::Finished | Phase::Aborted | Phase::Locked => {
            // Repeat stop signal: restart the grace window, keep the verdict.
            session.state.finished_at = Some(now);
            session.state.last_update = Some(now);
            let phase = session.state.phase;
            tracing::debug!(%phase, "repeated stop signal");
            session.record(EventKind::FinishRepeat, phase.as_str());
        }
        Phase::Idle => {
            tracing::debug!("stop reported with no cycle outstanding");
            session.record(EventKind::FinishIgnored, "no cycle");
        }
    }

    Ok(FinishResponse {
        phase: session.state.phase,
        aborted: session.state.aborted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{at, t0, Bench};

    fn running(minutes: u32) -> Bench {
        let mut bench = Bench::new();
        bench.state.begin_cycle(Some("card1".to_string()), minutes, t0());
        bench
    }

    #[test]
    fn test_early_stop_is_an_abort() {
        let mut bench = running(10);
        let (result, notices) = bench.run(at(5), handle);
        let response = result.unwrap();

        assert_eq!(response.phase, Phase::Aborted);
        assert!(response.aborted);
        assert_eq!(bench.state.remaining_seconds(), 0);
        assert_eq!(bench.state.finished_at, Some(at(5)));
        assert_eq!(notices, vec![Notice::FinishAborted]);
        assert_eq!(bench.log.latest().unwrap().event, EventKind::FinishAborted);
    }

    #[test]
    fn test_stop_with_no_time_left_is_complete() {
        let mut bench = running(1);
        bench.state.stop(t0());
        bench.state.phase = Phase::Running;
        bench.state.finished_at = None;

        let (result, notices) = bench.run(t0(), handle);
        let response = result.unwrap();
        assert_eq!(response.phase, Phase::Finished);
        assert!(!response.aborted);
        assert_eq!(notices, vec![Notice::FinishComplete]);
        assert_eq!(bench.log.latest().unwrap().event, EventKind::FinishComplete);
    }

    #[test]
    fn test_stop_after_countdown_expired_is_a_repeat() {
        let mut bench = running(1);
        // Ticks every 15s keep the machine within the heartbeat window.
        for s in [15, 30, 45] {
            bench.run(at(s), |_| ());
        }
        let (result, notices) = bench.run(at(60), handle);
        let response = result.unwrap();

        // The tick at 60s already completed the cycle.
        assert_eq!(response.phase, Phase::Finished);
        assert!(!response.aborted);
        assert_eq!(notices, vec![Notice::CycleComplete]);
        assert_eq!(bench.log.latest().unwrap().event, EventKind::FinishRepeat);
    }

    #[test]
    fn test_stop_with_half_second_left_is_an_abort() {
        let mut bench = running(1);
        for s in [15, 30, 45] {
            bench.run(at(s), |_| ());
        }
        // Half a second left when the stop arrives: still counts as an abort.
        let (result, _) = bench.run(at(45) + chrono::Duration::milliseconds(14_500), handle);
        assert_eq!(result.unwrap().phase, Phase::Aborted);
    }

    #[test]
    fn test_repeat_stop_restamps_without_notifying() {
        let mut bench = running(10);
        bench.run(at(5), handle).0.unwrap();

        let (result, notices) = bench.run(at(300), handle);
        let response = result.unwrap();
        assert_eq!(response.phase, Phase::Aborted);
        assert!(response.aborted);
        assert_eq!(bench.state.finished_at, Some(at(300)));
        assert!(notices.is_empty());
        assert_eq!(bench.log.latest().unwrap().event, EventKind::FinishRepeat);
    }

    #[test]
    fn test_repeat_stop_keeps_lock() {
        let mut bench = running(10);
        bench.run(at(5), handle).0.unwrap();
        bench.run(at(5 + 601), |_| ());
        assert_eq!(bench.state.phase, Phase::Locked);

        let (result, _) = bench.run(at(700), handle);
        assert_eq!(result.unwrap().phase, Phase::Locked);
    }

    #[test]
    fn test_stop_while_idle_changes_nothing() {
        let mut bench = Bench::new();
        bench.run(t0(), |_| ());
        let before = bench.state.clone();

        let (result, notices) = bench.run(at(1), handle);
        let response = result.unwrap();
        assert_eq!(response.phase, Phase::Idle);
        assert!(!response.aborted);
        assert!(notices.is_empty());
        assert_eq!(bench.state.owner, before.owner);
        assert_eq!(bench.log.latest().unwrap().event, EventKind::FinishIgnored);
    }
}
