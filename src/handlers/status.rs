//! State read handler.

use washline_protocol::ops::StateView;

use crate::machine::Session;

/// Reconciled state as served to the UI and the device.
pub fn handle(session: &mut Session<'_>) -> StateView {
    session.state.view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{at, t0, Bench};
    use washline_protocol::Phase;

    #[test]
    fn test_fresh_machine_reads_idle() {
        let mut bench = Bench::new();
        let (view, _) = bench.run(t0(), handle);

        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.remaining_seconds, 0);
        assert_eq!(view.time, "00:00");
        assert!(view.owner.is_none());
        // The first read only records the baseline.
        assert_eq!(bench.state.last_update, Some(t0()));
    }

    #[test]
    fn test_read_reflects_countdown() {
        let mut bench = Bench::new();
        bench.state.begin_cycle(Some("card1".to_string()), 30, t0());

        let (view, _) = bench.run(at(10), handle);
        assert_eq!(view.phase, Phase::Running);
        assert_eq!(view.remaining_seconds, 1790);
        assert_eq!(view.time, "29:50");
        assert_eq!(view.owner.as_deref(), Some("card1"));
        assert_eq!(view.expected_minutes, 30);
    }

    #[test]
    fn test_repeated_reads_at_same_instant_agree() {
        let mut bench = Bench::new();
        bench.state.begin_cycle(None, 30, t0());

        let (first, _) = bench.run(at(10), handle);
        let (second, _) = bench.run(at(10), handle);
        assert_eq!(first, second);
    }
}
