//! Event log read handler.

use washline_protocol::ops::EventLogEntry;

use crate::machine::Session;

/// Retained log entries, most recent first.
pub fn handle(session: &mut Session<'_>) -> Vec<EventLogEntry> {
    session.log().snapshot()
}
