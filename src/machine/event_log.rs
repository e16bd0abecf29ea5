//! Bounded audit log, most recent entry first.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use washline_protocol::ops::{EventKind, EventLogEntry};
use washline_protocol::Phase;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// Capped, most-recent-first ring of audit entries.
///
/// Entries are never edited or removed individually; the oldest falls off
/// when the ring is full.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventLogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// Create an empty log holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Append an entry at the front.
    pub fn record(
        &mut self,
        timestamp: DateTime<Utc>,
        event: EventKind,
        phase: Phase,
        owner: Option<String>,
        info: impl Into<String>,
    ) -> &EventLogEntry {
        let entry = EventLogEntry {
            seq: self.next_seq,
            timestamp,
            event,
            phase,
            owner,
            info: info.into(),
        };
        self.next_seq += 1;
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    /// Owned copy of the entries, most recent first.
    pub fn snapshot(&self) -> Vec<EventLogEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&EventLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
