//! The change ledger: an append-only log of mutation events.
//!
//! Every mutation appends one [`ChangeEvent`] tagged with the title that
//! changed and a timestamp from the ledger's own clock. Delta queries
//! scan the log newest-first, deduplicating by title, so a client only
//! ever sees the final status of a title within its window.
//!
//! # Design
//!
//! - **Append-only**: events are never modified or deleted. No
//!   compaction is required for correctness within a process lifetime.
//! - **Logical clock**: timestamps come from a strictly increasing
//!   counter, not wall time. A coarse wall clock can hand two mutations
//!   the same tick, and the `timestamp <= cursor` cutoff would then drop
//!   one of them for a client polling at exactly that tick. The counter
//!   makes ties impossible.

use std::collections::BTreeSet;

use talkboard_types::ChangeEvent;

/// Append-only, time-ordered log of "title X changed at time T" events.
#[derive(Debug, Default)]
pub struct ChangeLedger {
    /// All events, in append order. Timestamps are strictly increasing.
    events: Vec<ChangeEvent>,
    /// Logical clock; the timestamp handed to the most recent event.
    clock: u64,
}

impl ChangeLedger {
    /// Create a new empty ledger with the clock at zero.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            clock: 0,
        }
    }

    /// Current logical server time.
    ///
    /// This is the cursor value handed to clients as `serverTime`; an
    /// event recorded afterwards is guaranteed a strictly greater
    /// timestamp.
    pub const fn now(&self) -> u64 {
        self.clock
    }

    /// Number of events in the ledger.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the ledger has no events.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append a change event for the given title.
    ///
    /// Advances the clock and returns the timestamp used.
    pub fn record(&mut self, title: &str) -> u64 {
        self.clock = self.clock.saturating_add(1);
        self.events.push(ChangeEvent {
            title: title.to_owned(),
            timestamp: self.clock,
        });
        self.clock
    }

    /// Titles changed strictly after `cursor`, most recent change first.
    ///
    /// Scans the log backward, stopping at the first event with
    /// `timestamp <= cursor`, and keeps only the first occurrence of
    /// each title seen (its most recent change, which reflects the
    /// title's current status). Returns the empty vector when nothing
    /// changed after the cursor.
    pub fn changes_since(&self, cursor: u64) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.events
            .iter()
            .rev()
            .take_while(|event| event.timestamp > cursor)
            .filter(|event| seen.insert(event.title.as_str()))
            .map(|event| event.title.clone())
            .collect()
    }
}
