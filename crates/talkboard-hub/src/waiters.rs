//! Parked long-poll waiters.
//!
//! A waiter is one blocked read request: the cursor it polled with and a
//! single-use channel for completing it. The [`tokio::sync::oneshot`]
//! sender is the one-shot completion guard: once consumed by a send,
//! a second resolution of the same waiter is impossible by construction.

use talkboard_types::TalkPage;
use tokio::sync::oneshot;

/// A single parked read request.
#[derive(Debug)]
pub struct Waiter {
    /// Identifier used to cancel the waiter on timeout.
    pub id: u64,
    /// The `changesSince` cursor the client polled with.
    pub cursor: u64,
    /// Single-use responder completing the parked read.
    pub tx: oneshot::Sender<TalkPage>,
}

/// The set of currently parked waiters.
///
/// A waiter leaves the set the instant it resolves: either drained by a
/// mutation broadcast or removed by its own timeout.
#[derive(Debug, Default)]
pub struct WaiterSet {
    /// Parked waiters, in registration order.
    waiters: Vec<Waiter>,
    /// Next waiter identifier to hand out.
    next_id: u64,
}

impl WaiterSet {
    /// Create a new empty set.
    pub const fn new() -> Self {
        Self {
            waiters: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of parked waiters.
    pub const fn len(&self) -> usize {
        self.waiters.len()
    }

    /// Whether no waiters are parked.
    pub const fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    /// Park a new waiter with the given cursor.
    ///
    /// Returns the waiter's identifier and the receiving half of its
    /// responder channel.
    pub fn register(&mut self, cursor: u64) -> (u64, oneshot::Receiver<TalkPage>) {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let (tx, rx) = oneshot::channel();
        self.waiters.push(Waiter { id, cursor, tx });
        (id, rx)
    }

    /// Remove a waiter by identifier without resolving it.
    ///
    /// Returns whether the waiter was still parked. `false` means a
    /// broadcast already drained it and its responder has been
    /// completed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.waiters.len();
        self.waiters.retain(|waiter| waiter.id != id);
        self.waiters.len() < before
    }

    /// Take every parked waiter, leaving the set empty.
    pub fn drain(&mut self) -> Vec<Waiter> {
        std::mem::take(&mut self.waiters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_parks_a_waiter() {
        let mut set = WaiterSet::new();
        let (_id, _rx) = set.register(0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_returns_whether_still_parked() {
        let mut set = WaiterSet::new();
        let (id, _rx) = set.register(0);

        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert!(set.is_empty());
    }

    #[test]
    fn drain_empties_the_set() {
        let mut set = WaiterSet::new();
        let (_a, _rx_a) = set.register(1);
        let (_b, _rx_b) = set.register(2);

        let drained = set.drain();
        assert_eq!(drained.len(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn identifiers_are_unique() {
        let mut set = WaiterSet::new();
        let (a, _rx_a) = set.register(0);
        let (b, _rx_b) = set.register(0);
        assert_ne!(a, b);
    }
}
