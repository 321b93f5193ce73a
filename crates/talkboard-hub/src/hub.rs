//! The notification hub: mutations, delta reads, and waiter broadcast
//! behind one coarse lock.
//!
//! Shared state (the talk map, the ledger, the waiter set) lives in a
//! single [`tokio::sync::Mutex`] so that a mutation, its ledger event,
//! and the broadcast to parked waiters are atomic from the caller's
//! point of view: the broadcast always observes a store snapshot
//! consistent with the event just appended.
//!
//! The hub is an injected singleton with no ambient/static access; the
//! HTTP layer holds it in an [`std::sync::Arc`] and tests instantiate
//! isolated instances.
//!
//! # Broadcast policy
//!
//! On any mutation, every parked waiter is resolved -- not just the ones
//! whose cursor would select the changed title. Each waiter gets its own
//! `changes_since(cursor)` result, which may be empty if it raced the
//! mutation. This trades a few redundant wakeups for a single
//! dedup/match code path; clients must treat delivery as idempotent.
//!
//! # Timeout race
//!
//! The HTTP handler owns the long-poll deadline. When it fires, the
//! handler calls [`NotificationHub::cancel_waiter`]; removal happens
//! under the same lock as broadcasts, so either the waiter is still
//! parked (removed, and the returned server time predates any later
//! mutation) or a broadcast already completed its responder (and the
//! handler finds the page on its receiver). A waiter is resolved exactly
//! once either way.

use talkboard_types::{Comment, Talk, TalkDelta, TalkDraft, TalkPage};
use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::error::HubError;
use crate::ledger::ChangeLedger;
use crate::store::TalkStore;
use crate::waiters::WaiterSet;

/// Outcome of a delta read: answered now or parked.
#[derive(Debug)]
pub enum WaitOutcome {
    /// Changes existed after the cursor; here they are.
    Ready(TalkPage),
    /// Nothing changed yet; the read is parked until a mutation or the
    /// caller's timeout.
    Parked(ParkedWaiter),
}

/// Handle to a parked read, held by the HTTP handler while it waits.
#[derive(Debug)]
pub struct ParkedWaiter {
    /// Identifier for cancelling the waiter on timeout.
    pub id: u64,
    /// Receiving half of the waiter's single-use responder.
    pub rx: oneshot::Receiver<TalkPage>,
}

/// State shared by all in-flight requests.
#[derive(Debug, Default)]
struct HubInner {
    /// Current state of all talks.
    store: TalkStore,
    /// Append-only log of mutation events.
    ledger: ChangeLedger,
    /// Currently parked long-poll reads.
    waiters: WaiterSet,
}

impl HubInner {
    /// Build the `{serverTime, talks}` page for changes after `cursor`.
    ///
    /// Titles whose most recent event survives the cutoff resolve
    /// against the store: present means the live talk, absent means a
    /// deletion marker.
    fn page_since(&self, cursor: u64) -> TalkPage {
        let talks = self
            .ledger
            .changes_since(cursor)
            .into_iter()
            .map(|title| match self.store.get(&title) {
                Some(talk) => TalkDelta::Live(talk.clone()),
                None => TalkDelta::deleted(title),
            })
            .collect();
        TalkPage {
            server_time: self.ledger.now(),
            talks,
        }
    }

    /// Record an event for `title` and resolve every parked waiter.
    fn record_and_broadcast(&mut self, title: &str) -> u64 {
        let timestamp = self.ledger.record(title);
        let drained = self.waiters.drain();
        let woken = drained.len();
        for waiter in drained {
            let page = self.page_since(waiter.cursor);
            // A send failure means the client already went away.
            if waiter.tx.send(page).is_err() {
                debug!(waiter = waiter.id, "waiter receiver dropped before resolution");
            }
        }
        debug!(title, timestamp, woken, "change recorded");
        timestamp
    }
}

/// The process-wide coordination point for talks, changes, and waiters.
///
/// All methods take `&self`; interior state is guarded by one mutex.
#[derive(Debug, Default)]
pub struct NotificationHub {
    /// The single coarse lock over store, ledger, and waiter set.
    inner: Mutex<HubInner>,
}

impl NotificationHub {
    /// Create a new hub with an empty store and ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a talk by title, cloning it out of the store.
    pub async fn get_talk(&self, title: &str) -> Option<Talk> {
        self.inner.lock().await.store.get(title).cloned()
    }

    /// Full snapshot of all talks plus the current server time.
    pub async fn snapshot(&self) -> TalkPage {
        let inner = self.inner.lock().await;
        TalkPage {
            server_time: inner.ledger.now(),
            talks: inner
                .store
                .list_all()
                .into_iter()
                .map(TalkDelta::Live)
                .collect(),
        }
    }

    /// Create or replace a talk, record the change, and wake waiters.
    ///
    /// Returns the event timestamp.
    pub async fn put_talk(&self, title: &str, draft: TalkDraft) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.store.put(title, draft);
        inner.record_and_broadcast(title)
    }

    /// Delete a talk, record the change, and wake waiters.
    ///
    /// Deleting an absent title is idempotent but still records an
    /// event, so a client whose cursor predates the deletion sees a
    /// deletion marker rather than nothing.
    pub async fn delete_talk(&self, title: &str) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.store.delete(title);
        inner.record_and_broadcast(title)
    }

    /// Append a comment, record the change, and wake waiters.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::TalkNotFound`] if the talk does not exist; no
    /// event is recorded and no waiter is woken in that case.
    pub async fn add_comment(&self, title: &str, comment: Comment) -> Result<u64, HubError> {
        let mut inner = self.inner.lock().await;
        inner.store.add_comment(title, comment)?;
        Ok(inner.record_and_broadcast(title))
    }

    /// Answer a delta read immediately, or park it.
    ///
    /// Computes `changes_since(cursor)` under the lock. Non-empty means
    /// [`WaitOutcome::Ready`] and no waiter is created. Empty means a
    /// waiter is registered and the caller gets a [`ParkedWaiter`] to
    /// await; this method never blocks the calling task beyond the lock.
    pub async fn wait_for_changes(&self, cursor: u64) -> WaitOutcome {
        let mut inner = self.inner.lock().await;
        let page = inner.page_since(cursor);
        if page.talks.is_empty() {
            let (id, rx) = inner.waiters.register(cursor);
            debug!(cursor, waiter = id, "read parked");
            WaitOutcome::Parked(ParkedWaiter { id, rx })
        } else {
            WaitOutcome::Ready(page)
        }
    }

    /// Cancel a parked waiter whose deadline elapsed.
    ///
    /// Removes the waiter from the active set if it is still parked and
    /// returns the current server time for the empty timeout response.
    /// If the waiter is gone, a broadcast won the race and the caller
    /// will find the resolution on its receiver.
    pub async fn cancel_waiter(&self, id: u64) -> u64 {
        let mut inner = self.inner.lock().await;
        if inner.waiters.remove(id) {
            debug!(waiter = id, "waiter timed out");
        }
        inner.ledger.now()
    }

    /// Number of currently parked waiters.
    pub async fn waiter_count(&self) -> usize {
        self.inner.lock().await.waiters.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use super::*;

    fn draft(presenter: &str, summary: &str) -> TalkDraft {
        TalkDraft {
            presenter: presenter.to_owned(),
            summary: summary.to_owned(),
        }
    }

    fn comment(author: &str, message: &str) -> Comment {
        Comment {
            author: author.to_owned(),
            message: message.to_owned(),
        }
    }

    fn titles(page: &TalkPage) -> Vec<&str> {
        page.talks.iter().map(TalkDelta::title).collect()
    }

    #[tokio::test]
    async fn read_with_stale_cursor_is_ready_immediately() {
        let hub = NotificationHub::new();
        hub.put_talk("Intro", draft("Ann", "Hi")).await;

        match hub.wait_for_changes(0).await {
            WaitOutcome::Ready(page) => {
                assert_eq!(titles(&page), vec!["Intro"]);
                assert!(page.server_time >= 1);
            }
            WaitOutcome::Parked(_) => unreachable!("changes existed after cursor 0"),
        }
    }

    #[tokio::test]
    async fn read_with_current_cursor_parks() {
        let hub = NotificationHub::new();
        let ts = hub.put_talk("Intro", draft("Ann", "Hi")).await;

        match hub.wait_for_changes(ts).await {
            WaitOutcome::Ready(_) => unreachable!("nothing changed after the put"),
            WaitOutcome::Parked(_) => assert_eq!(hub.waiter_count().await, 1),
        }
    }

    #[tokio::test]
    async fn mutation_resolves_every_parked_waiter() {
        let hub = NotificationHub::new();
        let now = hub.snapshot().await.server_time;

        let WaitOutcome::Parked(first) = hub.wait_for_changes(now).await else {
            unreachable!("ledger is empty")
        };
        let WaitOutcome::Parked(second) = hub.wait_for_changes(now).await else {
            unreachable!("ledger is empty")
        };

        hub.put_talk("Intro", draft("Ann", "Hi")).await;

        let page_a = first.rx.await.unwrap();
        let page_b = second.rx.await.unwrap();
        assert_eq!(titles(&page_a), vec!["Intro"]);
        assert_eq!(titles(&page_b), vec!["Intro"]);
        assert_eq!(hub.waiter_count().await, 0);
    }

    #[tokio::test]
    async fn dedup_keeps_only_the_final_state() {
        let hub = NotificationHub::new();
        hub.put_talk("Intro", draft("Ann", "Hi")).await;
        hub.put_talk("Intro", draft("Cal", "Bye")).await;

        let WaitOutcome::Ready(page) = hub.wait_for_changes(0).await else {
            unreachable!("two events after cursor 0")
        };
        assert_eq!(page.talks.len(), 1);
        match page.talks.first().unwrap() {
            TalkDelta::Live(talk) => assert_eq!(talk.presenter, "Cal"),
            TalkDelta::Deleted { .. } => unreachable!("talk is live"),
        }
    }

    #[tokio::test]
    async fn delete_produces_a_deletion_marker() {
        let hub = NotificationHub::new();
        let before = hub.put_talk("Intro", draft("Ann", "Hi")).await;
        hub.delete_talk("Intro").await;

        let WaitOutcome::Ready(page) = hub.wait_for_changes(before).await else {
            unreachable!("delete happened after the cursor")
        };
        assert_eq!(
            page.talks,
            vec![TalkDelta::deleted(String::from("Intro"))]
        );
    }

    #[tokio::test]
    async fn delete_of_absent_talk_still_notifies() {
        let hub = NotificationHub::new();
        hub.delete_talk("Ghost").await;

        let WaitOutcome::Ready(page) = hub.wait_for_changes(0).await else {
            unreachable!("delete recorded an event")
        };
        assert_eq!(page.talks, vec![TalkDelta::deleted(String::from("Ghost"))]);
    }

    #[tokio::test]
    async fn rejected_comment_records_no_event() {
        let hub = NotificationHub::new();
        let result = hub.add_comment("Missing", comment("Bo", "Nice")).await;

        assert!(result.is_err());
        assert_eq!(hub.snapshot().await.server_time, 0);
    }

    #[tokio::test]
    async fn cancelled_waiter_leaves_the_set() {
        let hub = NotificationHub::new();
        let WaitOutcome::Parked(parked) = hub.wait_for_changes(0).await else {
            unreachable!("ledger is empty")
        };

        let server_time = hub.cancel_waiter(parked.id).await;
        assert_eq!(server_time, 0);
        assert_eq!(hub.waiter_count().await, 0);
    }

    #[tokio::test]
    async fn cancel_after_broadcast_finds_resolution_on_receiver() {
        let hub = NotificationHub::new();
        let WaitOutcome::Parked(mut parked) = hub.wait_for_changes(0).await else {
            unreachable!("ledger is empty")
        };

        // The mutation wins the race: the waiter is drained and resolved
        // before the timeout path cancels it.
        hub.put_talk("Intro", draft("Ann", "Hi")).await;
        hub.cancel_waiter(parked.id).await;

        let page = parked.rx.try_recv().unwrap();
        assert_eq!(titles(&page), vec!["Intro"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn racing_put_and_cancel_resolve_each_waiter_at_most_once() {
        let hub = std::sync::Arc::new(NotificationHub::new());

        for _ in 0..200 {
            let cursor = hub.snapshot().await.server_time;
            let WaitOutcome::Parked(mut parked) = hub.wait_for_changes(cursor).await else {
                unreachable!("cursor is current")
            };

            let writer = hub.clone();
            let put = tokio::spawn(async move {
                writer.put_talk("Race", draft("Ann", "Hi")).await;
            });
            let server_time = hub.cancel_waiter(parked.id).await;
            put.await.unwrap();

            let resolved = parked.rx.try_recv().is_ok();
            assert!(
                parked.rx.try_recv().is_err(),
                "a waiter must never resolve twice"
            );
            if !resolved {
                // The timeout path won; the put must still be visible
                // from the cursor handed back by the cancellation.
                let WaitOutcome::Ready(page) = hub.wait_for_changes(server_time).await else {
                    unreachable!("the mutation happened after the returned cursor")
                };
                assert_eq!(titles(&page), vec!["Race"]);
            }
            assert_eq!(hub.waiter_count().await, 0);
        }
    }

    #[tokio::test]
    async fn comment_lands_on_the_live_talk() {
        let hub = NotificationHub::new();
        hub.put_talk("Intro", draft("Ann", "Hi")).await;
        hub.add_comment("Intro", comment("Bo", "Nice")).await.unwrap();

        let talk = hub.get_talk("Intro").await.unwrap();
        assert_eq!(talk.comments, vec![comment("Bo", "Nice")]);
    }
}
