//! The talk store: current state of all talks, keyed by title.
//!
//! Pure CRUD with no notification logic. The [`NotificationHub`] wraps
//! this store together with the change ledger so every mutation records
//! an event; callers outside this crate never touch the store directly.
//!
//! [`NotificationHub`]: crate::hub::NotificationHub

use std::collections::BTreeMap;

use talkboard_types::{Comment, Talk, TalkDraft};

use crate::error::HubError;

/// In-memory map of all live talks.
///
/// Titles are unique; the key space is exactly the set of non-deleted
/// talks. Iteration order is by title, which makes [`list_all`] stable
/// within a call (no ordering guarantee is part of the contract).
///
/// [`list_all`]: TalkStore::list_all
#[derive(Debug, Default)]
pub struct TalkStore {
    /// Live talks keyed by title.
    talks: BTreeMap<String, Talk>,
}

impl TalkStore {
    /// Create a new empty store.
    pub const fn new() -> Self {
        Self {
            talks: BTreeMap::new(),
        }
    }

    /// Look up a talk by title.
    pub fn get(&self, title: &str) -> Option<&Talk> {
        self.talks.get(title)
    }

    /// Number of live talks.
    pub fn len(&self) -> usize {
        self.talks.len()
    }

    /// Whether the store holds no talks.
    pub fn is_empty(&self) -> bool {
        self.talks.is_empty()
    }

    /// All live talks, ordered by title.
    pub fn list_all(&self) -> Vec<Talk> {
        self.talks.values().cloned().collect()
    }

    /// Create or fully replace a talk.
    ///
    /// A re-`PUT` of an existing title overwrites presenter and summary
    /// and resets the comment thread to empty: an upsert, not a merge.
    pub fn put(&mut self, title: &str, draft: TalkDraft) {
        let talk = Talk {
            title: title.to_owned(),
            presenter: draft.presenter,
            summary: draft.summary,
            comments: Vec::new(),
        };
        self.talks.insert(title.to_owned(), talk);
    }

    /// Remove a talk. Removing an absent title is a no-op.
    ///
    /// Returns whether the talk was present.
    pub fn delete(&mut self, title: &str) -> bool {
        self.talks.remove(title).is_some()
    }

    /// Append a comment to an existing talk.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::TalkNotFound`] if no talk has the given title.
    pub fn add_comment(&mut self, title: &str, comment: Comment) -> Result<(), HubError> {
        let talk = self.talks.get_mut(title).ok_or_else(|| HubError::TalkNotFound {
            title: title.to_owned(),
        })?;
        talk.comments.push(comment);
        Ok(())
    }
}
