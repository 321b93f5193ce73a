//! Error types for the Talkboard core.
//!
//! Field validation happens at the HTTP boundary, so the hub only ever
//! fails on operations that require an existing talk. A rejected
//! operation records no ledger event and wakes no waiters.

/// Errors that can occur in the talk store and notification hub.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HubError {
    /// An operation required a talk that does not exist.
    #[error("no talk '{title}' found")]
    TalkNotFound {
        /// Title the operation was addressed to.
        title: String,
    },
}
