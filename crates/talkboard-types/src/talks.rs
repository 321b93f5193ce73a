//! Core entity structs for the Talkboard service.
//!
//! A [`Talk`] is keyed by its title. Titles are unique within the store
//! and immutable once created; comments are append-only. A
//! [`ChangeEvent`] is the ledger record produced by every mutation.

use serde::{Deserialize, Serialize};

/// A single talk proposal with its discussion thread.
///
/// The title is the unique key. A `PUT` of an existing title replaces the
/// presenter and summary and resets the comment thread (upsert, not
/// merge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    /// Unique key, immutable once the talk is created.
    pub title: String,
    /// Name of the person giving the talk.
    pub presenter: String,
    /// Short description of the talk.
    pub summary: String,
    /// Discussion thread, in append order.
    pub comments: Vec<Comment>,
}

/// A single comment on a talk.
///
/// Comments are immutable once appended and are never edited or deleted
/// individually; they only disappear when their talk is replaced or
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Display name of the commenter.
    pub author: String,
    /// The comment text.
    pub message: String,
}

/// One entry in the append-only change ledger.
///
/// Every mutation (create, replace, delete, comment) appends exactly one
/// event. Timestamps come from a strictly increasing logical counter, so
/// two events never share a timestamp and the `timestamp <= cursor`
/// cutoff used by delta queries is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Title of the talk that changed.
    pub title: String,
    /// Logical time at which the change was recorded.
    pub timestamp: u64,
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn talk_round_trips_through_json() {
        let talk = Talk {
            title: String::from("Intro"),
            presenter: String::from("Ann"),
            summary: String::from("Hi"),
            comments: vec![Comment {
                author: String::from("Bo"),
                message: String::from("Nice"),
            }],
        };

        let json = serde_json::to_value(&talk).unwrap_or_default();
        assert_eq!(json["title"], "Intro");
        assert_eq!(json["comments"][0]["author"], "Bo");

        let back: Result<Talk, _> = serde_json::from_value(json);
        assert_eq!(back.ok(), Some(talk));
    }
}
