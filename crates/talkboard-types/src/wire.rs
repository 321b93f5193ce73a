//! Request and response payloads for the Talkboard HTTP surface.
//!
//! The wire format uses camelCase field names (`serverTime`,
//! `changesSince`) to match what the browser client sends and expects.

use serde::{Deserialize, Serialize};

use crate::talks::{Comment, Talk};

/// One entry in a change delta: either the live talk or a deletion
/// marker.
///
/// Serializes untagged, so a live talk appears as plain Talk JSON and a
/// deleted one as `{"title": ..., "deleted": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TalkDelta {
    /// The talk exists; this is its current state.
    Live(Talk),
    /// The talk was deleted since the client's cursor.
    Deleted {
        /// Title of the deleted talk.
        title: String,
        /// Always `true`; distinguishes the marker from a live talk.
        deleted: bool,
    },
}

impl TalkDelta {
    /// Build a deletion marker for the given title.
    pub const fn deleted(title: String) -> Self {
        Self::Deleted {
            title,
            deleted: true,
        }
    }

    /// The title this delta entry refers to.
    pub fn title(&self) -> &str {
        match self {
            Self::Live(talk) => &talk.title,
            Self::Deleted { title, .. } => title,
        }
    }
}

/// The `{serverTime, talks}` payload returned by `GET /talks` and by
/// long-poll reads.
///
/// `server_time` is the cursor the client must echo back as
/// `changesSince` on its next poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkPage {
    /// Logical server time as of this response.
    pub server_time: u64,
    /// Full snapshot or change delta, depending on the request.
    pub talks: Vec<TalkDelta>,
}

/// Request body for `PUT /talks/{title}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TalkDraft {
    /// Name of the person giving the talk.
    pub presenter: String,
    /// Short description of the talk.
    pub summary: String,
}

/// Request body for `POST /talks/{title}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentDraft {
    /// Display name of the commenter.
    pub author: String,
    /// The comment text.
    pub message: String,
}

impl From<CommentDraft> for Comment {
    fn from(draft: CommentDraft) -> Self {
        Self {
            author: draft.author,
            message: draft.message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn deletion_marker_serializes_with_flag() {
        let delta = TalkDelta::deleted(String::from("Gone"));
        let json = serde_json::to_value(&delta).unwrap_or_default();
        assert_eq!(json["title"], "Gone");
        assert_eq!(json["deleted"], true);
    }

    #[test]
    fn live_delta_serializes_as_plain_talk() {
        let delta = TalkDelta::Live(Talk {
            title: String::from("Intro"),
            presenter: String::from("Ann"),
            summary: String::from("Hi"),
            comments: Vec::new(),
        });
        let json = serde_json::to_value(&delta).unwrap_or_default();
        assert_eq!(json["presenter"], "Ann");
        assert!(json.get("deleted").is_none());
    }

    #[test]
    fn page_uses_camel_case_server_time() {
        let page = TalkPage {
            server_time: 7,
            talks: Vec::new(),
        };
        let json = serde_json::to_value(&page).unwrap_or_default();
        assert_eq!(json["serverTime"], 7);
    }

    #[test]
    fn draft_rejects_missing_field() {
        let result: Result<TalkDraft, _> =
            serde_json::from_value(serde_json::json!({"presenter": "Ann"}));
        assert!(result.is_err());
    }

    #[test]
    fn draft_rejects_non_string_field() {
        let result: Result<TalkDraft, _> =
            serde_json::from_value(serde_json::json!({"presenter": "Ann", "summary": 3}));
        assert!(result.is_err());
    }
}
