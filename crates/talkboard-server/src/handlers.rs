//! Endpoint handlers for the Talkboard API.
//!
//! All state lives in the injected [`NotificationHub`] via the shared
//! [`AppState`]; handlers validate, delegate, and map status codes.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/talks` | Snapshot, or long-poll with `?changesSince=N` |
//! | `GET` | `/talks/{title}` | Single talk |
//! | `PUT` | `/talks/{title}` | Create or replace a talk |
//! | `DELETE` | `/talks/{title}` | Delete a talk (idempotent) |
//! | `POST` | `/talks/{title}/comments` | Append a comment |
//!
//! [`NotificationHub`]: talkboard_hub::NotificationHub

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::debug;

use talkboard_hub::WaitOutcome;
use talkboard_types::{CommentDraft, Talk, TalkDraft, TalkPage};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /talks` endpoint.
///
/// A non-numeric `changesSince` fails extraction and yields 400 before
/// the handler runs.
#[derive(Debug, serde::Deserialize)]
pub struct TalksQuery {
    /// Cursor from a previous response's `serverTime`; presence turns
    /// the request into a long poll.
    #[serde(rename = "changesSince")]
    pub changes_since: Option<u64>,
}

// ---------------------------------------------------------------------------
// GET /talks -- snapshot or long poll
// ---------------------------------------------------------------------------

/// Return all talks, either as a full snapshot or as a delta since the
/// client's cursor.
///
/// Without `changesSince` this answers immediately with every live talk.
/// With it, the request resolves as soon as a change after the cursor
/// exists -- immediately if one already does, otherwise when a mutation
/// broadcast wakes the parked read -- or after the configured deadline
/// with an empty delta. Timeout is not an error; the response is a
/// normal 200 and the client loops on the returned `serverTime`.
pub async fn list_talks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TalksQuery>,
) -> Result<Json<TalkPage>, ApiError> {
    let Some(cursor) = params.changes_since else {
        return Ok(Json(state.hub.snapshot().await));
    };

    let mut parked = match state.hub.wait_for_changes(cursor).await {
        WaitOutcome::Ready(page) => return Ok(Json(page)),
        WaitOutcome::Parked(parked) => parked,
    };

    match tokio::time::timeout(state.wait_timeout, &mut parked.rx).await {
        Ok(Ok(page)) => Ok(Json(page)),
        Ok(Err(_)) => Err(ApiError::Internal(String::from(
            "long-poll responder dropped before resolution",
        ))),
        Err(_elapsed) => {
            // Cancellation and broadcast are serialized by the hub lock:
            // either the waiter was still parked (removed; respond empty
            // with a server time no later mutation shares) or a mutation
            // already resolved it and the page is on the receiver.
            let server_time = state.hub.cancel_waiter(parked.id).await;
            let page = parked.rx.try_recv().unwrap_or_else(|_| TalkPage {
                server_time,
                talks: Vec::new(),
            });
            debug!(cursor, server_time, "long poll timed out");
            Ok(Json(page))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /talks/{title} -- single talk
// ---------------------------------------------------------------------------

/// Return a single talk by title, or 404 if it does not exist.
pub async fn get_talk(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<Talk>, ApiError> {
    state
        .hub
        .get_talk(&title)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no talk '{title}' found")))
}

// ---------------------------------------------------------------------------
// PUT /talks/{title} -- create or replace
// ---------------------------------------------------------------------------

/// Create or fully replace a talk.
///
/// The body must be `{presenter, summary}` with both fields present as
/// strings; anything else is a 400. On success the comment thread is
/// reset and every parked long poll is woken.
pub async fn put_talk(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let draft: TalkDraft = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("bad talk data: {e}")))?;
    state.hub.put_talk(&title, draft).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// DELETE /talks/{title} -- delete
// ---------------------------------------------------------------------------

/// Delete a talk. Idempotent: deleting an absent title also succeeds
/// with 204, and still records a change so stale cursors observe the
/// deletion marker.
pub async fn delete_talk(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> StatusCode {
    state.hub.delete_talk(&title).await;
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// POST /talks/{title}/comments -- append a comment
// ---------------------------------------------------------------------------

/// Append a comment to an existing talk.
///
/// The body must be `{author, message}` with both fields present as
/// strings (400 otherwise); the talk must exist (404 otherwise).
pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let draft: CommentDraft = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("bad comment data: {e}")))?;
    state.hub.add_comment(&title, draft.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}
