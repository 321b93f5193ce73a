//! Axum router construction for the Talkboard API.
//!
//! Assembles the talk routes into a single [`Router`] with CORS and
//! request tracing middleware, and a static file fallback serving the
//! browser client from the configured public directory.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the Talkboard server.
///
/// The router includes:
/// - `GET /talks` -- snapshot, or long poll with `?changesSince=N`
/// - `GET|PUT|DELETE /talks/{title}` -- single-talk operations
/// - `POST /talks/{title}/comments` -- append a comment
/// - static file fallback -- the browser client under the public
///   directory
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = ServeDir::new(state.public_dir.clone());

    Router::new()
        .route("/talks", get(handlers::list_talks))
        .route(
            "/talks/{title}",
            get(handlers::get_talk)
                .put(handlers::put_talk)
                .delete(handlers::delete_talk),
        )
        .route(
            "/talks/{title}/comments",
            axum::routing::post(handlers::post_comment),
        )
        .fallback_service(public)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
