//! HTTP API server for the Talkboard skill-sharing service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **CRUD endpoints** for talks and their comments
//! - **A long-poll read** (`GET /talks?changesSince=N`) that holds the
//!   response open until a change occurs after the client's cursor or a
//!   server-side timeout elapses
//! - **A static file fallback** serving the browser client from a
//!   configurable public directory
//!
//! # Architecture
//!
//! Handlers are thin: validation and status mapping live here, all state
//! and coordination live in the injected
//! [`NotificationHub`](talkboard_hub::NotificationHub). A long-poll
//! handler parks on a one-shot receiver handed out by the hub and owns
//! the timeout; neither path can resolve the request twice.
//!
//! # Modules
//!
//! - [`error`] -- API error type with status mapping
//! - [`handlers`] -- Endpoint handlers
//! - [`router`] -- Router assembly
//! - [`server`] -- TCP bind and serve lifecycle
//! - [`state`] -- Shared application state

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
