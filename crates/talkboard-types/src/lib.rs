//! Shared type definitions for the Talkboard service.
//!
//! This crate is the single source of truth for all types used across the
//! Talkboard workspace: the talk/comment data model, the change ledger
//! event record, and the wire payloads exchanged with browser clients.
//!
//! # Modules
//!
//! - [`talks`] -- Core entity structs (`Talk`, `Comment`, `ChangeEvent`)
//! - [`wire`] -- Request/response payloads for the HTTP surface

pub mod talks;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use talks::{ChangeEvent, Comment, Talk};
pub use wire::{CommentDraft, TalkDelta, TalkDraft, TalkPage};
