//! Talk store, change ledger, and long-poll coordination for Talkboard.
//!
//! This crate is the core of the service: everything with real
//! concurrency coordination lives here, behind a single
//! [`NotificationHub`] that the HTTP layer injects into its handlers.
//!
//! # Architecture
//!
//! - [`store::TalkStore`] -- current state of all talks, pure CRUD.
//! - [`ledger::ChangeLedger`] -- append-only log of "title X changed at
//!   time T" events, answering "what changed since T".
//! - [`waiters::WaiterSet`] -- the set of parked long-poll reads.
//! - [`hub::NotificationHub`] -- composes the three behind one coarse
//!   lock so a mutation, its ledger event, and the waiter broadcast are
//!   atomic from the caller's point of view.
//!
//! # Modules
//!
//! - [`error`] -- Error types
//! - [`hub`] -- The notification hub
//! - [`ledger`] -- The change ledger
//! - [`store`] -- The talk store
//! - [`waiters`] -- Parked long-poll waiters

pub mod error;
pub mod hub;
pub mod ledger;
pub mod store;
pub mod waiters;

// Re-export primary types for convenience.
pub use error::HubError;
pub use hub::{NotificationHub, ParkedWaiter, WaitOutcome};
pub use ledger::ChangeLedger;
pub use store::TalkStore;
