//! Core types for evcal.
//!
//! This crate holds everything below the terminal front end:
//! - `Event` and its draft/color/recurrence types
//! - `EventStore`, the owned in-memory collection with persistence
//! - `grid` for month layout and navigation
//! - `storage` for the key-value backed JSON snapshot
//! - `form` for validating user input into drafts

pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod grid;
pub mod storage;
pub mod store;

pub use error::{CalError, CalResult};
pub use event::{Event, EventColor, EventDraft, Recurrence, RecurrenceKind};
pub use store::EventStore;
