//! Persistence for the event collection.
//!
//! Two layers:
//! - `KeyValueStore`: durable string values under string keys
//!   (`FileStore` on disk, `MemoryStore` in process)
//! - `Persistence`: load/save of the whole collection, implemented by
//!   `JsonPersistence` on top of any key-value store

mod file;
mod json;
mod memory;

pub use file::FileStore;
pub use json::JsonPersistence;
pub use memory::MemoryStore;

use crate::error::CalResult;
use crate::event::Event;

/// Key under which the event collection is stored.
pub const COLLECTION_KEY: &str = "calendar-events";

/// A local durable key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> CalResult<Option<String>>;

    /// Replace the value under `key` in full.
    fn set(&mut self, key: &str, value: &str) -> CalResult<()>;
}

/// Whole-collection snapshot storage used by the event store.
pub trait Persistence {
    /// Read the stored collection. Absent data is an empty collection.
    fn load(&self) -> CalResult<Vec<Event>>;

    /// Write the entire collection, replacing any prior snapshot.
    fn save(&mut self, events: &[Event]) -> CalResult<()>;
}
