//! In-process key-value store, mostly for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::KeyValueStore;
use crate::error::{CalError, CalResult};

/// Cloning a `MemoryStore` yields a handle onto the same values, so a test can
/// keep one handle while the event store owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read and write fail with `StorageUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.borrow_mut().unavailable = unavailable;
    }

    /// Write a raw value directly, bypassing any availability toggle.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CalResult<Option<String>> {
        let state = self.inner.borrow();
        if state.unavailable {
            return Err(CalError::StorageUnavailable("memory store offline".into()));
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CalResult<()> {
        let mut state = self.inner.borrow_mut();
        if state.unavailable {
            return Err(CalError::StorageUnavailable("memory store offline".into()));
        }
        state.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
