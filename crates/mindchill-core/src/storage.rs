use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::StorageError;

/// String key/value persistence, the shape
/// of the browser's `localStorage`.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Option<String>;

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;
}

/// In-memory store used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: RefCell<BTreeMap<String, String>>,
  writes:  RefCell<usize>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entry(
    key: &str,
    value: &str
  ) -> Self {
    let store = Self::default();
    store
      .entries
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    store
  }

  /// Number of successful `set` calls.
  pub fn write_count(&self) -> usize {
    *self.writes.borrow()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.borrow().get(key).cloned()
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self
      .entries
      .borrow_mut()
      .insert(key.to_string(), value.to_string());
    *self.writes.borrow_mut() += 1;
    Ok(())
  }
}
