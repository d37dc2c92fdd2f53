use mindchill_core::StorageError;
use mindchill_core::storage::KeyValueStore;

use crate::bindings::describe_js_error;

/// `window.localStorage`, looked up on
/// every access.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn browser_storage() -> Option<web_sys::Storage>
{
  web_sys::window().and_then(|window| {
    window.local_storage().ok().flatten()
  })
}

impl KeyValueStore for LocalStorage {
  fn get(&self, key: &str) -> Option<String> {
    browser_storage()?
      .get_item(key)
      .ok()
      .flatten()
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    let storage = browser_storage()
      .ok_or(StorageError::Unavailable)?;
    storage.set_item(key, value).map_err(
      |error| {
        StorageError::Write {
          key:    key.to_string(),
          reason: describe_js_error(&error)
        }
      }
    )
  }
}
