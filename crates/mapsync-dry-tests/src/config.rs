// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use mapsync_app_core::config::{ConfigError, ConfigStore};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory [`ConfigStore`] with call counters and injectable failures.
///
/// Clones share state, so a test can hand one clone to a
/// `ConfigService` and inspect the other.
///
/// # Example
///
/// ```
/// use mapsync_dry_tests::InMemoryConfigStore;
/// use mapsync_app_core::config::ConfigService;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save("map-settings", &serde_json::json!({"debug": true})).unwrap();
/// assert_eq!(store.save_count(), 1);
/// assert!(store.contains_key("map-settings"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Rc<RefCell<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `load_raw` fail (or stop failing).
    pub fn set_fail_on_load(&self, fail: bool) {
        self.inner.borrow_mut().fail_on_load = fail;
    }

    /// Make every subsequent `save_raw` and `remove` fail (or stop failing).
    pub fn set_fail_on_save(&self, fail: bool) {
        self.inner.borrow_mut().fail_on_save = fail;
    }

    /// Attempted loads, failed ones included.
    pub fn load_count(&self) -> usize {
        self.inner.borrow().load_count
    }

    /// Attempted saves, failed ones included.
    pub fn save_count(&self) -> usize {
        self.inner.borrow().save_count
    }

    /// Whether `key` currently holds a blob.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().data.contains_key(key)
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut state = self.inner.borrow_mut();
        state.load_count += 1;
        if state.fail_on_load {
            return Err(ConfigError::Backend("simulated load failure".into()));
        }
        state
            .data
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(key.to_owned()))
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut state = self.inner.borrow_mut();
        state.save_count += 1;
        if state.fail_on_save {
            return Err(ConfigError::Backend("simulated save failure".into()));
        }
        state.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        let mut state = self.inner.borrow_mut();
        if state.fail_on_save {
            return Err(ConfigError::Backend("simulated remove failure".into()));
        }
        state.data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_calls_still_count() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_load(true);
        store.set_fail_on_save(true);
        assert!(store.load_raw("k").is_err());
        assert!(store.save_raw("k", b"v").is_err());
        assert_eq!((store.load_count(), store.save_count()), (1, 1));
        assert!(!store.contains_key("k"));
    }

    #[test]
    fn clones_share_data() {
        let a = InMemoryConfigStore::new();
        let b = a.clone();
        a.save_raw("k", b"v").unwrap();
        assert_eq!(b.load_raw("k").unwrap(), b"v");
        assert!(matches!(b.load_raw("missing"), Err(ConfigError::NotFound(k)) if k == "missing"));
        b.remove("k").unwrap();
        assert!(!a.contains_key("k"));
    }
}
