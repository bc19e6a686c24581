// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use understudy_core::{ConfigError, ConfigStore, HarnessConfig};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Lets tests drive [`StubContext::from_store`](understudy_core::StubContext::from_store)
/// and [`ConfigService`](understudy_core::ConfigService) without touching the
/// filesystem. It also tracks call counts and can simulate failures.
///
/// # Example
///
/// ```
/// use understudy_core::{ConfigService, HarnessConfig, StubContext, UnboundPolicy};
/// use understudy_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::with_harness("understudy", &HarnessConfig::strict());
/// let service = ConfigService::new(store.clone());
///
/// let ctx = StubContext::from_store(&service, "understudy").unwrap();
/// assert_eq!(ctx.config().unbound, UnboundPolicy::Fail);
/// assert_eq!(store.load_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `config` serialized under `key`.
    pub fn with_harness(key: &str, config: &HarnessConfig) -> Self {
        let store = Self::new();
        // HarnessConfig holds only an enum and a bool; serializing cannot fail.
        if let Ok(bytes) = serde_json::to_vec(config) {
            store.lock().data.insert(key.to_string(), bytes);
        }
        store
    }

    /// Create a store holding raw bytes under `key`.
    pub fn with_raw(key: &str, bytes: &[u8]) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_string(), bytes.to_vec());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Configure the store to fail on load operations.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Configure the store to fail on save operations.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts, failed ones included.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts, failed ones included.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Check if a key exists in the store.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;

        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }

        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;

        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }

        inner.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use understudy_core::{ConfigService, StubContext, UnboundPolicy};

    #[test]
    fn missing_key_yields_default_context() {
        let service = ConfigService::new(InMemoryConfigStore::new());
        let ctx = StubContext::from_store(&service, "understudy").unwrap();
        assert_eq!(ctx.config(), HarnessConfig::default());
    }

    #[test]
    fn empty_blob_yields_defaults() {
        let service = ConfigService::new(InMemoryConfigStore::with_raw("understudy", b""));
        assert_eq!(service.harness("understudy").unwrap(), HarnessConfig::default());
    }

    #[test]
    fn saved_settings_are_loaded_back() {
        let store = InMemoryConfigStore::new();
        let service = ConfigService::new(store.clone());
        service.save("understudy", &HarnessConfig::strict()).unwrap();

        assert!(store.contains_key("understudy"));
        assert_eq!(store.save_count(), 1);
        let ctx = StubContext::from_store(&service, "understudy").unwrap();
        assert_eq!(ctx.config().unbound, UnboundPolicy::Fail);
        assert!(ctx.config().record_calls);
    }

    #[test]
    fn load_failure_propagates() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_load(true);
        let service = ConfigService::new(store.clone());
        assert!(matches!(
            StubContext::from_store(&service, "understudy"),
            Err(ConfigError::Other(_))
        ));
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn save_failure_stores_nothing() {
        let store = InMemoryConfigStore::new();
        store.set_fail_on_save(true);
        let service = ConfigService::new(store.clone());
        assert!(service.save("understudy", &HarnessConfig::strict()).is_err());
        assert!(!store.contains_key("understudy"));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn malformed_blob_is_a_serde_error() {
        let service = ConfigService::new(InMemoryConfigStore::with_raw("understudy", b"[1,"));
        assert!(matches!(service.harness("understudy"), Err(ConfigError::Serde(_))));
    }
}
