// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Execution contexts: one private stub store plus the seam bindings that
//! dispatch into it.
//!
//! A [`StubContext`] is created per test and handed to both the code under
//! test (through its seams) and the test body (to register stubs). Clones
//! share state; separately created contexts share nothing, so tests running
//! concurrently never observe each other's stubs even for the same seam.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;
use tracing::debug;

use crate::calculator::{make_calculator, Calculator};
use crate::config::{ConfigError, ConfigService, ConfigStore, HarnessConfig};
use crate::error::{ConfigurationError, Result};
use crate::key::StubKey;
use crate::matcher::ArgSpec;
use crate::store::{Payload, StubStore};

/// How a recorded seam call was answered.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// A bound calculator returned this value.
    Stubbed(Value),
    /// No binding; the real implementation returned this value.
    PassedThrough(Value),
    /// The call failed with this message.
    Failed(String),
}

/// One entry of the call log.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// Seam that was called.
    pub key: StubKey,
    /// Actual arguments.
    pub args: Vec<Value>,
    /// How the call was answered.
    pub outcome: CallOutcome,
}

#[derive(Debug, Default)]
pub(crate) struct ContextInner {
    pub(crate) store: StubStore,
    bindings: HashMap<StubKey, Calculator>,
    calls: Vec<CallRecord>,
    config: HarnessConfig,
}

pub(crate) fn lock(inner: &Mutex<ContextInner>) -> MutexGuard<'_, ContextInner> {
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

/// Cloneable handle on one execution context.
#[derive(Clone, Debug, Default)]
pub struct StubContext {
    inner: Arc<Mutex<ContextInner>>,
}

impl StubContext {
    /// Create an empty context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context with the given settings.
    pub fn with_config(config: HarnessConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ContextInner {
                config,
                ..ContextInner::default()
            })),
        }
    }

    /// Create a context using settings stored under `key`, falling back to
    /// defaults when nothing is stored.
    pub fn from_store<S: ConfigStore>(
        service: &ConfigService<S>,
        key: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_config(service.harness(key)?))
    }

    pub(crate) fn downgrade(&self) -> Weak<Mutex<ContextInner>> {
        Arc::downgrade(&self.inner)
    }

    /// Active settings.
    pub fn config(&self) -> HarnessConfig {
        lock(&self.inner).config.clone()
    }

    // -------------------------------------------------------------------------
    // Stub store
    // -------------------------------------------------------------------------

    /// Register a stub in this context's store. See [`StubStore::add_stub`].
    pub fn add_stub(&self, key: StubKey, specs: Vec<ArgSpec>, payload: Payload) {
        lock(&self.inner).store.add_stub(key, specs, payload);
    }

    /// Resolve a call directly against the store. See [`StubStore::consume_stub`].
    pub fn consume_stub(&self, key: &StubKey, args: &[Value]) -> Result<Value> {
        lock(&self.inner).store.consume_stub(key, args)
    }

    /// Number of entries registered under `key`.
    pub fn entry_count(&self, key: &StubKey) -> usize {
        lock(&self.inner).store.entry_count(key)
    }

    // -------------------------------------------------------------------------
    // Seam binding
    // -------------------------------------------------------------------------

    /// Build a calculator over this context. See [`make_calculator`].
    pub fn make_calculator(
        &self,
        key: StubKey,
        arity: usize,
    ) -> Result<Calculator, ConfigurationError> {
        make_calculator(self, key, arity)
    }

    /// Route calls at `owner.function/arity` to `calculator` for the rest of
    /// this context's life. Rebinding replaces the previous calculator.
    ///
    /// The calculator must have been built over this context; one built over
    /// another context would answer from that context's store.
    pub fn bind(
        &self,
        owner: &str,
        function: &str,
        arity: usize,
        calculator: Calculator,
    ) -> Result<(), ConfigurationError> {
        let key = StubKey::new(owner, function, arity);
        if *calculator.key() != key {
            return Err(ConfigurationError::BindingMismatch {
                key,
                calculator: calculator.key().clone(),
            });
        }
        if !calculator.serves(&self.downgrade()) {
            return Err(ConfigurationError::ForeignCalculator { key });
        }
        debug!(%key, "seam bound");
        lock(&self.inner).bindings.insert(key, calculator);
        Ok(())
    }

    /// Remove the binding for `key`. Stored stubs are left untouched.
    pub fn unbind(&self, key: &StubKey) -> bool {
        lock(&self.inner).bindings.remove(key).is_some()
    }

    /// Calculator currently bound to `key`, if any.
    pub fn calculator_for(&self, key: &StubKey) -> Option<Calculator> {
        lock(&self.inner).bindings.get(key).cloned()
    }

    /// Register a repeatable return value and bind the seam in one step.
    pub fn stub(
        &self,
        key: StubKey,
        specs: Vec<ArgSpec>,
        value: Value,
    ) -> Result<(), ConfigurationError> {
        self.register(key, specs, Payload::Return(value))
    }

    /// Register a consumable value stream and bind the seam in one step.
    pub fn stub_stream(
        &self,
        key: StubKey,
        specs: Vec<ArgSpec>,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<(), ConfigurationError> {
        self.register(key, specs, Payload::stream(values))
    }

    fn register(
        &self,
        key: StubKey,
        specs: Vec<ArgSpec>,
        payload: Payload,
    ) -> Result<(), ConfigurationError> {
        let arity = key.arity();
        let calculator = self.make_calculator(key.clone(), arity)?;
        if specs.len() != arity {
            return Err(ConfigurationError::ArityMismatch {
                key,
                arity: specs.len(),
            });
        }
        self.add_stub(key.clone(), specs, payload);
        self.bind(key.owner(), key.function(), arity, calculator)
    }

    // -------------------------------------------------------------------------
    // Call log
    // -------------------------------------------------------------------------

    pub(crate) fn record_call(&self, key: &StubKey, args: &[Value], outcome: CallOutcome) {
        let mut inner = lock(&self.inner);
        if inner.config.record_calls {
            inner.calls.push(CallRecord {
                key: key.clone(),
                args: args.to_vec(),
                outcome,
            });
        }
    }

    /// Recorded calls for `key`, oldest first. Empty unless `record_calls`
    /// is enabled.
    pub fn calls(&self, key: &StubKey) -> Vec<CallRecord> {
        lock(&self.inner)
            .calls
            .iter()
            .filter(|c| c.key == *key)
            .cloned()
            .collect()
    }

    /// Number of recorded calls for `key`.
    pub fn call_count(&self, key: &StubKey) -> usize {
        lock(&self.inner)
            .calls
            .iter()
            .filter(|c| c.key == *key)
            .count()
    }

    /// Clear stubs, bindings and the call log. Settings are kept.
    pub fn reset(&self) {
        let mut inner = lock(&self.inner);
        inner.store.clear();
        inner.bindings.clear();
        inner.calls.clear();
    }
}
