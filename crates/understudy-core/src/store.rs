// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-context stub storage.
//!
//! [`StubStore`] maps a [`StubKey`] to an ordered list of [`StubEntry`]s.
//!
//! # Ordering Invariants
//!
//! - Lookup tries entries in registration order; the first match wins.
//! - Re-registering an identical spec list replaces the entry *in place*, so
//!   it keeps its original position and the list length does not grow.
//! - Only [`Payload::Stream`] entries mutate on lookup (the head is consumed).

use std::collections::{BTreeMap, VecDeque};

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::key::StubKey;
use crate::matcher::{matches, ArgSpec};

/// What a matching entry yields.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Returned on every match.
    Return(Value),
    /// Each match consumes and returns the head.
    Stream(VecDeque<Value>),
}

impl Payload {
    /// Build a stream payload from any sequence of values.
    pub fn stream(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Stream(values.into_iter().collect())
    }
}

/// One registered stub: argument pattern plus payload.
#[derive(Clone, Debug)]
pub struct StubEntry {
    specs: Vec<ArgSpec>,
    payload: Payload,
}

impl StubEntry {
    /// Argument-spec list, one per parameter position.
    pub fn specs(&self) -> &[ArgSpec] {
        &self.specs
    }

    /// Current payload. For streams this is the unconsumed tail.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Key-addressed stub collection owned by one execution context.
#[derive(Default, Debug)]
pub struct StubStore {
    entries: BTreeMap<StubKey, Vec<StubEntry>>,
}

impl StubStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stub, replacing an existing entry with an identical spec
    /// list in place or appending otherwise.
    pub fn add_stub(&mut self, key: StubKey, specs: Vec<ArgSpec>, payload: Payload) {
        debug!(%key, specs = specs.len(), "registering stub");
        let list = self.entries.entry(key).or_default();
        if let Some(position) = list.iter().position(|e| e.specs == specs) {
            list[position].payload = payload;
            debug!(position, "stub replaced in place");
            return;
        }
        list.push(StubEntry { specs, payload });
        debug!(entries = list.len(), "stub appended");
    }

    /// Resolve a call against the stored entries for `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::NoStubsRegistered`] when nothing is stored under `key`.
    /// - [`Error::NoMatchingStub`] when no entry accepts `args`.
    /// - [`Error::StreamExhausted`] when the first matching entry is a stream
    ///   with no values left.
    pub fn consume_stub(&mut self, key: &StubKey, args: &[Value]) -> Result<Value> {
        let Some(list) = self.entries.get_mut(key) else {
            return Err(Error::NoStubsRegistered { key: key.clone() });
        };
        let Some((index, entry)) = list
            .iter_mut()
            .enumerate()
            .find(|(_, e)| matches(&e.specs, args))
        else {
            return Err(Error::NoMatchingStub {
                key: key.clone(),
                args: args.to_vec(),
            });
        };
        trace!(%key, index, "stub hit");
        match &mut entry.payload {
            Payload::Return(value) => Ok(value.clone()),
            Payload::Stream(values) => values.pop_front().ok_or_else(|| Error::StreamExhausted {
                key: key.clone(),
                args: args.to_vec(),
            }),
        }
    }

    /// Entries registered under `key`, in lookup order.
    pub fn entries(&self, key: &StubKey) -> &[StubEntry] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// Number of entries registered under `key`.
    pub fn entry_count(&self, key: &StubKey) -> usize {
        self.entries(key).len()
    }

    /// Does `key` have any entries at all?
    pub fn contains(&self, key: &StubKey) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys with entries, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &StubKey> {
        self.entries.keys()
    }

    /// Drop every entry for `key`. Returns `true` if anything was removed.
    pub fn remove(&mut self, key: &StubKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry for every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if no stubs are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
