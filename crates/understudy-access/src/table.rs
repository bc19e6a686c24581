// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named accessor sets declared from `(name, path)` rows.
//!
//! A table groups the getters one component exposes over its state, all under
//! the same owner identity. Declaring the rows up front validates every path
//! before any of them is read.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;
use understudy_core::{ConfigurationError, Result, StubContext};

use crate::accessor::build_accessor;
use crate::overridable::AccessorSeam;
use crate::path::Segment;

/// Accessors for one owner, looked up by name.
#[derive(Clone, Debug)]
pub struct AccessorTable {
    owner: String,
    accessors: BTreeMap<String, AccessorSeam>,
}

impl AccessorTable {
    /// Declare one accessor per row.
    ///
    /// # Errors
    ///
    /// Any path [`ConfigurationError`], or
    /// [`ConfigurationError::DuplicateAccessor`] when a name repeats.
    pub fn declare<'n>(
        owner: &str,
        rows: impl IntoIterator<Item = (&'n str, Vec<Segment>)>,
    ) -> Result<Self, ConfigurationError> {
        let mut accessors = BTreeMap::new();
        for (name, segments) in rows {
            if accessors.contains_key(name) {
                return Err(ConfigurationError::DuplicateAccessor {
                    name: name.to_string(),
                });
            }
            let seam = AccessorSeam::new(owner, name, build_accessor(segments)?)?;
            accessors.insert(name.to_string(), seam);
        }
        debug!(owner, accessors = accessors.len(), "accessor table declared");
        Ok(Self {
            owner: owner.to_string(),
            accessors,
        })
    }

    /// Owner identity shared by every accessor in the table.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Accessor called `name`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownAccessor`] when the table has no such name.
    pub fn accessor(&self, name: &str) -> Result<&AccessorSeam, ConfigurationError> {
        self.accessors
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownAccessor {
                name: name.to_string(),
            })
    }

    /// Read `name` under `root` through its seam in `ctx`.
    pub fn get(&self, ctx: &StubContext, name: &str, root: &Value) -> Result<Value> {
        self.accessor(name)?.get(ctx, root)
    }

    /// Declared names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }
}
