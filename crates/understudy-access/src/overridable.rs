// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Accessors that tests can override like any other seam.
//!
//! An [`AccessorSeam`] exposes an [`Accessor`] as `owner.name/1`. Code under
//! test reads through [`AccessorSeam::get`] with its context; tests either let
//! the traversal run against a real root or stub the getter outright.

use serde_json::Value;
use understudy_core::{ArgSpec, ConfigurationError, Error, Result, Seam, StubContext, StubKey};

use crate::accessor::Accessor;

/// A named, stubbable accessor.
#[derive(Clone, Debug)]
pub struct AccessorSeam {
    name: String,
    accessor: Accessor,
    seam: Seam,
}

impl AccessorSeam {
    /// Expose `accessor` as the seam `owner.name/1`.
    pub fn new(owner: &str, name: &str, accessor: Accessor) -> Result<Self, ConfigurationError> {
        let traversal = accessor.clone();
        let key = StubKey::new(owner, name, 1);
        let seam = Seam::new(owner, name, 1, move |args| match args {
            [root] => traversal.get(root),
            _ => Err(Error::ArityMismatch {
                key: key.clone(),
                expected: 1,
                actual: args.len(),
            }),
        })?;
        Ok(Self {
            name: name.to_string(),
            accessor,
            seam,
        })
    }

    /// Accessor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying traversal.
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// Seam identity (`owner.name/1`).
    pub fn key(&self) -> &StubKey {
        self.seam.key()
    }

    /// Read through the seam: stubbed if bound in `ctx`, traversal otherwise.
    pub fn get(&self, ctx: &StubContext, root: &Value) -> Result<Value> {
        self.seam.call(ctx, std::slice::from_ref(root))
    }

    /// Make the getter return `value` for every root in `ctx`.
    pub fn stub(&self, ctx: &StubContext, value: Value) -> Result<(), ConfigurationError> {
        ctx.stub(self.key().clone(), vec![ArgSpec::Any], value)
    }

    /// Make the getter return `value` for roots accepted by `root`.
    pub fn stub_for(
        &self,
        ctx: &StubContext,
        root: ArgSpec,
        value: Value,
    ) -> Result<(), ConfigurationError> {
        ctx.stub(self.key().clone(), vec![root], value)
    }
}
