// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Production-side call seams.
//!
//! A [`Seam`] wraps a real implementation under a `(owner, function, arity)`
//! identity. Code under test calls through the seam with the context it was
//! handed; if a calculator is bound for the seam in that context the call is
//! answered from stubs, otherwise the context's [`UnboundPolicy`] decides.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use understudy_core::{Seam, StubContext};
//!
//! let double = Seam::new("Math", "double", 1, |args| {
//!     Ok(json!(args[0].as_i64().unwrap_or_default() * 2))
//! })
//! .unwrap();
//!
//! let ctx = StubContext::new();
//! assert_eq!(double.call(&ctx, &[json!(4)]).unwrap(), json!(8));
//!
//! ctx.stub(double.key().clone(), vec![4.into()], json!(-1)).unwrap();
//! assert_eq!(double.call(&ctx, &[json!(4)]).unwrap(), json!(-1));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::calculator::MAX_ARITY;
use crate::config::UnboundPolicy;
use crate::context::{CallOutcome, StubContext};
use crate::error::{ConfigurationError, Error, Result};
use crate::key::StubKey;

type Implementation = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// An interceptable call site.
#[derive(Clone)]
pub struct Seam {
    key: StubKey,
    real: Arc<Implementation>,
}

impl Seam {
    /// Declare a seam over `real`.
    ///
    /// `real` receives exactly `arity` arguments.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ArityCeiling`] when `arity > MAX_ARITY`.
    pub fn new(
        owner: &str,
        function: &str,
        arity: usize,
        real: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Result<Self, ConfigurationError> {
        if arity > MAX_ARITY {
            return Err(ConfigurationError::ArityCeiling {
                arity,
                max: MAX_ARITY,
            });
        }
        Ok(Self {
            key: StubKey::new(owner, function, arity),
            real: Arc::new(real),
        })
    }

    /// Identity of this seam.
    pub fn key(&self) -> &StubKey {
        &self.key
    }

    /// Call through the seam in `ctx`.
    ///
    /// # Errors
    ///
    /// [`Error::ArityMismatch`] for a wrong argument count; otherwise any
    /// error from the bound calculator, the real implementation, or
    /// [`Error::NoStubsRegistered`] under [`UnboundPolicy::Fail`].
    pub fn call(&self, ctx: &StubContext, args: &[Value]) -> Result<Value> {
        let result = self.dispatch(ctx, args);
        if let Err(err) = &result {
            ctx.record_call(&self.key, args, CallOutcome::Failed(err.to_string()));
        }
        result
    }

    fn dispatch(&self, ctx: &StubContext, args: &[Value]) -> Result<Value> {
        if args.len() != self.key.arity() {
            return Err(Error::ArityMismatch {
                key: self.key.clone(),
                expected: self.key.arity(),
                actual: args.len(),
            });
        }
        if let Some(calculator) = ctx.calculator_for(&self.key) {
            trace!(key = %self.key, "seam answered by stub");
            let value = calculator.invoke(args)?;
            ctx.record_call(&self.key, args, CallOutcome::Stubbed(value.clone()));
            return Ok(value);
        }
        match ctx.config().unbound {
            UnboundPolicy::PassThrough => {
                trace!(key = %self.key, "seam passed through");
                let value = (self.real)(args)?;
                ctx.record_call(&self.key, args, CallOutcome::PassedThrough(value.clone()));
                Ok(value)
            }
            UnboundPolicy::Fail => Err(Error::NoStubsRegistered {
                key: self.key.clone(),
            }),
        }
    }

    /// Call the real implementation, bypassing any binding.
    pub fn call_real(&self, args: &[Value]) -> Result<Value> {
        (self.real)(args)
    }
}

impl fmt::Debug for Seam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seam").field("key", &self.key).finish_non_exhaustive()
    }
}
