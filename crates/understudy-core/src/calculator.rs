// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Return calculators: the callables a bound seam dispatches to.

use std::sync::{Mutex, Weak};

use serde_json::Value;

use crate::context::{lock, ContextInner, StubContext};
use crate::error::{ConfigurationError, Error, Result};
use crate::key::StubKey;

/// Largest arity a calculator can be built for.
pub const MAX_ARITY: usize = 6;

/// Fixed-arity callable that answers a seam from its context's stub store.
///
/// The calculator holds a weak handle on its context, so a binding stored in
/// the context does not keep the context alive. Invoking a calculator whose
/// context is gone behaves as if nothing was ever registered.
#[derive(Clone, Debug)]
pub struct Calculator {
    key: StubKey,
    arity: usize,
    context: Weak<Mutex<ContextInner>>,
}

impl Calculator {
    /// Seam this calculator answers.
    pub fn key(&self) -> &StubKey {
        &self.key
    }

    /// Exact number of arguments [`invoke`](Self::invoke) accepts.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Was this calculator built over the context behind `context`?
    pub(crate) fn serves(&self, context: &Weak<Mutex<ContextInner>>) -> bool {
        Weak::ptr_eq(&self.context, context)
    }

    /// Answer one call.
    ///
    /// # Errors
    ///
    /// [`Error::ArityMismatch`] if `args` has the wrong length, otherwise
    /// whatever [`StubStore::consume_stub`](crate::StubStore::consume_stub)
    /// reports.
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        if args.len() != self.arity {
            return Err(Error::ArityMismatch {
                key: self.key.clone(),
                expected: self.arity,
                actual: args.len(),
            });
        }
        let Some(context) = self.context.upgrade() else {
            return Err(Error::NoStubsRegistered {
                key: self.key.clone(),
            });
        };
        let mut inner = lock(&context);
        inner.store.consume_stub(&self.key, args)
    }
}

/// Build a calculator for `key` over `context`'s stub store.
///
/// # Errors
///
/// - [`ConfigurationError::ArityCeiling`] when `arity > MAX_ARITY`.
/// - [`ConfigurationError::ArityMismatch`] when `arity` disagrees with the
///   key's own arity.
pub fn make_calculator(
    context: &StubContext,
    key: StubKey,
    arity: usize,
) -> Result<Calculator, ConfigurationError> {
    if arity > MAX_ARITY {
        return Err(ConfigurationError::ArityCeiling {
            arity,
            max: MAX_ARITY,
        });
    }
    if arity != key.arity() {
        return Err(ConfigurationError::ArityMismatch { key, arity });
    }
    Ok(Calculator {
        key,
        arity,
        context: context.downgrade(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::Payload;
    use serde_json::json;

    #[test]
    fn arity_ceiling_is_enforced_at_build_time() {
        let ctx = StubContext::new();
        for arity in 0..=MAX_ARITY {
            assert!(make_calculator(&ctx, StubKey::new("M", "f", arity), arity).is_ok());
        }
        let err = make_calculator(&ctx, StubKey::new("M", "f", 7), 7).unwrap_err();
        assert_eq!(err, ConfigurationError::ArityCeiling { arity: 7, max: 6 });
    }

    #[test]
    fn arity_must_agree_with_key() {
        let ctx = StubContext::new();
        let err = make_calculator(&ctx, StubKey::new("M", "f", 2), 1).unwrap_err();
        assert!(matches!(err, ConfigurationError::ArityMismatch { arity: 1, .. }));
    }

    #[test]
    fn invoke_delegates_to_the_store() {
        let ctx = StubContext::new();
        let key = StubKey::new("Rates", "lookup", 2);
        ctx.add_stub(key.clone(), vec!["usd".into(), "eur".into()], Payload::Return(json!(0.9)));
        let calc = make_calculator(&ctx, key, 2).unwrap();

        assert_eq!(calc.invoke(&[json!("usd"), json!("eur")]).unwrap(), json!(0.9));
        assert!(matches!(
            calc.invoke(&[json!("usd"), json!("gbp")]),
            Err(Error::NoMatchingStub { .. })
        ));
    }

    #[test]
    fn invoke_rejects_wrong_argument_count() {
        let ctx = StubContext::new();
        let calc = make_calculator(&ctx, StubKey::new("M", "f", 1), 1).unwrap();
        let err = calc.invoke(&[]).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { expected: 1, actual: 0, .. }));
    }

    #[test]
    fn calculator_outliving_its_context_reports_nothing_registered() {
        let ctx = StubContext::new();
        let key = StubKey::new("M", "f", 0);
        ctx.add_stub(key.clone(), vec![], Payload::Return(json!(1)));
        let calc = make_calculator(&ctx, key.clone(), 0).unwrap();
        drop(ctx);
        assert_eq!(calc.invoke(&[]).unwrap_err(), Error::NoStubsRegistered { key });
    }
}
