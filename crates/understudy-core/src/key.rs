// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seam identity: `(owner, function, arity)`.

use std::fmt;

/// Identifies one callable seam inside an execution context.
///
/// Two stubs sharing a key are candidates for the same lookup. The `Display`
/// impl renders `owner.function/arity`, the form used in every diagnostic.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StubKey {
    owner: String,
    function: String,
    arity: usize,
}

impl StubKey {
    /// Create a key for `owner.function/arity`.
    pub fn new(owner: impl Into<String>, function: impl Into<String>, arity: usize) -> Self {
        Self {
            owner: owner.into(),
            function: function.into(),
            arity,
        }
    }

    /// Canonical owner identity (module, type or component name).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Function name at the seam.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Number of positional arguments the seam takes.
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for StubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/{}", self.owner, self.function, self.arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_seam() {
        let key = StubKey::new("Billing", "charge", 2);
        assert_eq!(key.to_string(), "Billing.charge/2");
    }

    #[test]
    fn arity_is_part_of_identity() {
        assert_ne!(StubKey::new("M", "f", 1), StubKey::new("M", "f", 2));
        assert_eq!(StubKey::new("M", "f", 1), StubKey::new("M", "f", 1));
    }
}
