//! External solver variables.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// An external, user-visible unknown.
///
/// A `Variable` is a lightweight copyable handle with a stable identity.
/// Clients create variables, reference them in constraints, and read their
/// resolved values back from the solver; the solver never owns variable
/// lifetime, only an identity-keyed association to its internal symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(u64);

impl Variable {
    /// Create a new variable with a fresh identity.
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The stable numeric identity of this variable.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities_are_distinct() {
        let a = Variable::new();
        let b = Variable::new();
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn copies_share_identity() {
        let a = Variable::new();
        let b = a;
        assert_eq!(a, b);
    }
}
