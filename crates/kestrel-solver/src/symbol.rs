//! Internal tableau symbols.

use std::fmt;

/// The role a symbol plays in the tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SymbolKind {
    /// The "no symbol" sentinel.
    Invalid,
    /// An external variable, the actual unknowns being solved for.
    External,
    /// A slack variable introduced for an inequality constraint.
    Slack,
    /// An error variable introduced for a non-required constraint.
    Error,
    /// A dummy variable marking a required equality constraint.
    Dummy,
}

/// An internal solver unknown: a kind plus a monotonically increasing id.
///
/// Ids are assigned in creation order and break ties deterministically
/// during pivot selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Symbol {
    id: u64,
    kind: SymbolKind,
}

impl Symbol {
    pub(crate) fn new(id: u64, kind: SymbolKind) -> Self {
        Self { id, kind }
    }

    pub(crate) fn invalid() -> Self {
        Self {
            id: 0,
            kind: SymbolKind::Invalid,
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn is_invalid(&self) -> bool {
        self.kind == SymbolKind::Invalid
    }

    pub(crate) fn is_external(&self) -> bool {
        self.kind == SymbolKind::External
    }

    pub(crate) fn is_error(&self) -> bool {
        self.kind == SymbolKind::Error
    }

    pub(crate) fn is_dummy(&self) -> bool {
        self.kind == SymbolKind::Dummy
    }

    /// Slack and error symbols may enter or leave the basis during
    /// optimization; external and dummy symbols may not.
    pub(crate) fn is_pivotable(&self) -> bool {
        matches!(self.kind, SymbolKind::Slack | SymbolKind::Error)
    }

    /// Restricted symbols must keep a non-negative basic value.
    pub(crate) fn is_restricted(&self) -> bool {
        !self.is_external()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.kind {
            SymbolKind::Invalid => 'i',
            SymbolKind::External => 'v',
            SymbolKind::Slack => 's',
            SymbolKind::Error => 'e',
            SymbolKind::Dummy => 'd',
        };
        write!(f, "{}{}", letter, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivotability_by_kind() {
        assert!(Symbol::new(1, SymbolKind::Slack).is_pivotable());
        assert!(Symbol::new(2, SymbolKind::Error).is_pivotable());
        assert!(!Symbol::new(3, SymbolKind::External).is_pivotable());
        assert!(!Symbol::new(4, SymbolKind::Dummy).is_pivotable());
        assert!(!Symbol::invalid().is_pivotable());
    }

    #[test]
    fn display_uses_kind_letter() {
        assert_eq!(Symbol::new(7, SymbolKind::Error).to_string(), "e7");
        assert_eq!(Symbol::new(3, SymbolKind::External).to_string(), "v3");
    }
}
