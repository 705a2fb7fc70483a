//! Error types for the Kestrel solver.

use thiserror::Error;

use crate::constraint::Constraint;
use crate::variable::Variable;

/// Errors surfaced by solver operations.
///
/// Every variant except `InternalSolverError` is an expected input error
/// arising from misuse of the public contract; the failed call leaves the
/// solver state unchanged, so callers can retry or ignore. The offending
/// constraint or variable is attached where one exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("the constraint has already been added to the solver")]
    DuplicateConstraint(Constraint),

    #[error("the constraint cannot be satisfied")]
    UnsatisfiableConstraint(Constraint),

    #[error("the constraint has not been added to the solver")]
    UnknownConstraint(Constraint),

    #[error("the variable is already registered as an edit variable")]
    DuplicateEditVariable(Variable),

    #[error("the variable is not registered as an edit variable")]
    UnknownEditVariable(Variable),

    #[error("an edit variable cannot have the required strength")]
    BadRequiredStrength,

    /// A consistency violation inside the solver. This indicates a bug in
    /// the solver itself, not a user error.
    #[error("internal solver error: {0}")]
    InternalSolverError(&'static str),
}
