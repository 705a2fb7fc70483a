//! Core constraint model for the Kestrel linear arithmetic solver.
//!
//! This crate defines the pure, solver-independent pieces of the system:
//! [`Variable`] identities, [`Expression`] arithmetic, [`Strength`]
//! priorities, [`Constraint`] construction, and the [`SolverError`]
//! taxonomy. The simplex engine that consumes them lives in
//! `kestrel-solver`.

mod constraint;
mod error;
mod expression;
mod strength;
mod variable;

pub use constraint::{Constraint, RelationalOperator};
pub use error::SolverError;
pub use expression::{Expression, Term};
pub use strength::Strength;
pub use variable::Variable;
