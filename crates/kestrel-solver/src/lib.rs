//! An incremental solver for systems of prioritized linear constraints,
//! based on the Cassowary algorithm.
//!
//! Constraints are linear equalities or inequalities over [`Variable`]s,
//! each carrying a [`Strength`]. The solver keeps a simplex tableau
//! incrementally up to date as constraints are added and removed, and
//! supports a dual-simplex fast path ([`Solver::suggest_value`]) for
//! interactively driving designated edit variables.
//!
//! ```
//! use kestrel_solver::{Constraint, RelationalOperator, Solver, Strength, Variable};
//!
//! let mut solver = Solver::new();
//! let left = Variable::new();
//! let width = Variable::new();
//! let right = Variable::new();
//!
//! // right == left + width
//! solver
//!     .add_constraint(Constraint::new(
//!         left + width - right,
//!         RelationalOperator::Equal,
//!         Strength::REQUIRED,
//!     ))
//!     .unwrap();
//! solver.add_edit_variable(left, Strength::STRONG).unwrap();
//! solver.add_edit_variable(width, Strength::STRONG).unwrap();
//!
//! solver.suggest_value(left, 10.0).unwrap();
//! solver.suggest_value(width, 80.0).unwrap();
//! solver.update_variables();
//! assert_eq!(solver.value(right), 90.0);
//! ```

mod dump;
mod row;
mod solver;
mod symbol;
mod tableau;

pub use kestrel_core::{
    Constraint, Expression, RelationalOperator, SolverError, Strength, Term, Variable,
};
pub use solver::Solver;
