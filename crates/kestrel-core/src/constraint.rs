//! Constraints over linear expressions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::expression::Expression;
use crate::strength::Strength;

/// The relational operator of a constraint, relating its expression to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationalOperator::LessOrEqual => write!(f, "<="),
            RelationalOperator::Equal => write!(f, "=="),
            RelationalOperator::GreaterOrEqual => write!(f, ">="),
        }
    }
}

#[derive(Debug)]
struct ConstraintData {
    expression: Expression,
    op: RelationalOperator,
    strength: Strength,
}

/// A constraint in the canonical `expression OP 0` form.
///
/// A constraint is immutable once built, and cloning is cheap: clones share
/// the same underlying allocation. Equality and hashing follow that
/// allocation identity, so two structurally identical constraints built
/// separately are distinct constraints, while a clone is the same one.
#[derive(Debug, Clone)]
pub struct Constraint(Arc<ConstraintData>);

impl Constraint {
    /// Create a new constraint. The strength is clipped into the valid
    /// range; the expression is already coalesced by construction.
    pub fn new(expression: Expression, op: RelationalOperator, strength: Strength) -> Self {
        Self(Arc::new(ConstraintData {
            expression,
            op,
            strength: Strength::clip(strength.raw()),
        }))
    }

    /// The constraint's expression, related to zero by its operator.
    pub fn expression(&self) -> &Expression {
        &self.0.expression
    }

    /// The relational operator.
    pub fn op(&self) -> RelationalOperator {
        self.0.op
    }

    /// The constraint strength.
    pub fn strength(&self) -> Strength {
        self.0.strength
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} 0 | strength: {}",
            self.0.expression,
            self.0.op,
            self.0.strength.raw()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn identity_is_per_allocation() {
        let x = Variable::new();
        let a = Constraint::new(x - 10.0, RelationalOperator::Equal, Strength::REQUIRED);
        let b = Constraint::new(x - 10.0, RelationalOperator::Equal, Strength::REQUIRED);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn strength_is_clipped() {
        let x = Variable::new();
        let c = Constraint::new(
            Expression::from_variable(x),
            RelationalOperator::Equal,
            Strength::clip(f64::MAX),
        );
        assert!(c.strength().is_required());
    }
}
