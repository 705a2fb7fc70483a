//! Linear expressions over variables.
//!
//! An [`Expression`] is a sum of `coefficient * variable` terms plus a
//! constant. Building one is pure: duplicate variables are coalesced and
//! zero-coefficient terms are pruned, with no solver interaction. The
//! `std::ops` impls below let constraints be written in natural arithmetic
//! form, e.g. `left + width - right`.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use indexmap::IndexMap;

use crate::variable::Variable;

/// Tolerance below which a coefficient is treated as zero.
const EPSILON: f64 = 1e-8;

/// A single `coefficient * variable` product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub variable: Variable,
    pub coefficient: f64,
}

impl Term {
    /// Create a new term.
    pub fn new(variable: Variable, coefficient: f64) -> Self {
        Self {
            variable,
            coefficient,
        }
    }
}

/// A linear expression: a constant plus a sum of weighted variables.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    terms: IndexMap<Variable, f64>,
    constant: f64,
}

impl Expression {
    /// Create an empty expression (the constant zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a constant expression.
    pub fn from_constant(value: f64) -> Self {
        Self {
            terms: IndexMap::new(),
            constant: value,
        }
    }

    /// Create an expression from a single term.
    pub fn from_term(term: Term) -> Self {
        let mut expr = Self::new();
        expr.add_variable(term.variable, term.coefficient);
        expr
    }

    /// Create an expression holding one variable with coefficient 1.
    pub fn from_variable(variable: Variable) -> Self {
        Self::from_term(Term::new(variable, 1.0))
    }

    /// The constant part of the expression.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Set the constant part of the expression.
    pub fn set_constant(&mut self, value: f64) {
        self.constant = value;
    }

    /// Add `coefficient * variable`, coalescing with any existing term for
    /// the same variable and pruning the entry if it cancels to zero.
    pub fn add_variable(&mut self, variable: Variable, coefficient: f64) {
        let entry = self.terms.entry(variable).or_insert(0.0);
        *entry += coefficient;
        if entry.abs() < EPSILON {
            self.terms.shift_remove(&variable);
        }
    }

    /// Add `multiplier * other` to this expression.
    pub fn add_expression(&mut self, other: &Expression, multiplier: f64) {
        self.constant += other.constant * multiplier;
        for (&variable, &coefficient) in &other.terms {
            self.add_variable(variable, coefficient * multiplier);
        }
    }

    /// Multiply the expression by a scalar in place.
    pub fn scale(&mut self, scalar: f64) {
        self.constant *= scalar;
        for coefficient in self.terms.values_mut() {
            *coefficient *= scalar;
        }
    }

    /// The coefficient for a variable, or 0 if absent.
    pub fn coefficient(&self, variable: Variable) -> f64 {
        self.terms.get(&variable).copied().unwrap_or(0.0)
    }

    /// Whether the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the `(variable, coefficient)` terms.
    pub fn terms(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.terms.iter().map(|(&v, &c)| (v, c))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.constant)?;
        for (variable, coefficient) in &self.terms {
            write!(f, " + {} * {}", coefficient, variable)?;
        }
        Ok(())
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::from_constant(value)
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::from_variable(variable)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Expression::from_term(term)
    }
}

// --- Variable arithmetic ---

impl Mul<f64> for Variable {
    type Output = Term;
    fn mul(self, rhs: f64) -> Term {
        Term::new(self, rhs)
    }
}

impl Mul<Variable> for f64 {
    type Output = Term;
    fn mul(self, rhs: Variable) -> Term {
        Term::new(rhs, self)
    }
}

impl Div<f64> for Variable {
    type Output = Term;
    fn div(self, rhs: f64) -> Term {
        Term::new(self, 1.0 / rhs)
    }
}

impl Neg for Variable {
    type Output = Term;
    fn neg(self) -> Term {
        Term::new(self, -1.0)
    }
}

impl Add<f64> for Variable {
    type Output = Expression;
    fn add(self, rhs: f64) -> Expression {
        Expression::from_variable(self) + rhs
    }
}

impl Add<Variable> for f64 {
    type Output = Expression;
    fn add(self, rhs: Variable) -> Expression {
        rhs + self
    }
}

impl Sub<f64> for Variable {
    type Output = Expression;
    fn sub(self, rhs: f64) -> Expression {
        Expression::from_variable(self) - rhs
    }
}

impl Sub<Variable> for f64 {
    type Output = Expression;
    fn sub(self, rhs: Variable) -> Expression {
        Expression::from_constant(self) - rhs
    }
}

impl Add<Variable> for Variable {
    type Output = Expression;
    fn add(self, rhs: Variable) -> Expression {
        Expression::from_variable(self) + rhs
    }
}

impl Sub<Variable> for Variable {
    type Output = Expression;
    fn sub(self, rhs: Variable) -> Expression {
        Expression::from_variable(self) - rhs
    }
}

impl Add<Term> for Variable {
    type Output = Expression;
    fn add(self, rhs: Term) -> Expression {
        Expression::from_variable(self) + rhs
    }
}

impl Sub<Term> for Variable {
    type Output = Expression;
    fn sub(self, rhs: Term) -> Expression {
        Expression::from_variable(self) - rhs
    }
}

// --- Term arithmetic ---

impl Mul<f64> for Term {
    type Output = Term;
    fn mul(self, rhs: f64) -> Term {
        Term::new(self.variable, self.coefficient * rhs)
    }
}

impl Mul<Term> for f64 {
    type Output = Term;
    fn mul(self, rhs: Term) -> Term {
        rhs * self
    }
}

impl Div<f64> for Term {
    type Output = Term;
    fn div(self, rhs: f64) -> Term {
        Term::new(self.variable, self.coefficient / rhs)
    }
}

impl Neg for Term {
    type Output = Term;
    fn neg(self) -> Term {
        Term::new(self.variable, -self.coefficient)
    }
}

impl Add<f64> for Term {
    type Output = Expression;
    fn add(self, rhs: f64) -> Expression {
        Expression::from_term(self) + rhs
    }
}

impl Sub<f64> for Term {
    type Output = Expression;
    fn sub(self, rhs: f64) -> Expression {
        Expression::from_term(self) - rhs
    }
}

impl Add<Term> for Term {
    type Output = Expression;
    fn add(self, rhs: Term) -> Expression {
        Expression::from_term(self) + rhs
    }
}

impl Sub<Term> for Term {
    type Output = Expression;
    fn sub(self, rhs: Term) -> Expression {
        Expression::from_term(self) - rhs
    }
}

impl Add<Variable> for Term {
    type Output = Expression;
    fn add(self, rhs: Variable) -> Expression {
        Expression::from_term(self) + rhs
    }
}

impl Sub<Variable> for Term {
    type Output = Expression;
    fn sub(self, rhs: Variable) -> Expression {
        Expression::from_term(self) - rhs
    }
}

// --- Expression arithmetic ---

impl Add<f64> for Expression {
    type Output = Expression;
    fn add(mut self, rhs: f64) -> Expression {
        self.constant += rhs;
        self
    }
}

impl Add<Expression> for f64 {
    type Output = Expression;
    fn add(self, rhs: Expression) -> Expression {
        rhs + self
    }
}

impl Sub<f64> for Expression {
    type Output = Expression;
    fn sub(mut self, rhs: f64) -> Expression {
        self.constant -= rhs;
        self
    }
}

impl Sub<Expression> for f64 {
    type Output = Expression;
    fn sub(self, rhs: Expression) -> Expression {
        -rhs + self
    }
}

impl Add<Variable> for Expression {
    type Output = Expression;
    fn add(mut self, rhs: Variable) -> Expression {
        self.add_variable(rhs, 1.0);
        self
    }
}

impl Sub<Variable> for Expression {
    type Output = Expression;
    fn sub(mut self, rhs: Variable) -> Expression {
        self.add_variable(rhs, -1.0);
        self
    }
}

impl Add<Term> for Expression {
    type Output = Expression;
    fn add(mut self, rhs: Term) -> Expression {
        self.add_variable(rhs.variable, rhs.coefficient);
        self
    }
}

impl Sub<Term> for Expression {
    type Output = Expression;
    fn sub(mut self, rhs: Term) -> Expression {
        self.add_variable(rhs.variable, -rhs.coefficient);
        self
    }
}

impl Add<Expression> for Expression {
    type Output = Expression;
    fn add(mut self, rhs: Expression) -> Expression {
        self.add_expression(&rhs, 1.0);
        self
    }
}

impl Sub<Expression> for Expression {
    type Output = Expression;
    fn sub(mut self, rhs: Expression) -> Expression {
        self.add_expression(&rhs, -1.0);
        self
    }
}

impl Mul<f64> for Expression {
    type Output = Expression;
    fn mul(mut self, rhs: f64) -> Expression {
        self.scale(rhs);
        self
    }
}

impl Mul<Expression> for f64 {
    type Output = Expression;
    fn mul(self, rhs: Expression) -> Expression {
        rhs * self
    }
}

impl Div<f64> for Expression {
    type Output = Expression;
    fn div(mut self, rhs: f64) -> Expression {
        self.scale(1.0 / rhs);
        self
    }
}

impl Neg for Expression {
    type Output = Expression;
    fn neg(mut self) -> Expression {
        self.scale(-1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_variables_coalesce() {
        let x = Variable::new();
        let expr = x + 3.0 * x;
        assert_eq!(expr.coefficient(x), 4.0);
        assert_eq!(expr.terms().count(), 1);
    }

    #[test]
    fn cancelled_terms_are_pruned() {
        let x = Variable::new();
        let expr = x - x;
        assert!(expr.is_constant());
        assert_eq!(expr.constant(), 0.0);
    }

    #[test]
    fn arithmetic_builds_expected_terms() {
        let x = Variable::new();
        let y = Variable::new();
        let expr = 2.0 * x - y / 2.0 + 5.0;
        assert_eq!(expr.coefficient(x), 2.0);
        assert_eq!(expr.coefficient(y), -0.5);
        assert_eq!(expr.constant(), 5.0);
    }

    #[test]
    fn scaling_applies_to_constant_and_terms() {
        let x = Variable::new();
        let expr = (x + 3.0) * 2.0;
        assert_eq!(expr.coefficient(x), 2.0);
        assert_eq!(expr.constant(), 6.0);
    }

    #[test]
    fn subtracting_expressions_merges_terms() {
        let x = Variable::new();
        let y = Variable::new();
        let expr = (x + y) - (x + 1.0);
        assert_eq!(expr.coefficient(x), 0.0);
        assert_eq!(expr.coefficient(y), 1.0);
        assert_eq!(expr.constant(), -1.0);
    }
}
