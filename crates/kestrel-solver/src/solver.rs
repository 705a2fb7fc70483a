//! The incremental constraint solver.
//!
//! This is an implementation of the Cassowary linear constraint solving
//! algorithm, as described in "The Cassowary Linear Arithmetic Constraint
//! Solving Algorithm" by Greg J. Badros and Alan Borning. It maintains a
//! dual-form simplex tableau so constraints can be added, removed, and
//! re-suggested incrementally instead of re-solving from scratch.

use indexmap::{IndexMap, IndexSet};
use kestrel_core::{
    Constraint, Expression, RelationalOperator, SolverError, Strength, Term, Variable,
};

use crate::row::{near_zero, Row};
use crate::symbol::{Symbol, SymbolKind};
use crate::tableau::Tableau;

/// The marker symbols tracking a constraint's movement in the tableau.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tag {
    pub(crate) marker: Symbol,
    pub(crate) other: Symbol,
}

/// Book-keeping for one edit variable.
#[derive(Debug)]
pub(crate) struct EditInfo {
    tag: Tag,
    constraint: Constraint,
    constant: f64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct VarData {
    pub(crate) value: f64,
    pub(crate) symbol: Symbol,
}

/// Which objective row an optimization pass minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectiveKind {
    Main,
    Artificial,
}

/// An incremental solver for systems of prioritized linear constraints.
///
/// The solver is not internally concurrent: every mutating operation takes
/// `&mut self` and either completes or fails atomically, leaving the
/// tableau unchanged on failure. Embeddings that share a solver across
/// threads wrap it in a mutex (or equivalent single-owner discipline);
/// nothing here suspends or spawns.
#[derive(Debug)]
pub struct Solver {
    pub(crate) cns: IndexMap<Constraint, Tag>,
    pub(crate) vars: IndexMap<Variable, VarData>,
    pub(crate) edits: IndexMap<Variable, EditInfo>,
    pub(crate) tableau: Tableau,
    pub(crate) objective: Row,
    pub(crate) artificial: Option<Row>,
    changed: IndexSet<Variable>,
    next_symbol_id: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new, empty solver.
    pub fn new() -> Self {
        Self {
            cns: IndexMap::new(),
            vars: IndexMap::new(),
            edits: IndexMap::new(),
            tableau: Tableau::default(),
            objective: Row::default(),
            artificial: None,
            changed: IndexSet::new(),
            next_symbol_id: 1,
        }
    }

    /// Add a constraint to the solver.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), SolverError> {
        if self.cns.contains_key(&constraint) {
            return Err(SolverError::DuplicateConstraint(constraint));
        }

        // Creating a row registers symbols for the constraint's variables.
        // If the add fails those registrations linger in the variable map,
        // which is harmless: the rows and objective are untouched.
        let (mut row, tag) = self.create_row(&constraint);
        let mut subject = self.choose_subject(&row, &tag);

        // If the row is composed entirely of dummy symbols, a zero constant
        // means the constraint is redundant and its marker can enter the
        // basis directly; a non-zero constant means a conflict among
        // required constraints.
        if subject.is_invalid() && row.all_dummies() {
            if !near_zero(row.constant()) {
                return Err(SolverError::UnsatisfiableConstraint(constraint));
            }
            subject = tag.marker;
        }

        // With no usable subject the row must enter through an artificial
        // variable; failure there also means an unsatisfiable constraint.
        if subject.is_invalid() {
            if !self.add_with_artificial_variable(&row)? {
                return Err(SolverError::UnsatisfiableConstraint(constraint));
            }
        } else {
            row.solve_for(subject);
            self.substitute(subject, &row);
            self.tableau.add_row(subject, row);
        }

        self.cns.insert(constraint, tag);

        // Optimizing after every insertion keeps the average system small
        // and the solver consistent after each call.
        self.optimize(ObjectiveKind::Main)
    }

    /// Add a batch of constraints, stopping at the first failure.
    pub fn add_constraints<I>(&mut self, constraints: I) -> Result<(), SolverError>
    where
        I: IntoIterator<Item = Constraint>,
    {
        for constraint in constraints {
            self.add_constraint(constraint)?;
        }
        Ok(())
    }

    /// Remove a constraint from the solver.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> Result<(), SolverError> {
        let tag = self
            .cns
            .shift_remove(constraint)
            .ok_or_else(|| SolverError::UnknownConstraint(constraint.clone()))?;

        // The error effects must leave the objective *before* the marker is
        // pivoted out, or substitutions into the objective will corrupt it.
        self.remove_constraint_effects(constraint, &tag);

        // If the marker is basic, dropping its row removes the constraint.
        // Otherwise pivot the marker into the basis first.
        if self.tableau.remove_row(tag.marker).is_none() {
            let (leaving, mut row) = self
                .marker_leaving_row(tag.marker)
                .ok_or(SolverError::InternalSolverError("failed to find leaving row"))?;
            row.solve_for_symbols(leaving, tag.marker);
            self.substitute(tag.marker, &row);
        }

        self.optimize(ObjectiveKind::Main)
    }

    /// Test whether the solver contains the constraint.
    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.cns.contains_key(constraint)
    }

    /// Register an edit variable so values can be suggested for it.
    ///
    /// The strength must be below [`Strength::REQUIRED`]: an edit
    /// constraint has to stay relaxable for `suggest_value` to move it.
    pub fn add_edit_variable(
        &mut self,
        variable: Variable,
        strength: Strength,
    ) -> Result<(), SolverError> {
        if self.edits.contains_key(&variable) {
            return Err(SolverError::DuplicateEditVariable(variable));
        }
        let strength = Strength::clip(strength.raw());
        if strength.is_required() {
            return Err(SolverError::BadRequiredStrength);
        }

        let constraint = Constraint::new(
            Expression::from_term(Term::new(variable, 1.0)),
            RelationalOperator::Equal,
            strength,
        );
        self.add_constraint(constraint.clone())
            .map_err(|_| SolverError::InternalSolverError("failed to add edit constraint"))?;
        let tag = self.cns[&constraint];
        self.edits.insert(
            variable,
            EditInfo {
                tag,
                constraint,
                constant: 0.0,
            },
        );
        Ok(())
    }

    /// Remove an edit variable and its internal constraint.
    pub fn remove_edit_variable(&mut self, variable: Variable) -> Result<(), SolverError> {
        let info = self
            .edits
            .shift_remove(&variable)
            .ok_or(SolverError::UnknownEditVariable(variable))?;
        self.remove_constraint(&info.constraint).map_err(|err| match err {
            SolverError::UnknownConstraint(_) => {
                SolverError::InternalSolverError("edit constraint is not in the system")
            }
            other => other,
        })
    }

    /// Test whether the solver has an edit variable for `variable`.
    pub fn has_edit_variable(&self, variable: Variable) -> bool {
        self.edits.contains_key(&variable)
    }

    /// Suggest a value for an edit variable.
    ///
    /// This is the interactive fast path: the edit constraint's constant is
    /// perturbed by the delta and feasibility is restored with a bounded
    /// dual-simplex pass over the locally affected rows, never a full
    /// re-optimization.
    pub fn suggest_value(&mut self, variable: Variable, value: f64) -> Result<(), SolverError> {
        let (marker, other, delta) = {
            let info = self
                .edits
                .get_mut(&variable)
                .ok_or(SolverError::UnknownEditVariable(variable))?;
            let delta = value - info.constant;
            info.constant = value;
            (info.tag.marker, info.tag.other, delta)
        };

        // If either error symbol for the edit is basic, only its own row
        // shifts; otherwise the delta propagates through every row that
        // references the marker.
        if !self.tableau.adjust_basic(marker, -delta) && !self.tableau.adjust_basic(other, delta) {
            self.tableau.apply_delta(marker, delta);
        }
        self.dual_optimize()
    }

    /// Recompute the resolved value of every tracked variable.
    ///
    /// A basic variable takes its row's constant; a non-basic variable
    /// rests at zero. Only variables whose value actually moved are
    /// rewritten and recorded for [`Solver::fetch_changes`].
    pub fn update_variables(&mut self) {
        for (&variable, data) in &mut self.vars {
            let value = match self.tableau.row(data.symbol) {
                Some(row) => row.constant(),
                None => 0.0,
            };
            if value != data.value {
                data.value = value;
                self.changed.insert(variable);
            }
        }
    }

    /// Update all variables and drain the set changed since the last fetch.
    pub fn fetch_changes(&mut self) -> Vec<(Variable, f64)> {
        self.update_variables();
        let changed: Vec<Variable> = self.changed.drain(..).collect();
        changed
            .into_iter()
            .map(|v| (v, self.value(v)))
            .collect()
    }

    /// The resolved value recorded by the last [`Solver::update_variables`]
    /// call, or 0 for an unknown variable.
    pub fn value(&self, variable: Variable) -> f64 {
        self.vars.get(&variable).map(|data| data.value).unwrap_or(0.0)
    }

    /// Discard all constraints, edit variables, and tableau state,
    /// returning to the empty initial condition. Cheaper than dropping and
    /// recreating the solver since allocations are reused.
    pub fn reset(&mut self) {
        self.cns.clear();
        self.vars.clear();
        self.edits.clear();
        self.changed.clear();
        self.tableau.clear();
        self.objective = Row::default();
        self.artificial = None;
        self.next_symbol_id = 1;
    }

    fn new_symbol(&mut self, kind: SymbolKind) -> Symbol {
        let id = self.next_symbol_id;
        self.next_symbol_id += 1;
        Symbol::new(id, kind)
    }

    /// The symbol for a variable, creating and registering one on first use.
    fn var_symbol(&mut self, variable: Variable) -> Symbol {
        if let Some(data) = self.vars.get(&variable) {
            return data.symbol;
        }
        let symbol = self.new_symbol(SymbolKind::External);
        self.vars.insert(variable, VarData { value: 0.0, symbol });
        symbol
    }

    /// Build the augmented row for a constraint.
    ///
    /// Variable terms are converted to symbol cells, substituting any
    /// symbol that is currently basic with its row. The slack, error, and
    /// dummy symbols implied by the operator and strength are appended, and
    /// the error symbols are weighted into the objective. The returned row
    /// has a non-negative constant.
    fn create_row(&mut self, constraint: &Constraint) -> (Row, Tag) {
        let expr = constraint.expression();
        let mut row = Row::new(expr.constant());
        for (variable, coefficient) in expr.terms() {
            if near_zero(coefficient) {
                continue;
            }
            let symbol = self.var_symbol(variable);
            if let Some(basic) = self.tableau.row(symbol) {
                row.insert_row(basic, coefficient);
            } else {
                row.insert_symbol(symbol, coefficient);
            }
        }

        let strength = constraint.strength();
        let tag = match constraint.op() {
            RelationalOperator::LessOrEqual | RelationalOperator::GreaterOrEqual => {
                let coefficient = if constraint.op() == RelationalOperator::LessOrEqual {
                    1.0
                } else {
                    -1.0
                };
                let slack = self.new_symbol(SymbolKind::Slack);
                row.insert_symbol(slack, coefficient);
                if strength.is_required() {
                    Tag {
                        marker: slack,
                        other: Symbol::invalid(),
                    }
                } else {
                    let error = self.new_symbol(SymbolKind::Error);
                    row.insert_symbol(error, -coefficient);
                    self.objective.insert_symbol(error, strength.raw());
                    Tag {
                        marker: slack,
                        other: error,
                    }
                }
            }
            RelationalOperator::Equal => {
                if strength.is_required() {
                    let dummy = self.new_symbol(SymbolKind::Dummy);
                    row.insert_symbol(dummy, 1.0);
                    Tag {
                        marker: dummy,
                        other: Symbol::invalid(),
                    }
                } else {
                    let errplus = self.new_symbol(SymbolKind::Error);
                    let errminus = self.new_symbol(SymbolKind::Error);
                    row.insert_symbol(errplus, -1.0);
                    row.insert_symbol(errminus, 1.0);
                    self.objective.insert_symbol(errplus, strength.raw());
                    self.objective.insert_symbol(errminus, strength.raw());
                    Tag {
                        marker: errplus,
                        other: errminus,
                    }
                }
            }
        };

        if row.constant() < 0.0 {
            row.reverse_sign();
        }
        (row, tag)
    }

    /// Choose the initial basic symbol for a new row.
    ///
    /// An external symbol is preferred; failing that, the pivotable tag
    /// symbol with the most negative coefficient, which minimizes the
    /// immediate infeasibility introduced by the row.
    fn choose_subject(&self, row: &Row, tag: &Tag) -> Symbol {
        for (symbol, _) in row.cells() {
            if symbol.is_external() {
                return symbol;
            }
        }
        let mut subject = Symbol::invalid();
        let mut best = 0.0;
        for candidate in [tag.marker, tag.other] {
            if candidate.is_pivotable() {
                let coefficient = row.coefficient_for(candidate);
                if coefficient < best {
                    best = coefficient;
                    subject = candidate;
                }
            }
        }
        subject
    }

    /// Add the row to the tableau through an artificial variable.
    ///
    /// Returns false when the artificial objective cannot be driven to
    /// zero, meaning the constraint is unsatisfiable.
    fn add_with_artificial_variable(&mut self, row: &Row) -> Result<bool, SolverError> {
        let art = self.new_symbol(SymbolKind::Slack);
        self.tableau.add_row(art, row.clone());
        self.artificial = Some(row.clone());

        self.optimize(ObjectiveKind::Artificial)?;
        let success = match &self.artificial {
            Some(artificial) => near_zero(artificial.constant()),
            None => false,
        };
        self.artificial = None;

        // If the artificial symbol is still basic, pivot it out before
        // stripping its column from the system.
        if let Some(mut art_row) = self.tableau.remove_row(art) {
            if art_row.is_constant() {
                return Ok(success);
            }
            let entering = art_row.any_pivotable_symbol();
            if entering.is_invalid() {
                return Ok(false);
            }
            art_row.solve_for_symbols(art, entering);
            self.substitute(entering, &art_row);
            self.tableau.add_row(entering, art_row);
        }

        self.tableau.purge_symbol(art);
        self.objective.remove(art);
        Ok(success)
    }

    /// Substitute a symbol's new definition through the tableau and both
    /// objective rows.
    fn substitute(&mut self, symbol: Symbol, row: &Row) {
        self.tableau.substitute(symbol, row);
        self.objective.substitute(symbol, row);
        if let Some(artificial) = self.artificial.as_mut() {
            artificial.substitute(symbol, row);
        }
    }

    /// Phase-2 primal simplex: pivot while the objective has a negative
    /// coefficient, until the minimum is reached.
    fn optimize(&mut self, kind: ObjectiveKind) -> Result<(), SolverError> {
        loop {
            let entering = self.entering_symbol(kind);
            if entering.is_invalid() {
                return Ok(());
            }
            let (leaving, row) = self
                .leaving_row(entering)
                .ok_or(SolverError::InternalSolverError("the objective is unbounded"))?;
            let row = self.tableau.pivot(leaving, entering, row);
            self.objective.substitute(entering, row);
            if let Some(artificial) = self.artificial.as_mut() {
                artificial.substitute(entering, row);
            }
        }
    }

    /// Dual simplex: restore feasibility of rows queued as infeasible
    /// while keeping the objective optimal. Only the locally affected
    /// columns are touched.
    fn dual_optimize(&mut self) -> Result<(), SolverError> {
        while let Some(leaving) = self.tableau.pop_infeasible() {
            // The queue may hold rows that regained feasibility or left
            // the basis since they were pushed.
            let still_infeasible = self
                .tableau
                .row(leaving)
                .is_some_and(|row| row.constant() < 0.0);
            if !still_infeasible {
                continue;
            }
            let Some(row) = self.tableau.remove_row(leaving) else {
                continue;
            };
            let entering = self.dual_entering_symbol(&row);
            if entering.is_invalid() {
                return Err(SolverError::InternalSolverError("dual optimize failed"));
            }
            let row = self.tableau.pivot(leaving, entering, row);
            self.objective.substitute(entering, row);
        }
        Ok(())
    }

    /// The entering column for a primal pivot: the lowest-id non-dummy
    /// symbol with a negative objective coefficient (Bland's rule, which
    /// guarantees termination), or the invalid symbol at the optimum.
    fn entering_symbol(&self, kind: ObjectiveKind) -> Symbol {
        let objective = match (kind, &self.artificial) {
            (ObjectiveKind::Artificial, Some(artificial)) => artificial,
            _ => &self.objective,
        };
        objective
            .cells()
            .filter(|(symbol, value)| !symbol.is_dummy() && *value < 0.0)
            .map(|(symbol, _)| symbol)
            .min_by_key(Symbol::id)
            .unwrap_or_else(Symbol::invalid)
    }

    /// The leaving row for a primal pivot: minimum ratio test over
    /// restricted rows, ties broken by the lowest basic-symbol id. Returns
    /// `None` when the objective is unbounded below.
    fn leaving_row(&mut self, entering: Symbol) -> Option<(Symbol, Row)> {
        let mut ratio = f64::INFINITY;
        let mut found: Option<Symbol> = None;
        for (symbol, row) in self.tableau.rows() {
            if symbol.is_external() {
                continue;
            }
            let coefficient = row.coefficient_for(entering);
            if coefficient < 0.0 {
                let r = -row.constant() / coefficient;
                if r < ratio || (r == ratio && found.is_some_and(|f| symbol.id() < f.id())) {
                    ratio = r;
                    found = Some(symbol);
                }
            }
        }
        found.and_then(|symbol| self.tableau.remove_row(symbol).map(|row| (symbol, row)))
    }

    /// The entering symbol for a dual pivot: the positive-coefficient,
    /// non-dummy cell minimizing objective-coefficient / row-coefficient,
    /// ties broken by the lowest symbol id.
    fn dual_entering_symbol(&self, row: &Row) -> Symbol {
        let mut entering = Symbol::invalid();
        let mut ratio = f64::INFINITY;
        for (symbol, value) in row.cells() {
            if value > 0.0 && !symbol.is_dummy() {
                let r = self.objective.coefficient_for(symbol) / value;
                if r < ratio || (r == ratio && symbol.id() < entering.id()) {
                    ratio = r;
                    entering = symbol;
                }
            }
        }
        entering
    }

    /// The row a non-basic marker leaves through when its constraint is
    /// removed, chosen to disturb the solution as little as possible:
    /// restricted rows with a negative marker coefficient first (minimum
    /// ratio), then restricted rows with a positive coefficient (minimum
    /// ratio), then any external row referencing the marker.
    fn marker_leaving_row(&mut self, marker: Symbol) -> Option<(Symbol, Row)> {
        let mut r1 = f64::INFINITY;
        let mut r2 = f64::INFINITY;
        let mut first: Option<Symbol> = None;
        let mut second: Option<Symbol> = None;
        let mut third: Option<Symbol> = None;
        for (symbol, row) in self.tableau.rows() {
            let coefficient = row.coefficient_for(marker);
            if coefficient == 0.0 {
                continue;
            }
            if symbol.is_external() {
                third = Some(symbol);
            } else if coefficient < 0.0 {
                let r = -row.constant() / coefficient;
                if r < r1 || (r == r1 && first.is_some_and(|f| symbol.id() < f.id())) {
                    r1 = r;
                    first = Some(symbol);
                }
            } else {
                let r = row.constant() / coefficient;
                if r < r2 || (r == r2 && second.is_some_and(|s| symbol.id() < s.id())) {
                    r2 = r;
                    second = Some(symbol);
                }
            }
        }
        first
            .or(second)
            .or(third)
            .and_then(|symbol| self.tableau.remove_row(symbol).map(|row| (symbol, row)))
    }

    /// Remove a constraint's error-symbol contributions from the objective.
    fn remove_constraint_effects(&mut self, constraint: &Constraint, tag: &Tag) {
        if tag.marker.is_error() {
            self.remove_marker_effects(tag.marker, constraint.strength());
        }
        if tag.other.is_error() {
            self.remove_marker_effects(tag.other, constraint.strength());
        }
    }

    fn remove_marker_effects(&mut self, marker: Symbol, strength: Strength) {
        if let Some(row) = self.tableau.row(marker) {
            self.objective.insert_row(row, -strength.raw());
        } else {
            self.objective.insert_symbol(marker, -strength.raw());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1.0e-8;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn eq(expr: Expression, strength: Strength) -> Constraint {
        Constraint::new(expr, RelationalOperator::Equal, strength)
    }

    #[test]
    fn simple_required_equality() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_constraint(eq(x - 100.0, Strength::REQUIRED)).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 100.0);
    }

    #[test]
    fn chained_equalities() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let y = Variable::new();
        solver.add_constraint(eq(x - 100.0, Strength::REQUIRED)).unwrap();
        // y == x + 50
        solver.add_constraint(eq(y - x - 50.0, Strength::REQUIRED)).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 100.0);
        assert_close(solver.value(y), 150.0);
    }

    #[test]
    fn inequalities_bound_the_solution() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver
            .add_constraint(Constraint::new(
                x - 50.0,
                RelationalOperator::GreaterOrEqual,
                Strength::REQUIRED,
            ))
            .unwrap();
        solver.add_constraint(eq(x - 10.0, Strength::WEAK)).unwrap();
        solver.update_variables();
        // The weak preference for 10 loses to the required lower bound.
        assert_close(solver.value(x), 50.0);
    }

    #[test]
    fn duplicate_constraint_is_rejected() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let c = eq(x - 10.0, Strength::WEAK);
        solver.add_constraint(c.clone()).unwrap();
        assert_eq!(
            solver.add_constraint(c.clone()),
            Err(SolverError::DuplicateConstraint(c.clone()))
        );
        // State is that of a single successful add.
        solver.update_variables();
        assert_close(solver.value(x), 10.0);
        solver.remove_constraint(&c).unwrap();
        assert!(!solver.has_constraint(&c));
    }

    #[test]
    fn structurally_equal_constraints_are_distinct() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let a = eq(x - 10.0, Strength::WEAK);
        let b = eq(x - 10.0, Strength::WEAK);
        solver.add_constraint(a).unwrap();
        solver.add_constraint(b).unwrap();
    }

    #[test]
    fn required_conflict_is_unsatisfiable() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_constraint(eq(x - 10.0, Strength::REQUIRED)).unwrap();
        let conflicting = eq(x - 20.0, Strength::REQUIRED);
        assert_eq!(
            solver.add_constraint(conflicting.clone()),
            Err(SolverError::UnsatisfiableConstraint(conflicting.clone()))
        );
        assert!(!solver.has_constraint(&conflicting));
        solver.update_variables();
        assert_close(solver.value(x), 10.0);
    }

    #[test]
    fn redundant_required_equality_is_accepted() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_constraint(eq(x - 10.0, Strength::REQUIRED)).unwrap();
        solver.add_constraint(eq(x - 10.0, Strength::REQUIRED)).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 10.0);
    }

    #[test]
    fn stronger_constraint_wins() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_constraint(eq(x - 10.0, Strength::STRONG)).unwrap();
        solver.add_constraint(eq(x - 20.0, Strength::WEAK)).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 10.0);
    }

    #[test]
    fn removing_a_constraint_restores_prior_values() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_constraint(eq(x - 10.0, Strength::WEAK)).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 10.0);

        let c = eq(x - 20.0, Strength::STRONG);
        solver.add_constraint(c.clone()).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 20.0);

        solver.remove_constraint(&c).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 10.0);
    }

    #[test]
    fn removing_an_unknown_constraint_fails() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let c = eq(x - 10.0, Strength::WEAK);
        assert_eq!(
            solver.remove_constraint(&c),
            Err(SolverError::UnknownConstraint(c))
        );
    }

    #[test]
    fn edit_variable_lifecycle() {
        let mut solver = Solver::new();
        let x = Variable::new();
        assert!(!solver.has_edit_variable(x));

        solver.add_edit_variable(x, Strength::STRONG).unwrap();
        assert!(solver.has_edit_variable(x));
        assert_eq!(
            solver.add_edit_variable(x, Strength::STRONG),
            Err(SolverError::DuplicateEditVariable(x))
        );

        solver.remove_edit_variable(x).unwrap();
        assert!(!solver.has_edit_variable(x));
        assert_eq!(
            solver.remove_edit_variable(x),
            Err(SolverError::UnknownEditVariable(x))
        );
    }

    #[test]
    fn required_edit_strength_is_rejected() {
        let mut solver = Solver::new();
        let x = Variable::new();
        assert_eq!(
            solver.add_edit_variable(x, Strength::REQUIRED),
            Err(SolverError::BadRequiredStrength)
        );
        assert!(!solver.has_edit_variable(x));
    }

    #[test]
    fn suggestions_move_the_variable_exactly() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_edit_variable(x, Strength::STRONG).unwrap();
        solver.suggest_value(x, 42.0).unwrap();
        solver.update_variables();
        assert_eq!(solver.value(x), 42.0);
    }

    #[test]
    fn suggesting_an_unknown_edit_variable_fails() {
        let mut solver = Solver::new();
        let x = Variable::new();
        assert_eq!(
            solver.suggest_value(x, 1.0),
            Err(SolverError::UnknownEditVariable(x))
        );
    }

    #[test]
    fn suggestions_respect_required_bounds() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver
            .add_constraint(Constraint::new(
                x - 10.0,
                RelationalOperator::GreaterOrEqual,
                Strength::REQUIRED,
            ))
            .unwrap();
        solver.add_edit_variable(x, Strength::STRONG).unwrap();

        solver.suggest_value(x, 5.0).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 10.0);

        solver.suggest_value(x, 15.0).unwrap();
        solver.update_variables();
        assert_close(solver.value(x), 15.0);
    }

    #[test]
    fn edit_suggestions_flow_through_required_constraints() {
        let mut solver = Solver::new();
        let left = Variable::new();
        let width = Variable::new();
        let right = Variable::new();
        solver
            .add_constraint(eq(left + width - right, Strength::REQUIRED))
            .unwrap();
        solver.add_edit_variable(left, Strength::STRONG).unwrap();
        solver.add_edit_variable(width, Strength::STRONG).unwrap();

        solver.suggest_value(left, 10.0).unwrap();
        solver.suggest_value(width, 5.0).unwrap();
        solver.update_variables();
        assert_close(solver.value(left), 10.0);
        assert_close(solver.value(width), 5.0);
        assert_close(solver.value(right), 15.0);
    }

    #[test]
    fn repeated_suggestions_track_the_latest_value() {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_edit_variable(x, Strength::STRONG).unwrap();
        for value in [10.0, -4.0, 127.5, 0.0] {
            solver.suggest_value(x, value).unwrap();
            solver.update_variables();
            assert_close(solver.value(x), value);
        }
    }

    #[test]
    fn fetch_changes_reports_only_moved_variables() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let y = Variable::new();
        solver.add_constraint(eq(x - 10.0, Strength::WEAK)).unwrap();
        solver.add_constraint(eq(y + 0.0, Strength::WEAK)).unwrap();

        let changes = solver.fetch_changes();
        assert_eq!(changes, vec![(x, 10.0)]);
        // A second fetch with no intervening edits reports nothing.
        assert!(solver.fetch_changes().is_empty());
    }

    #[test]
    fn reset_returns_to_the_empty_state() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let c = eq(x - 10.0, Strength::WEAK);
        solver.add_constraint(c.clone()).unwrap();
        solver.add_edit_variable(x, Strength::STRONG).unwrap();
        solver.update_variables();

        solver.reset();
        assert!(!solver.has_constraint(&c));
        assert!(!solver.has_edit_variable(x));
        assert_eq!(solver.value(x), 0.0);
        // A previously-duplicate constraint now adds cleanly.
        solver.add_constraint(c).unwrap();
    }

    #[test]
    fn add_constraints_stops_at_first_failure() {
        let mut solver = Solver::new();
        let x = Variable::new();
        let a = eq(x - 10.0, Strength::REQUIRED);
        let b = eq(x - 20.0, Strength::REQUIRED);
        let c = eq(x - 10.0, Strength::WEAK);
        let result = solver.add_constraints([a.clone(), b.clone(), c.clone()]);
        assert_eq!(result, Err(SolverError::UnsatisfiableConstraint(b)));
        assert!(solver.has_constraint(&a));
        assert!(!solver.has_constraint(&c));
    }
}
