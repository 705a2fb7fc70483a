//! The simplex working set.
//!
//! The tableau owns the basic rows, keyed by their basic symbol, and the
//! list of rows made infeasible by a local perturbation (a negative
//! constant on a restricted basic symbol) awaiting a dual-simplex fixup.

use indexmap::IndexMap;

use crate::row::Row;
use crate::symbol::Symbol;

#[derive(Debug, Default)]
pub(crate) struct Tableau {
    rows: IndexMap<Symbol, Row>,
    infeasible: Vec<Symbol>,
}

impl Tableau {
    pub(crate) fn row(&self, symbol: Symbol) -> Option<&Row> {
        self.rows.get(&symbol)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = (Symbol, &Row)> {
        self.rows.iter().map(|(&s, r)| (s, r))
    }

    pub(crate) fn infeasible(&self) -> &[Symbol] {
        &self.infeasible
    }

    /// Insert a new basic row. A symbol that is already basic is an
    /// internal consistency violation, so this aborts rather than erroring.
    pub(crate) fn add_row(&mut self, symbol: Symbol, row: Row) {
        assert!(
            !self.rows.contains_key(&symbol),
            "symbol {} is already basic",
            symbol
        );
        self.rows.insert(symbol, row);
    }

    /// Unlink and return the row for a basic symbol.
    pub(crate) fn remove_row(&mut self, symbol: Symbol) -> Option<Row> {
        self.rows.swap_remove(&symbol)
    }

    /// Remove a parametric symbol from every row.
    pub(crate) fn purge_symbol(&mut self, symbol: Symbol) {
        for row in self.rows.values_mut() {
            row.remove(symbol);
        }
    }

    /// Replace every reference to `symbol` with its new definition,
    /// queueing any restricted row whose constant turns negative.
    pub(crate) fn substitute(&mut self, symbol: Symbol, row: &Row) {
        for (&basic, other) in &mut self.rows {
            other.substitute(symbol, row);
            if basic.is_restricted() && other.constant() < 0.0 {
                self.infeasible.push(basic);
            }
        }
    }

    /// The classic simplex exchange: solve `row` (just removed from the
    /// basis under `leaving`) for `entering`, substitute the new definition
    /// through the tableau, and install it as the entering symbol's row.
    /// Returns the installed row so callers can substitute it into rows the
    /// tableau does not own (the objectives).
    pub(crate) fn pivot(&mut self, leaving: Symbol, entering: Symbol, mut row: Row) -> &Row {
        row.solve_for_symbols(leaving, entering);
        self.substitute(entering, &row);
        assert!(
            !self.rows.contains_key(&entering),
            "symbol {} is already basic",
            entering
        );
        self.rows.entry(entering).or_insert(row)
    }

    /// Shift a basic symbol's constant by `delta` if it is basic, queueing
    /// the row for dual optimization if it turns infeasible.
    pub(crate) fn adjust_basic(&mut self, symbol: Symbol, delta: f64) -> bool {
        match self.rows.get_mut(&symbol) {
            Some(row) => {
                if row.add(delta) < 0.0 {
                    self.infeasible.push(symbol);
                }
                true
            }
            None => false,
        }
    }

    /// Propagate an edit delta through every row referencing `marker`.
    pub(crate) fn apply_delta(&mut self, marker: Symbol, delta: f64) {
        for (&basic, row) in &mut self.rows {
            let coefficient = row.coefficient_for(marker);
            if coefficient != 0.0
                && row.add(delta * coefficient) < 0.0
                && basic.is_restricted()
            {
                self.infeasible.push(basic);
            }
        }
    }

    pub(crate) fn pop_infeasible(&mut self) -> Option<Symbol> {
        self.infeasible.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
        self.infeasible.clear();
    }
}
