//! Tableau rows.
//!
//! A row expresses one basic symbol as a constant plus a sum of weighted
//! non-basic symbols. Cells that cancel below the tolerance are pruned so
//! a symbol's absence always means a zero coefficient.

use indexmap::IndexMap;

use crate::symbol::Symbol;

/// Tolerance for floating-point comparisons throughout the solver.
pub(crate) const EPSILON: f64 = 1.0e-8;

pub(crate) fn near_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Row {
    constant: f64,
    cells: IndexMap<Symbol, f64>,
}

impl Row {
    pub(crate) fn new(constant: f64) -> Self {
        Self {
            constant,
            cells: IndexMap::new(),
        }
    }

    pub(crate) fn constant(&self) -> f64 {
        self.constant
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
        self.cells.iter().map(|(&s, &c)| (s, c))
    }

    /// Whether the row has no symbol cells.
    pub(crate) fn is_constant(&self) -> bool {
        self.cells.is_empty()
    }

    /// Shift the constant and return the new value.
    pub(crate) fn add(&mut self, value: f64) -> f64 {
        self.constant += value;
        self.constant
    }

    /// Add `coefficient * symbol`, coalescing with an existing cell and
    /// pruning the cell if it cancels to zero.
    pub(crate) fn insert_symbol(&mut self, symbol: Symbol, coefficient: f64) {
        let entry = self.cells.entry(symbol).or_insert(0.0);
        *entry += coefficient;
        if near_zero(*entry) {
            self.cells.swap_remove(&symbol);
        }
    }

    /// Add `coefficient * other` to this row.
    pub(crate) fn insert_row(&mut self, other: &Row, coefficient: f64) {
        self.constant += other.constant * coefficient;
        for (&symbol, &value) in &other.cells {
            self.insert_symbol(symbol, value * coefficient);
        }
    }

    pub(crate) fn remove(&mut self, symbol: Symbol) {
        self.cells.swap_remove(&symbol);
    }

    pub(crate) fn coefficient_for(&self, symbol: Symbol) -> f64 {
        self.cells.get(&symbol).copied().unwrap_or(0.0)
    }

    /// Flip the sign of the constant and every cell.
    pub(crate) fn reverse_sign(&mut self) {
        self.constant = -self.constant;
        for value in self.cells.values_mut() {
            *value = -*value;
        }
    }

    /// Solve the row for the given symbol, which must be a cell.
    ///
    /// Turns `b = c + a*s + ...` into `s = -c/a - .../a`, leaving the row
    /// expressed in terms of the remaining symbols.
    pub(crate) fn solve_for(&mut self, symbol: Symbol) {
        let coefficient = self.cells.swap_remove(&symbol).unwrap_or(1.0);
        let multiplier = -1.0 / coefficient;
        self.constant *= multiplier;
        for value in self.cells.values_mut() {
            *value *= multiplier;
        }
    }

    /// Solve the row for `rhs` after moving the basic symbol `lhs` into the
    /// cell map. Used when pivoting an existing basic row.
    pub(crate) fn solve_for_symbols(&mut self, lhs: Symbol, rhs: Symbol) {
        self.insert_symbol(lhs, -1.0);
        self.solve_for(rhs);
    }

    /// Replace every occurrence of `symbol` with the given row.
    pub(crate) fn substitute(&mut self, symbol: Symbol, row: &Row) {
        if let Some(coefficient) = self.cells.swap_remove(&symbol) {
            self.insert_row(row, coefficient);
        }
    }

    /// Whether every cell holds a dummy symbol.
    pub(crate) fn all_dummies(&self) -> bool {
        self.cells.keys().all(Symbol::is_dummy)
    }

    /// The lowest-id pivotable symbol in the row, or the invalid symbol.
    pub(crate) fn any_pivotable_symbol(&self) -> Symbol {
        self.cells
            .keys()
            .filter(|s| s.is_pivotable())
            .min_by_key(|s| s.id())
            .copied()
            .unwrap_or_else(Symbol::invalid)
    }
}
