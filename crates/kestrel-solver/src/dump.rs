//! Diagnostic dumps of the solver's internal state.
//!
//! The format is for humans debugging a constraint system, not for
//! machines: sections for the objective, the tableau, infeasible rows,
//! variables, edit variables, and constraints. Output is deterministic
//! (rows and cells are ordered by symbol id) so successive dumps of an
//! unchanged solver compare equal.

use std::fmt::Write;

use crate::row::{near_zero, Row};
use crate::solver::Solver;
use crate::symbol::Symbol;

impl Solver {
    /// Render the internal state as a string.
    pub fn dumps(&self) -> String {
        let mut out = String::new();

        section(&mut out, "Objective");
        let _ = writeln!(out, "{}", format_row(&self.objective));
        out.push('\n');

        section(&mut out, "Tableau");
        let mut rows: Vec<(Symbol, &Row)> = self.tableau.rows().collect();
        rows.sort_by_key(|(symbol, _)| symbol.id());
        for (symbol, row) in rows {
            let _ = writeln!(out, "{} | {}", symbol, format_row(row));
        }
        out.push('\n');

        section(&mut out, "Infeasible");
        for symbol in self.tableau.infeasible() {
            let _ = writeln!(out, "{}", symbol);
        }
        out.push('\n');

        section(&mut out, "Variables");
        let mut vars: Vec<_> = self.vars.iter().collect();
        vars.sort_by_key(|(_, data)| data.symbol.id());
        for (variable, data) in vars {
            let _ = writeln!(out, "{} = {}", variable, data.symbol);
        }
        out.push('\n');

        section(&mut out, "Edit Variables");
        for variable in self.edits.keys() {
            let _ = writeln!(out, "{}", variable);
        }
        out.push('\n');

        section(&mut out, "Constraints");
        for constraint in self.cns.keys() {
            let _ = writeln!(out, "{}", constraint);
        }
        out.push('\n');

        out
    }

    /// Write the internal state to stdout.
    pub fn dump(&self) {
        print!("{}", self.dumps());
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

fn format_row(row: &Row) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", row.constant());
    let mut cells: Vec<(Symbol, f64)> = row.cells().collect();
    cells.sort_by_key(|(symbol, _)| symbol.id());
    for (symbol, coefficient) in cells {
        if near_zero(coefficient) {
            continue;
        }
        let _ = write!(out, " + {} * {}", coefficient, symbol);
    }
    out
}
