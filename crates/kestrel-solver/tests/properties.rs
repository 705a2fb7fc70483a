use proptest::prelude::*;

use kestrel_solver::{Constraint, RelationalOperator, Solver, Strength, Variable};

const TOLERANCE: f64 = 1.0e-6;

fn eq(expr: kestrel_solver::Expression, strength: Strength) -> Constraint {
    Constraint::new(expr, RelationalOperator::Equal, strength)
}

proptest! {
    /// Adding constraints and removing them again leaves every variable
    /// back at its resting value of zero.
    #[test]
    fn add_remove_round_trip(targets in prop::collection::vec(-1000.0f64..1000.0, 1..8)) {
        let mut solver = Solver::new();
        let vars: Vec<Variable> = targets.iter().map(|_| Variable::new()).collect();
        let constraints: Vec<Constraint> = vars
            .iter()
            .zip(&targets)
            .map(|(&v, &t)| eq(v - t, Strength::WEAK))
            .collect();

        solver.add_constraints(constraints.iter().cloned()).unwrap();
        solver.update_variables();
        for (&v, &t) in vars.iter().zip(&targets) {
            prop_assert!((solver.value(v) - t).abs() < TOLERANCE);
        }

        for constraint in &constraints {
            solver.remove_constraint(constraint).unwrap();
        }
        solver.update_variables();
        for &v in &vars {
            prop_assert!(solver.value(v).abs() < TOLERANCE);
        }
    }

    /// An unconstrained edit variable tracks the latest suggestion.
    #[test]
    fn suggestions_track_latest(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..16)) {
        let mut solver = Solver::new();
        let x = Variable::new();
        solver.add_edit_variable(x, Strength::STRONG).unwrap();
        for &value in &values {
            solver.suggest_value(x, value).unwrap();
        }
        solver.update_variables();
        let last = values[values.len() - 1];
        prop_assert!((solver.value(x) - last).abs() < TOLERANCE);
    }

    /// Suggestions against required bounds resolve to the clamped value.
    #[test]
    fn suggestions_clamp_to_required_bounds(
        lo in -100.0f64..100.0,
        span in 0.0f64..200.0,
        target in -500.0f64..500.0,
    ) {
        let hi = lo + span;
        let mut solver = Solver::new();
        let x = Variable::new();
        solver
            .add_constraint(Constraint::new(
                x - lo,
                RelationalOperator::GreaterOrEqual,
                Strength::REQUIRED,
            ))
            .unwrap();
        solver
            .add_constraint(Constraint::new(
                x - hi,
                RelationalOperator::LessOrEqual,
                Strength::REQUIRED,
            ))
            .unwrap();
        solver.add_edit_variable(x, Strength::STRONG).unwrap();

        solver.suggest_value(x, target).unwrap();
        solver.update_variables();
        let expected = target.clamp(lo, hi);
        prop_assert!(
            (solver.value(x) - expected).abs() < TOLERANCE,
            "x = {}, expected {}", solver.value(x), expected
        );
    }
}
