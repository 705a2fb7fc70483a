//! Solver benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kestrel_solver::{Constraint, RelationalOperator, Solver, Strength, Variable};

/// A horizontal chain of `n` boxes: each box has a left edge, a width, and
/// a required adjacency to its neighbor. The first left edge and every
/// width are edit variables, the shape of an interactive layout.
fn chain(n: usize) -> (Solver, Vec<Variable>) {
    let mut solver = Solver::new();
    let lefts: Vec<Variable> = (0..n).map(|_| Variable::new()).collect();
    let widths: Vec<Variable> = (0..n).map(|_| Variable::new()).collect();

    for i in 0..n - 1 {
        // lefts[i + 1] == lefts[i] + widths[i]
        solver
            .add_constraint(Constraint::new(
                lefts[i] + widths[i] - lefts[i + 1],
                RelationalOperator::Equal,
                Strength::REQUIRED,
            ))
            .unwrap();
    }
    solver.add_edit_variable(lefts[0], Strength::STRONG).unwrap();
    for &width in &widths {
        solver.add_edit_variable(width, Strength::STRONG).unwrap();
        solver.suggest_value(width, 100.0).unwrap();
    }
    solver.update_variables();
    (solver, lefts)
}

fn build_chain(c: &mut Criterion) {
    c.bench_function("build_chain_100", |b| b.iter(|| chain(black_box(100))));
}

fn suggest_chain(c: &mut Criterion) {
    let (mut solver, lefts) = chain(100);
    let mut offset = 0.0;
    c.bench_function("suggest_chain_100", |b| {
        b.iter(|| {
            offset += 1.0;
            solver.suggest_value(lefts[0], black_box(offset)).unwrap();
            solver.update_variables();
        })
    });
}

criterion_group!(benches, build_chain, suggest_chain);
criterion_main!(benches);
