#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::ops::ControlFlow;

use marrow_solver::constraints;
use marrow_solver::results::ProblemSolution;
use marrow_solver::termination::Indefinite;
use marrow_solver::variables::DomainId;
use marrow_solver::variables::Literal;
use marrow_solver::Solver;

/// Every solution as `(x, y, b)`.
fn enumerate(solver: &mut Solver, x: DomainId, y: DomainId, b: Literal) -> Vec<(i32, i32, bool)> {
    let mut solutions = Vec::new();
    let mut brancher = solver.default_brancher();
    let result = solver.find_all_solutions(&mut brancher, &mut Indefinite, |solution| {
        solutions.push((
            solution.get_integer_value(x),
            solution.get_integer_value(y),
            solution.get_literal_value(b),
        ));
        ControlFlow::Continue(())
    });

    assert_eq!(solutions.len() as u64, result.num_solutions());
    solutions
}

#[test]
fn reified_inequality_follows_the_truth_of_the_sum() {
    let mut solver = Solver::default();
    let x = solver.new_named_bounded_integer(0, 3, "x");
    let y = solver.new_named_bounded_integer(0, 3, "y");
    let b = solver.new_named_literal("b");

    solver
        .add_constraint(constraints::less_than_or_equals([x, y], 3))
        .reify(b)
        .expect("no root conflict");

    let solutions = enumerate(&mut solver, x, y, b);

    assert_eq!(16, solutions.len());
    for (x, y, b) in solutions {
        assert_eq!(x + y <= 3, b, "x = {x}, y = {y}");
    }
}

#[test]
fn half_reified_inequality_only_binds_when_true() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 3);
    let y = solver.new_bounded_integer(0, 3);
    let b = solver.new_literal();

    solver
        .add_constraint(constraints::less_than_or_equals([x, y], 3))
        .implied_by(b)
        .expect("no root conflict");

    let solutions = enumerate(&mut solver, x, y, b);

    // Every assignment with b false, plus the ten with x + y <= 3 and b true.
    assert_eq!(26, solutions.len());
    assert!(solutions.iter().all(|&(x, y, b)| !b || x + y <= 3));
}

#[test]
fn reified_equality_of_two_variables() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 2);
    let y = solver.new_sparse_integer(vec![0, 2, 4]);
    let b = solver.new_literal();

    solver
        .add_constraint(constraints::binary_equals(x, y))
        .reify(b)
        .expect("no root conflict");

    let solutions = enumerate(&mut solver, x, y, b);

    assert_eq!(9, solutions.len());
    assert_eq!(2, solutions.iter().filter(|&&(_, _, b)| b).count());
    for (x, y, b) in solutions {
        assert_eq!(x == y, b, "x = {x}, y = {y}");
    }
}

#[test]
fn fixed_literal_enforces_the_negation() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 5);
    let b = solver.new_literal();

    solver
        .add_constraint(constraints::equals([b], 0))
        .post()
        .expect("b can be false");
    solver
        .add_constraint(constraints::greater_than_or_equals([x], 2))
        .reify(b)
        .expect("no root conflict");

    assert_eq!(0, solver.lower_bound(&x));
    assert_eq!(1, solver.upper_bound(&x));
}

#[test]
fn entailed_constraint_fixes_the_literal_at_the_root() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(4, 6);
    let b = solver.new_literal();

    solver
        .add_constraint(constraints::not_equals([x], 2))
        .reify(b)
        .expect("no root conflict");

    assert_eq!(1, solver.lower_bound(&b));
}
