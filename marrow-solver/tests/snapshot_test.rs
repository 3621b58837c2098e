#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use marrow_solver::constraints;
use marrow_solver::results::PropagationOutcome;
use marrow_solver::results::ProblemSolution;
use marrow_solver::results::SatisfactionResult;
use marrow_solver::termination::Indefinite;
use marrow_solver::variables::DomainId;
use marrow_solver::Solver;
use marrow_solver::SolverSnapshot;
use marrow_solver::SolverSnapshotError;

/// `x + y <= 8` and `x >= minimum_x`, over `[0, 9]`. The shape of the model does not depend on
/// `minimum_x`.
fn model(minimum_x: i32) -> (Solver, DomainId, DomainId) {
    let mut solver = Solver::default();
    let x = solver.new_named_bounded_integer(0, 9, "x");
    let y = solver.new_named_bounded_integer(0, 9, "y");

    solver
        .add_constraint(constraints::less_than_or_equals([x, y], 8))
        .post()
        .expect("no root conflict");
    solver
        .add_constraint(constraints::greater_than_or_equals([x], minimum_x))
        .post()
        .expect("no root conflict");

    (solver, x, y)
}

#[test]
fn snapshot_survives_a_json_round_trip() {
    let (solver, _, _) = model(4);
    let snapshot = solver.snapshot().expect("no object cells");

    let json = serde_json::to_string(&snapshot).expect("the snapshot serialises");
    let parsed: SolverSnapshot = serde_json::from_str(&json).expect("the snapshot deserialises");

    assert_eq!(snapshot, parsed);
}

#[test]
fn restored_snapshot_carries_the_root_domains() {
    let (tight, _, _) = model(4);
    let json = serde_json::to_string(&tight.snapshot().expect("no object cells"))
        .expect("the snapshot serialises");

    let (mut solver, x, y) = model(0);
    assert_eq!(8, solver.upper_bound(&y));

    let snapshot: SolverSnapshot = serde_json::from_str(&json).expect("the snapshot deserialises");
    assert_eq!(
        PropagationOutcome::Fixpoint,
        solver.restore_snapshot(&snapshot).expect("same model")
    );

    assert_eq!(4, solver.lower_bound(&x));
    assert_eq!(4, solver.upper_bound(&y));

    let mut brancher = solver.default_brancher();
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
    else {
        panic!("the restored model is feasible");
    };
    assert!(solution.get_integer_value(x) >= 4);
    assert!(solution.get_integer_value(x) + solution.get_integer_value(y) <= 8);
}

#[test]
fn snapshot_of_a_different_model_is_rejected() {
    let (solver, _, _) = model(0);
    let snapshot = solver.snapshot().expect("no object cells");

    let mut other = Solver::default();
    let _ = other.new_bounded_integer(0, 3);

    assert!(matches!(
        other.restore_snapshot(&snapshot),
        Err(SolverSnapshotError::DomainMismatch { .. })
    ));
}

#[test]
fn restoring_after_a_search_starts_from_the_snapshot() {
    let (mut solver, x, _) = model(0);
    let snapshot = solver.snapshot().expect("no object cells");

    let mut brancher = solver.default_brancher();
    let _ = solver.satisfy(&mut brancher, &mut Indefinite);

    assert_eq!(
        PropagationOutcome::Fixpoint,
        solver.restore_snapshot(&snapshot).expect("same model")
    );
    assert_eq!(0, solver.lower_bound(&x));
    assert_eq!(8, solver.upper_bound(&x));
}
