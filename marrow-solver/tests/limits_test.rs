#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::ops::ControlFlow;
use std::time::Duration;

use marrow_solver::constraints;
use marrow_solver::constraints::AllDifferentConsistency;
use marrow_solver::results::EnumerationResult;
use marrow_solver::results::OptimisationResult;
use marrow_solver::results::SatisfactionResult;
use marrow_solver::termination::Combinator;
use marrow_solver::termination::DecisionBudget;
use marrow_solver::termination::FailBudget;
use marrow_solver::termination::Indefinite;
use marrow_solver::termination::SolutionBudget;
use marrow_solver::termination::StopFlag;
use marrow_solver::termination::TimeBudget;
use marrow_solver::variables::DomainId;
use marrow_solver::Solver;

/// `pigeons` variables over `holes` values which all have to differ. The pairwise decomposition
/// only finds out by search that there are too few holes.
fn pigeonhole(pigeons: usize, holes: i32) -> (Solver, Vec<DomainId>) {
    let mut solver = Solver::default();
    let variables = (0..pigeons)
        .map(|_| solver.new_bounded_integer(0, holes - 1))
        .collect::<Vec<_>>();

    solver
        .add_constraint(constraints::all_different(
            variables.clone(),
            AllDifferentConsistency::Pairwise,
        ))
        .post()
        .expect("no root conflict");

    (solver, variables)
}

#[test]
fn exhausted_pigeonhole_is_unsatisfiable() {
    let (mut solver, _) = pigeonhole(5, 4);
    let mut brancher = solver.default_brancher();

    assert_eq!(
        SatisfactionResult::Unsatisfiable,
        solver.satisfy(&mut brancher, &mut Indefinite)
    );
    assert!(solver.statistics().fails > 0);
}

#[test]
fn decision_budget_stops_the_search() {
    let (mut solver, _) = pigeonhole(9, 8);
    let mut brancher = solver.default_brancher();

    let result = solver.satisfy(&mut brancher, &mut DecisionBudget::new(10));

    assert_eq!(SatisfactionResult::Unknown, result);
    assert!(solver.statistics().nodes >= 10);
}

#[test]
fn fail_budget_stops_the_search() {
    let (mut solver, _) = pigeonhole(9, 8);
    let mut brancher = solver.default_brancher();

    let result = solver.satisfy(&mut brancher, &mut FailBudget::new(5));

    assert_eq!(SatisfactionResult::Unknown, result);
    assert!(solver.statistics().fails >= 5);
}

#[test]
fn exceeded_time_budget_stops_before_the_first_decision() {
    let (mut solver, _) = pigeonhole(9, 8);
    let mut brancher = solver.default_brancher();

    let result = solver.satisfy(
        &mut brancher,
        &mut TimeBudget::starting_now(Duration::ZERO),
    );

    assert_eq!(SatisfactionResult::Unknown, result);
    assert_eq!(0, solver.statistics().nodes);
}

#[test]
fn raised_stop_flag_stops_the_search() {
    let (mut solver, _) = pigeonhole(9, 8);
    let mut brancher = solver.default_brancher();
    let stop = StopFlag::new();
    stop.raise();

    let mut termination = stop.clone();
    assert_eq!(
        SatisfactionResult::Unknown,
        solver.satisfy(&mut brancher, &mut termination)
    );
}

#[test]
fn combined_conditions_stop_on_the_first_trigger() {
    let (mut solver, _) = pigeonhole(9, 8);
    let mut brancher = solver.default_brancher();

    let mut termination = Combinator::new(
        TimeBudget::starting_now(Duration::from_secs(3600)),
        FailBudget::new(1),
    );

    assert_eq!(
        SatisfactionResult::Unknown,
        solver.satisfy(&mut brancher, &mut termination)
    );
}

#[test]
fn solution_budget_cuts_an_enumeration_short() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 9);
    let y = solver.new_bounded_integer(0, 9);
    solver
        .add_constraint(constraints::binary_not_equals(x, y))
        .post()
        .expect("no root conflict");

    let mut brancher = solver.default_brancher();
    let result = solver.find_all_solutions(&mut brancher, &mut SolutionBudget::new(7), |_| {
        ControlFlow::Continue(())
    });

    assert_eq!(EnumerationResult::Stopped { num_solutions: 7 }, result);
}

#[test]
fn stopped_optimisation_without_a_solution_is_unknown() {
    let (mut solver, variables) = pigeonhole(9, 8);
    let mut brancher = solver.default_brancher();

    let result = solver.minimise(&mut brancher, &mut FailBudget::new(3), variables[0]);

    assert_eq!(OptimisationResult::Unknown, result);
}

#[test]
fn a_stopped_search_can_be_resumed_from_scratch() {
    let (mut solver, _) = pigeonhole(5, 4);
    let mut brancher = solver.default_brancher();

    assert_eq!(
        SatisfactionResult::Unknown,
        solver.satisfy(&mut brancher, &mut DecisionBudget::new(2))
    );
    assert_eq!(
        SatisfactionResult::Unsatisfiable,
        solver.satisfy(&mut brancher, &mut Indefinite)
    );
}
