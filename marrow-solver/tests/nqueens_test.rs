#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::collections::HashSet;
use std::ops::ControlFlow;

use marrow_solver::constraints::AllDifferentConsistency;
use marrow_solver::nqueens;
use marrow_solver::nqueens::KNOWN_SOLUTION_COUNTS;
use marrow_solver::results::EnumerationResult;
use marrow_solver::results::ProblemSolution;
use marrow_solver::reversible::StoreDiscipline;
use marrow_solver::termination::Indefinite;
use marrow_solver::QueuePolicy;
use marrow_solver::Solver;
use marrow_solver::SolverOptions;

const POLICIES: [QueuePolicy; 3] = [
    QueuePolicy::PriorityBuckets,
    QueuePolicy::Fifo,
    QueuePolicy::Lifo,
];

const CONSISTENCIES: [AllDifferentConsistency; 3] = [
    AllDifferentConsistency::Pairwise,
    AllDifferentConsistency::Value,
    AllDifferentConsistency::Bounds,
];

const DISCIPLINES: [StoreDiscipline; 2] = [StoreDiscipline::Trailing, StoreDiscipline::Copying];

fn enumerate_nqueens(
    n: u32,
    consistency: AllDifferentConsistency,
    options: SolverOptions,
) -> (EnumerationResult, Vec<Vec<i32>>) {
    let mut solver = Solver::with_options(options);
    let queens = nqueens::add_nqueens(&mut solver, n, consistency).expect("no root conflict");

    let mut placements = Vec::new();
    let mut brancher = solver.default_brancher();
    let result = solver.find_all_solutions(&mut brancher, &mut Indefinite, |solution| {
        placements.push(
            queens
                .iter()
                .map(|&queen| solution.get_integer_value(queen))
                .collect(),
        );
        ControlFlow::Continue(())
    });

    (result, placements)
}

#[test]
fn solution_counts_do_not_depend_on_the_configuration() {
    for n in 4..=8 {
        for queue_policy in POLICIES {
            for consistency in CONSISTENCIES {
                for store_discipline in DISCIPLINES {
                    let options = SolverOptions {
                        queue_policy,
                        store_discipline,
                        ..Default::default()
                    };
                    let (result, _) = enumerate_nqueens(n, consistency, options);

                    assert_eq!(
                        EnumerationResult::Exhausted {
                            num_solutions: KNOWN_SOLUTION_COUNTS[n as usize]
                        },
                        result,
                        "n = {n}, {queue_policy:?}, {consistency:?}, {store_discipline:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn every_enumerated_placement_is_valid_and_distinct() {
    let (result, placements) =
        enumerate_nqueens(8, AllDifferentConsistency::Pairwise, SolverOptions::default());

    assert_eq!(92, result.num_solutions());
    assert!(placements
        .iter()
        .all(|placement| nqueens::is_valid_placement(placement)));

    let distinct = placements.iter().collect::<HashSet<_>>();
    assert_eq!(placements.len(), distinct.len());
}

#[test]
fn consistencies_find_the_same_solutions() {
    let (_, pairwise) =
        enumerate_nqueens(6, AllDifferentConsistency::Pairwise, SolverOptions::default());
    let (_, bounds) =
        enumerate_nqueens(6, AllDifferentConsistency::Bounds, SolverOptions::default());

    let pairwise = pairwise.into_iter().collect::<HashSet<_>>();
    let bounds = bounds.into_iter().collect::<HashSet<_>>();
    assert_eq!(pairwise, bounds);
}

#[test]
fn three_queens_have_no_solution() {
    let (result, placements) =
        enumerate_nqueens(3, AllDifferentConsistency::Value, SolverOptions::default());

    assert_eq!(EnumerationResult::Exhausted { num_solutions: 0 }, result);
    assert!(placements.is_empty());
}

#[test]
fn the_solver_is_back_at_the_root_after_enumeration() {
    let mut solver = Solver::default();
    let queens = nqueens::add_nqueens(&mut solver, 5, AllDifferentConsistency::Pairwise)
        .expect("no root conflict");

    let mut brancher = solver.default_brancher();
    let _ = solver.find_all_solutions(&mut brancher, &mut Indefinite, |_| {
        ControlFlow::Continue(())
    });

    for queen in queens {
        assert_eq!(0, solver.lower_bound(&queen));
        assert_eq!(4, solver.upper_bound(&queen));
    }
}
