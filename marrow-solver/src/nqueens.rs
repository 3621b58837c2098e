//! The N-Queens problem: place `n` queens on an `n` by `n` chess board such that no two queens
//! attack each other.
//!
//! The model has one variable per row, holding the column of the queen on that row. Three
//! all-different constraints forbid shared columns, diagonals and anti-diagonals.
use fnv::FnvHashSet;
use marrow_core::constraints;
use marrow_core::constraints::AllDifferentConsistency;
use marrow_core::variables::DomainId;
use marrow_core::variables::TransformableVariable;
use marrow_core::ConstraintOperationError;
use marrow_core::Solver;

/// The number of solutions of the N-Queens problem for `n` in `0..=10`.
pub const KNOWN_SOLUTION_COUNTS: [u64; 11] = [1, 1, 0, 0, 2, 10, 4, 40, 92, 352, 724];

/// Adds the N-Queens model to `solver` and returns the queen of every row.
///
/// # Example
/// ```rust
/// # use std::ops::ControlFlow;
/// # use marrow_solver::constraints::AllDifferentConsistency;
/// # use marrow_solver::nqueens;
/// # use marrow_solver::termination::Indefinite;
/// # use marrow_solver::Solver;
/// let mut solver = Solver::default();
/// let queens = nqueens::add_nqueens(&mut solver, 6, AllDifferentConsistency::Pairwise)
///     .expect("no conflict at the root");
///
/// let mut brancher = solver.default_brancher();
/// let result = solver.find_all_solutions(&mut brancher, &mut Indefinite, |_| {
///     ControlFlow::Continue(())
/// });
/// assert_eq!(4, result.num_solutions());
/// # assert_eq!(6, queens.len());
/// ```
pub fn add_nqueens(
    solver: &mut Solver,
    n: u32,
    consistency: AllDifferentConsistency,
) -> Result<Vec<DomainId>, ConstraintOperationError> {
    let size = n as i32;
    let queens = (0..size)
        .map(|row| solver.new_named_bounded_integer(0, size - 1, format!("q{row}")))
        .collect::<Vec<_>>();
    if queens.is_empty() {
        return Ok(queens);
    }

    for (name, offset) in [("columns", 0), ("diagonals", 1), ("anti-diagonals", -1)] {
        let shifted = queens
            .iter()
            .enumerate()
            .map(|(row, queen)| queen.offset(offset * row as i32))
            .collect::<Vec<_>>();

        solver
            .add_constraint(constraints::all_different(shifted, consistency))
            .with_name(name)
            .post()?;
    }

    Ok(queens)
}

/// Whether the queens at `columns[row]` attack each other.
pub fn is_valid_placement(columns: &[i32]) -> bool {
    let mut seen_columns = FnvHashSet::default();
    let mut seen_diagonals = FnvHashSet::default();
    let mut seen_anti_diagonals = FnvHashSet::default();

    columns.iter().enumerate().all(|(row, &column)| {
        let row = row as i32;
        seen_columns.insert(column)
            && seen_diagonals.insert(column + row)
            && seen_anti_diagonals.insert(column - row)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attacking_queens_are_rejected() {
        assert!(is_valid_placement(&[1, 3, 0, 2]));
        assert!(!is_valid_placement(&[0, 0, 3, 1]));
        assert!(!is_valid_placement(&[0, 1, 3, 2]));
        assert!(!is_valid_placement(&[3, 1, 2, 0]));
    }

    #[test]
    fn every_row_gets_a_named_queen() {
        let mut solver = Solver::default();
        let queens =
            add_nqueens(&mut solver, 5, AllDifferentConsistency::Value).expect("feasible");

        assert_eq!(5, queens.len());
        assert_eq!(Some(queens[2]), solver.variable_by_name("q2"));
        assert_eq!(3, solver.num_constraints());
    }
}
