//! The outcomes of the solving methods of [`Solver`].
//!
//! [`Solver`]: crate::Solver
mod solution;

pub use solution::ProblemSolution;
pub use solution::Solution;
pub use solution::SolutionReference;
#[cfg(doc)]
use crate::termination::TerminationCondition;

/// Whether a problem is known to have a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Satisfiability {
    /// A solution exists.
    True,
    /// The search space was exhausted without finding a solution.
    False,
    /// The search was stopped before either could be established.
    Undefined,
}

/// The result of a call to [`Solver::satisfy`].
///
/// [`Solver::satisfy`]: crate::Solver::satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found and provides the corresponding [`Solution`].
    Satisfiable(Solution),
    /// Indicates that there is no solution to the satisfaction problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

impl SatisfactionResult {
    pub fn satisfiability(&self) -> Satisfiability {
        match self {
            SatisfactionResult::Satisfiable(_) => Satisfiability::True,
            SatisfactionResult::Unsatisfiable => Satisfiability::False,
            SatisfactionResult::Unknown => Satisfiability::Undefined,
        }
    }
}

/// The result of a call to [`Solver::minimise`] or [`Solver::maximise`].
///
/// [`Solver::minimise`]: crate::Solver::minimise
/// [`Solver::maximise`]: crate::Solver::maximise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimisationResult {
    /// Indicates that an optimal solution has been found and proven to be optimal. It provides an
    /// instance of [`Solution`] which contains the optimal solution.
    Optimal(Solution),
    /// Indicates that a solution was found and provides an instance of [`Solution`] which contains
    /// best known solution by the solver.
    Satisfiable(Solution),
    /// Indicates that there is no solution to the problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

impl OptimisationResult {
    pub fn satisfiability(&self) -> Satisfiability {
        match self {
            OptimisationResult::Optimal(_) | OptimisationResult::Satisfiable(_) => {
                Satisfiability::True
            }
            OptimisationResult::Unsatisfiable => Satisfiability::False,
            OptimisationResult::Unknown => Satisfiability::Undefined,
        }
    }
}

/// The result of a call to [`Solver::find_all_solutions`].
///
/// [`Solver::find_all_solutions`]: crate::Solver::find_all_solutions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationResult {
    /// Every solution has been reported.
    Exhausted { num_solutions: u64 },
    /// The enumeration was cut short, either by the callback or by a [`TerminationCondition`].
    Stopped { num_solutions: u64 },
}

impl EnumerationResult {
    pub fn num_solutions(&self) -> u64 {
        match self {
            EnumerationResult::Exhausted { num_solutions }
            | EnumerationResult::Stopped { num_solutions } => *num_solutions,
        }
    }

    pub fn satisfiability(&self) -> Satisfiability {
        match self {
            _ if self.num_solutions() > 0 => Satisfiability::True,
            EnumerationResult::Exhausted { .. } => Satisfiability::False,
            EnumerationResult::Stopped { .. } => Satisfiability::Undefined,
        }
    }
}

/// The result of a call to [`Solver::propagate`].
///
/// [`Solver::propagate`]: crate::Solver::propagate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropagationOutcome {
    /// Every propagator has reached its fixpoint.
    Fixpoint,
    /// Propagation derived an empty domain; the model is infeasible at the root.
    Contradiction,
}
