#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::predicates::Predicate;
use crate::results::SolutionReference;
use crate::statistics::StatisticLogger;

/// Chooses the decisions of the depth-first search, usually by combining a
/// [`VariableSelector`] with a [`ValueSelector`].
///
/// A decision must remove at least one value from the current domains. On backtracking the
/// search posts the negation of the decision in the same world as the decision was made.
pub trait Brancher {
    /// Report the counters of the brancher; [`create_statistics_struct!`] generates a struct
    /// which can do this.
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}

    /// The next decision, or [`None`] once every variable the brancher considers is fixed.
    ///
    /// The brancher only proposes the [`Predicate`]; the search applies it. The context is
    /// mutable so selectors can draw from its random generator.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate>;

    /// A propagation failed; called before the search backtracks.
    fn on_conflict(&mut self) {}

    fn on_backtrack(&mut self) {}

    /// The current assignment is a solution.
    fn on_solution(&mut self, _solution: SolutionReference) {}

    /// The search went back to the root to start over.
    fn on_restart(&mut self) {}
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }

    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        (**self).next_decision(context)
    }

    fn on_conflict(&mut self) {
        (**self).on_conflict()
    }

    fn on_backtrack(&mut self) {
        (**self).on_backtrack()
    }

    fn on_solution(&mut self, solution: SolutionReference) {
        (**self).on_solution(solution)
    }

    fn on_restart(&mut self) {
        (**self).on_restart()
    }
}
