#[cfg(doc)]
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::results::SolutionReference;

/// A trait containing the interface for [`ValueSelector`]s, specifying the appropriate hooks into
/// the solver and the methods required for selecting a value for a given variable.
pub trait ValueSelector<Var> {
    /// Determines which value to select for a given `decision_variable`. The decision variable is
    /// never fixed when this method is called.
    ///
    /// The search first tries the returned [`Predicate`] and, after refuting it, its negation.
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var)
        -> Predicate;

    /// Called when a solution is found, see [`Brancher::on_solution`].
    fn on_solution(&mut self, _solution: SolutionReference) {}
}
