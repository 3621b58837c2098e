#[cfg(doc)]
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A trait containing the interface for [`VariableSelector`]s, specifying the appropriate hooks
/// into the solver and the methods required for selecting variables.
pub trait VariableSelector<Var> {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] have been assigned. Otherwise it should return the variable to
    /// branch on next.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;

    /// Called after a conflict has been found, see [`Brancher::on_conflict`].
    fn on_conflict(&mut self) {}

    /// Called whenever the search backtracks, see [`Brancher::on_backtrack`].
    fn on_backtrack(&mut self) {}
}

/// The unfixed variable with the smallest key, where ties go to the earliest variable.
pub(super) fn unfixed_minimising<Var: IntegerVariable>(
    variables: &[Var],
    context: &SelectionContext,
    key: impl Fn(&Var) -> i64,
) -> Option<Var> {
    let mut selected: Option<(&Var, i64)> = None;

    for variable in variables.iter().filter(|variable| !context.is_fixed(*variable)) {
        let value = key(variable);
        if selected.is_none_or(|(_, best)| value < best) {
            selected = Some((variable, value));
        }
    }

    selected.map(|(variable, _)| variable.clone())
}
