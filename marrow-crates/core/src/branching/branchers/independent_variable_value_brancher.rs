//! A [`Brancher`] which uses a single [`VariableSelector`] and a single [`ValueSelector`].

use std::marker::PhantomData;

use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::FirstFail;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::results::SolutionReference;

/// The brancher used when none is supplied: smallest domain first, lowest value first.
pub type DefaultBrancher =
    IndependentVariableValueBrancher<DomainId, FirstFail<DomainId>, InDomainMin>;

/// An implementation of a [`Brancher`] which simply uses a single
/// [`VariableSelector`] and a single [`ValueSelector`] independently of one another.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    /// The [`VariableSelector`] of the [`Brancher`], determines which (unfixed) variable to branch
    /// next on.
    pub(crate) variable_selector: VariableSelect,
    /// The [`ValueSelector`] of the [`Brancher`] determines which value in the domain to branch
    /// next on given a variable.
    pub(crate) value_selector: ValueSelect,
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl DefaultBrancher {
    /// Creates the default brancher over the given variables.
    pub fn default_over_all_variables(variables: &[DomainId]) -> DefaultBrancher {
        IndependentVariableValueBrancher::new(FirstFail::new(variables), InDomainMin)
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    /// First we select a variable
    ///  - If all variables under consideration are fixed (i.e. `select_variable` return None) then
    ///    we simply return None
    ///  - Otherwise we select a value and return the corresponding predicate
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        self.variable_selector
            .select_variable(context)
            .map(|selected_variable| self.value_selector.select_value(context, selected_variable))
    }

    fn on_conflict(&mut self) {
        self.variable_selector.on_conflict()
    }

    fn on_backtrack(&mut self) {
        self.variable_selector.on_backtrack()
    }

    fn on_solution(&mut self, solution: SolutionReference) {
        self.value_selector.on_solution(solution)
    }
}
