use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::predicates::Predicate;
use crate::engine::variables::IntegerVariable;
use crate::predicate;

/// [`ValueSelector`] which chooses to assign the provided variable to its upper-bound.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        let upper_bound = context.upper_bound(&decision_variable);
        predicate!(decision_variable >= upper_bound)
    }
}
