use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::predicates::Predicate;
use crate::engine::variables::IntegerVariable;
use crate::marrow_assert_advanced;
use crate::math::num_ext::NumExt;
use crate::predicate;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and removes the lower-half from the domain.
#[derive(Debug, Copy, Clone)]
pub struct ReverseInDomainSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for ReverseInDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        let lower_bound = context.lower_bound(&decision_variable);
        let upper_bound = context.upper_bound(&decision_variable);
        let bound = lower_bound + <i32 as NumExt>::div_ceil(upper_bound - lower_bound, 2);
        marrow_assert_advanced!(
            lower_bound < bound && bound <= upper_bound,
            "It should hold that {lower_bound} < {bound} <= {upper_bound}"
        );
        predicate!(decision_variable >= bound)
    }
}
