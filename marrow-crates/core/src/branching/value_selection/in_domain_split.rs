use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::predicates::Predicate;
use crate::engine::variables::IntegerVariable;
use crate::marrow_assert_advanced;
use crate::math::num_ext::NumExt;
use crate::predicate;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and removes the upper-half from the domain.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        let lower_bound = context.lower_bound(&decision_variable);
        let upper_bound = context.upper_bound(&decision_variable);
        let bound = lower_bound + <i32 as NumExt>::div_floor(upper_bound - lower_bound, 2);
        marrow_assert_advanced!(
            lower_bound <= bound && bound < upper_bound,
            "It should hold that {lower_bound} <= {bound} < {upper_bound}"
        );
        predicate!(decision_variable <= bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::create_for_testing;

    #[test]
    fn test_returns_correct_literal() {
        let (state, variables) = create_for_testing(&[(0, 10), (0, 1)]);
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(
            predicate!(variables[0] <= 5),
            InDomainSplit.select_value(&mut context, variables[0])
        );
        assert_eq!(
            predicate!(variables[1] <= 0),
            InDomainSplit.select_value(&mut context, variables[1])
        );
    }
}
