use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::predicates::Predicate;
use crate::engine::variables::IntegerVariable;
use crate::math::num_ext::NumExt;
use crate::predicate;

/// A [`ValueSelector`] which selects the middle value between the bounds of the domain (or if
/// this value is not in the domain then the closest value to it, preferring the smaller one).
#[derive(Debug, Copy, Clone)]
pub struct InDomainMiddle;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMiddle {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> Predicate {
        let lower_bound = context.lower_bound(&decision_variable);
        let upper_bound = context.upper_bound(&decision_variable);
        let middle = lower_bound + <i32 as NumExt>::div_floor(upper_bound - lower_bound, 2);

        let mut offset = 0;
        while middle - offset >= lower_bound || middle + offset <= upper_bound {
            if context.contains(&decision_variable, middle - offset) {
                return predicate!(decision_variable == middle - offset);
            }
            if context.contains(&decision_variable, middle + offset) {
                return predicate!(decision_variable == middle + offset);
            }
            offset += 1;
        }

        unreachable!("the bounds of a domain are always members of it")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::create_for_testing;

    #[test]
    fn test_returns_correct_literal() {
        let (state, variables) = create_for_testing(&[(0, 10), (1, 2), (1, 3), (-10, -5)]);
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(
            predicate!(variables[0] == 5),
            InDomainMiddle.select_value(&mut context, variables[0])
        );
        assert_eq!(
            predicate!(variables[1] == 1),
            InDomainMiddle.select_value(&mut context, variables[1])
        );
        assert_eq!(
            predicate!(variables[2] == 2),
            InDomainMiddle.select_value(&mut context, variables[2])
        );
        assert_eq!(
            predicate!(variables[3] == -8),
            InDomainMiddle.select_value(&mut context, variables[3])
        );
    }

    #[test]
    fn symmetric_negative_domain_selects_zero() {
        let (state, variables) = create_for_testing(&[(-5, 5)]);
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(
            predicate!(variables[0] == 0),
            InDomainMiddle.select_value(&mut context, variables[0])
        );
    }

    #[test]
    fn test_returns_correct_literal_no_middle() {
        let (mut state, variables) = create_for_testing(&[(1, 10)]);
        let _ = state.post(predicate!(variables[0] != 5));
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(
            predicate!(variables[0] == 4),
            InDomainMiddle.select_value(&mut context, variables[0])
        );
    }
}
