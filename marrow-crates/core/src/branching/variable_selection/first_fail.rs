use log::warn;

use super::variable_selector::unfixed_minimising;
use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the unfixed variable with the fewest values in its domain.
///
/// Ties are broken in favour of the variable which was provided first.
#[derive(Debug)]
pub struct FirstFail<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> FirstFail<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for FirstFail<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        unfixed_minimising(&self.variables, context, |variable| {
            context.size(variable) as i64
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::create_for_testing;
    use crate::predicate;

    #[test]
    fn test_correctly_selected() {
        let (mut state, variables) = create_for_testing(&[(0, 10), (5, 20)]);
        let mut strategy = FirstFail::new(&variables);
        let mut rng = TestRandom::default();

        {
            let mut context = SelectionContext::new(state.domains(), &mut rng);
            assert_eq!(Some(variables[0]), strategy.select_variable(&mut context));
        }

        let _ = state.post(predicate!(variables[1] >= 15));

        let mut context = SelectionContext::new(state.domains(), &mut rng);
        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }

    #[test]
    fn ties_go_to_the_first_variable() {
        let (state, variables) = create_for_testing(&[(0, 3), (10, 13)]);
        let mut strategy = FirstFail::new(&variables);
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(Some(variables[0]), strategy.select_variable(&mut context));
    }
}
