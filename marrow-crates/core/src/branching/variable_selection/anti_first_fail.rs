use log::warn;

use super::variable_selector::unfixed_minimising;
use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the unfixed variable with the most values in its domain.
#[derive(Debug)]
pub struct AntiFirstFail<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> AntiFirstFail<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The AntiFirstFail variable selector was not provided with any variables");
        }
        AntiFirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for AntiFirstFail<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        unfixed_minimising(&self.variables, context, |variable| {
            -(context.size(variable) as i64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::create_for_testing;

    #[test]
    fn the_largest_domain_is_selected() {
        let (state, variables) = create_for_testing(&[(0, 3), (10, 20), (0, 0)]);
        let mut strategy = AntiFirstFail::new(&variables);
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }
}
