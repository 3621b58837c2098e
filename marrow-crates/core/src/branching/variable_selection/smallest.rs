use log::warn;

use super::variable_selector::unfixed_minimising;
use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the unfixed variable with the smallest lower bound.
#[derive(Debug)]
pub struct Smallest<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> Smallest<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The Smallest variable selector was not provided with any variables");
        }
        Smallest {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for Smallest<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        unfixed_minimising(&self.variables, context, |variable| {
            context.lower_bound(variable) as i64
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::create_for_testing;

    #[test]
    fn the_smallest_lower_bound_is_selected() {
        let (state, variables) = create_for_testing(&[(4, 10), (-2, 0), (-5, -5)]);
        let mut strategy = Smallest::new(&variables);
        let mut rng = TestRandom::default();
        let mut context = SelectionContext::new(state.domains(), &mut rng);

        assert_eq!(Some(variables[1]), strategy.select_variable(&mut context));
    }
}
