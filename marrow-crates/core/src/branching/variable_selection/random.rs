use log::warn;

use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// A [`VariableSelector`] which selects an unfixed variable uniformly at random.
#[derive(Debug)]
pub struct RandomSelector<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> RandomSelector<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The RandomSelector variable selector was not provided with any variables");
        }
        RandomSelector {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for RandomSelector<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        let unfixed = self
            .variables
            .iter()
            .filter(|variable| !context.is_fixed(*variable))
            .collect::<Vec<_>>();
        if unfixed.is_empty() {
            return None;
        }

        let index = context.random().generate_usize_in_range(0..unfixed.len());
        Some(unfixed[index].clone())
    }
}
