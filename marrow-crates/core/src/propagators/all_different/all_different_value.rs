use super::entailment_of_all_different;
use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::notifications::DomainEvents;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Priority;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`AllDifferentValuePropagator`].
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentValuePropagatorArgs<Var> {
    pub(crate) vars: Box<[Var]>,
}

impl<Var> PropagatorConstructor for AllDifferentValuePropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = AllDifferentValuePropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let AllDifferentValuePropagatorArgs { vars } = self;

        for (i, x_i) in vars.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::BOUNDS, LocalId::from(i as u32));
        }

        AllDifferentValuePropagator { vars }
    }
}

/// Forward checking for `all_different(vars)`: the value of every fixed variable is removed
/// from all other variables.
///
/// Reaches the same fixpoint as the decomposition into binary disequalities, with a single
/// propagator.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentValuePropagator<Var> {
    vars: Box<[Var]>,
}

impl<Var> Propagator for AllDifferentValuePropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "AllDiffValue"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let mut num_fixed = 0;

        for (i, x_i) in self.vars.iter().enumerate() {
            if !context.is_fixed(x_i) {
                continue;
            }
            num_fixed += 1;

            let value = context.lower_bound(x_i);
            for (j, x_j) in self.vars.iter().enumerate() {
                if i != j {
                    let _ = context.remove(x_j, value)?;
                }
            }
        }

        if num_fixed == self.vars.len() {
            context.set_passive();
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        entailment_of_all_different(&self.vars, domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn fixed_values_are_removed_from_the_others() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 1);
        let y = solver.new_variable(1, 3);
        let z = solver.new_sparse_variable(&[1, 2, 3]);

        let _ = solver
            .new_propagator(AllDifferentValuePropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect("no conflict");

        solver.assert_bounds(y, 2, 3);
        solver.assert_bounds(z, 2, 3);
    }

    #[test]
    fn removals_cascade_to_a_fixpoint() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let z = solver.new_variable(1, 3);

        let _ = solver
            .new_propagator(AllDifferentValuePropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect("no conflict");

        solver.assign(x, 1).expect("no conflict");
        solver.assert_bounds(y, 2, 2);
        solver.assert_bounds(z, 3, 3);
    }

    #[test]
    fn equal_fixed_values_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(4, 4);
        let y = solver.new_variable(0, 10);
        let z = solver.new_variable(4, 4);

        let _ = solver
            .new_propagator(AllDifferentValuePropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect_err("x and z are both 4");
    }

    #[test]
    fn interior_values_survive_in_interval_domains() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(5, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(AllDifferentValuePropagatorArgs {
                vars: [x, y].into(),
            })
            .expect("no conflict");

        solver.assert_bounds(y, 0, 10);
        let _ = solver.assign(y, 5).expect_err("5 is taken by x");
    }

    #[test]
    fn a_taken_value_reached_by_a_bound_is_removed() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(5, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(AllDifferentValuePropagatorArgs {
                vars: [x, y].into(),
            })
            .expect("no conflict");

        solver.set_upper_bound(y, 5).expect("no conflict");
        solver.assert_bounds(y, 0, 4);
    }
}
