use itertools::Itertools;

use super::entailment_of_all_different;
use crate::basic_types::Contradiction;
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

/// The [`PropagatorConstructor`] for the [`AllDifferentBoundsPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentBoundsPropagatorArgs<Var> {
    pub(crate) vars: Box<[Var]>,
}

impl<Var> PropagatorConstructor for AllDifferentBoundsPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = AllDifferentBoundsPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let AllDifferentBoundsPropagatorArgs { vars } = self;

        for (i, x_i) in vars.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::BOUNDS, LocalId::from(i as u32));
        }

        AllDifferentBoundsPropagator { vars }
    }
}

/// Bounds consistency for `all_different(vars)` through Hall intervals.
///
/// An interval `[a, b]` which contains the domains of exactly `b - a + 1` variables is a Hall
/// interval: those variables use up all of its values, so no other variable can take a value
/// in it. More than `b - a + 1` contained domains is a conflict. Every interval spanned by a
/// lower bound and an upper bound is checked, which is cubic in the number of variables.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentBoundsPropagator<Var> {
    vars: Box<[Var]>,
}

impl<Var: IntegerVariable> AllDifferentBoundsPropagator<Var> {
    /// Applies every Hall interval found on the current bounds once. Returns whether a bound
    /// changed.
    fn prune_hall_intervals(
        &self,
        context: &mut PropagationContextMut,
    ) -> Result<bool, Contradiction> {
        let bounds = self
            .vars
            .iter()
            .map(|var| (context.lower_bound(var), context.upper_bound(var)))
            .collect_vec();

        let lower_bounds = bounds.iter().map(|&(lb, _)| lb).sorted_unstable().dedup();
        let upper_bounds = bounds
            .iter()
            .map(|&(_, ub)| ub)
            .sorted_unstable()
            .dedup()
            .collect_vec();

        let mut changed = false;
        for a in lower_bounds {
            for &b in upper_bounds.iter().filter(|&&b| b >= a) {
                let num_inside = bounds
                    .iter()
                    .filter(|&&(lb, ub)| lb >= a && ub <= b)
                    .count() as i64;
                let capacity = i64::from(b) - i64::from(a) + 1;

                if num_inside > capacity {
                    return Err(context.conflict("more variables than values in an interval"));
                }
                if num_inside < capacity {
                    continue;
                }

                for (var, &(lb, ub)) in self.vars.iter().zip(bounds.iter()) {
                    if lb >= a && ub <= b {
                        continue;
                    }
                    if lb >= a && lb <= b {
                        changed |= context.set_lower_bound(var, b + 1)?;
                    }
                    if ub >= a && ub <= b {
                        changed |= context.set_upper_bound(var, a - 1)?;
                    }
                }
            }
        }

        Ok(changed)
    }
}

impl<Var> Propagator for AllDifferentBoundsPropagator<Var>
where
    Var: IntegerVariable,
{
    fn name(&self) -> &str {
        "AllDiffBounds"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn is_idempotent(&self) -> bool {
        true
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        while self.prune_hall_intervals(&mut context)? {}

        if self.vars.iter().all(|var| context.is_fixed(var)) {
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
    fn hall_interval_pushes_other_bounds() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let z = solver.new_variable(1, 4);

        let _ = solver
            .new_propagator(AllDifferentBoundsPropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect("no conflict");

        solver.assert_bounds(z, 3, 4);
    }

    #[test]
    fn pigeonhole_conflicts() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 2);
        let y = solver.new_variable(1, 2);
        let z = solver.new_variable(2, 2);

        let _ = solver
            .new_propagator(AllDifferentBoundsPropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect_err("three variables over two values");
    }

    #[test]
    fn upper_bounds_are_pushed_below_hall_intervals() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(3, 4);
        let y = solver.new_variable(3, 4);
        let z = solver.new_variable(0, 4);

        let _ = solver
            .new_propagator(AllDifferentBoundsPropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect("no conflict");

        solver.assert_bounds(z, 0, 2);
    }

    #[test]
    fn chained_hall_intervals_reach_a_fixpoint() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 1);
        let b = solver.new_variable(1, 2);
        let c = solver.new_variable(1, 3);
        let d = solver.new_variable(1, 4);

        let _ = solver
            .new_propagator(AllDifferentBoundsPropagatorArgs {
                vars: [a, b, c, d].into(),
            })
            .expect("no conflict");

        solver.assert_bounds(b, 2, 2);
        solver.assert_bounds(c, 3, 3);
        solver.assert_bounds(d, 4, 4);
    }

    #[test]
    fn interior_hall_interval_is_not_a_bound_change() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 3);
        let y = solver.new_variable(2, 3);
        let z = solver.new_variable(1, 4);

        let _ = solver
            .new_propagator(AllDifferentBoundsPropagatorArgs {
                vars: [x, y, z].into(),
            })
            .expect("no conflict");

        solver.assert_bounds(z, 1, 4);
    }
}
