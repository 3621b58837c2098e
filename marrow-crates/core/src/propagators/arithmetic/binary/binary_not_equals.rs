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

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagatorArgs<AVar, BVar> {
    pub(crate) a: AVar,
    pub(crate) b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryNotEqualsPropagatorArgs { a, b } = self;

        // An assignment always moves a bound. A bound can also move onto the value of the other
        // side after that value was kept in the interior of an interval.
        context.register(a.clone(), DomainEvents::BOUNDS, LocalId::from(0));
        context.register(b.clone(), DomainEvents::BOUNDS, LocalId::from(1));

        BinaryNotEqualsPropagator { a, b }
    }
}

/// Propagator for the constraint `a != b`.
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn is_idempotent(&self) -> bool {
        true
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let a_lb = context.lower_bound(&self.a);
        let a_ub = context.upper_bound(&self.a);
        let b_lb = context.lower_bound(&self.b);
        let b_ub = context.upper_bound(&self.b);

        if a_ub < b_lb || b_ub < a_lb {
            context.set_passive();
            return Ok(());
        }

        let removed = if a_lb == a_ub {
            let _ = context.remove(&self.b, a_lb)?;
            !context.contains(&self.b, a_lb)
        } else if b_lb == b_ub {
            let _ = context.remove(&self.a, b_lb)?;
            !context.contains(&self.a, b_lb)
        } else {
            false
        };

        // An interval domain keeps interior values; stay active until the other side is fixed.
        if removed {
            context.set_passive();
        }

        Ok(())
    }

    fn is_entailed(&self, domains: Domains<'_>) -> Entailment {
        let a_lb = domains.lower_bound(&self.a);
        let a_ub = domains.upper_bound(&self.a);
        let b_lb = domains.lower_bound(&self.b);
        let b_ub = domains.upper_bound(&self.b);

        if a_ub < b_lb || b_ub < a_lb {
            Entailment::True
        } else if a_lb == a_ub && b_lb == b_ub {
            // Both fixed with overlapping bounds means both take the same value.
            Entailment::False
        } else if a_lb == a_ub && !domains.contains(&self.b, a_lb) {
            Entailment::True
        } else if b_lb == b_ub && !domains.contains(&self.a, b_lb) {
            Entailment::True
        } else {
            Entailment::Undefined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;
    use crate::engine::variables::TransformableVariable;

    #[test]
    fn detects_conflict() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 0);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect_err("Expected conflict to be detected");
    }

    #[test]
    fn propagate_when_one_is_fixed() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 1);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("Expected no conflict to be detected");

        solver.assert_bounds(b, 1, 1);
    }

    #[test]
    fn propagates_once_a_side_is_assigned() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 10);
        let b = solver.new_sparse_variable(&[2, 4, 6]);

        let handle = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("Expected no conflict to be detected");
        assert!(solver.is_active(handle));

        solver.push();
        solver.assign(a, 4).expect("no conflict");
        assert!(!solver.contains(b, 4));
        assert!(!solver.is_active(handle));

        solver.pop();
        assert!(solver.contains(b, 4));
        assert!(solver.is_active(handle));
    }

    #[test]
    fn interior_value_of_an_interval_is_checked_on_assignment() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(0, 4);

        let handle = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("Expected no conflict to be detected");
        assert!(solver.contains(b, 2));
        assert!(solver.is_active(handle));

        let _ = solver
            .assign(b, 2)
            .expect_err("assigning the value of a is a conflict");
    }

    #[test]
    fn a_bound_moving_onto_the_other_value_is_pruned() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(0, 4);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("Expected no conflict to be detected");

        solver.set_lower_bound(b, 2).expect("no conflict");
        solver.assert_bounds(b, 3, 4);
    }

    #[test]
    fn works_through_views() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(3, 3);
        let b = solver.new_variable(-3, -2);

        // a != -b
        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs {
                a,
                b: b.scaled(-1),
            })
            .expect("Expected no conflict to be detected");

        solver.assert_bounds(b, -2, -2);
    }

    #[test]
    fn non_overlapping_is_entailed() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(6, 10);

        let handle = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("Expected no conflict to be detected");

        solver.assert_bounds(a, 0, 5);
        solver.assert_bounds(b, 6, 10);
        assert_eq!(
            Entailment::True,
            solver
                .propagator(handle)
                .is_entailed(solver.state.domains())
        );
    }
}
