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

/// The [`PropagatorConstructor`] for the [`BinaryEqualsPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct BinaryEqualsPropagatorArgs<AVar, BVar> {
    pub(crate) a: AVar,
    pub(crate) b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    type PropagatorImpl = BinaryEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryEqualsPropagatorArgs { a, b } = self;

        context.register(a.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        context.register(b.clone(), DomainEvents::ANY_INT, LocalId::from(1));

        BinaryEqualsPropagator { a, b }
    }
}

/// Propagator for the constraint `a = b`.
///
/// The bounds are made equal first; the holes of either side are then copied to the other,
/// which makes the propagator domain consistent.
#[derive(Clone, Debug)]
pub(crate) struct BinaryEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar, BVar> Propagator for BinaryEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "BinaryEq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let lower_bound = context.lower_bound(&self.a).max(context.lower_bound(&self.b));
        let upper_bound = context.upper_bound(&self.a).min(context.upper_bound(&self.b));
        if lower_bound > upper_bound {
            return Err(context.conflict("the domains of both sides are disjoint"));
        }

        let _ = context.set_lower_bound(&self.a, lower_bound)?;
        let _ = context.set_lower_bound(&self.b, lower_bound)?;
        let _ = context.set_upper_bound(&self.a, upper_bound)?;
        let _ = context.set_upper_bound(&self.b, upper_bound)?;

        let missing_in_b: Vec<i32> = self
            .a
            .iterate_domain(context.domains())
            .filter(|&value| !context.contains(&self.b, value))
            .collect();
        for value in missing_in_b {
            let _ = context.remove(&self.a, value)?;
        }

        let missing_in_a: Vec<i32> = self
            .b
            .iterate_domain(context.domains())
            .filter(|&value| !context.contains(&self.a, value))
            .collect();
        for value in missing_in_a {
            let _ = context.remove(&self.b, value)?;
        }

        if context.is_fixed(&self.a) {
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
            Entailment::False
        } else if a_lb == a_ub && b_lb == b_ub {
            Entailment::True
        } else if a_lb == a_ub && !domains.contains(&self.b, a_lb) {
            Entailment::False
        } else if b_lb == b_ub && !domains.contains(&self.a, b_lb) {
            Entailment::False
        } else {
            Entailment::Undefined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn bounds_are_intersected() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 6);
        let b = solver.new_variable(3, 9);

        let _ = solver
            .new_propagator(BinaryEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        solver.assert_bounds(a, 3, 6);
        solver.assert_bounds(b, 3, 6);
    }

    #[test]
    fn holes_are_copied_between_sides() {
        let mut solver = TestSolver::default();
        let a = solver.new_sparse_variable(&[1, 2, 3, 4, 5]);
        let b = solver.new_sparse_variable(&[1, 3, 5, 7]);

        let _ = solver
            .new_propagator(BinaryEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        assert!(!solver.contains(a, 2));
        assert!(!solver.contains(a, 4));
        solver.assert_bounds(b, 1, 5);
    }

    #[test]
    fn disjoint_domains_conflict() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 2);
        let b = solver.new_variable(3, 5);

        let _ = solver
            .new_propagator(BinaryEqualsPropagatorArgs { a, b })
            .expect_err("disjoint domains");
    }

    #[test]
    fn assignment_is_mirrored() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 10);
        let b = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(BinaryEqualsPropagatorArgs { a, b })
            .expect("no conflict");
        solver.assign(b, 7).expect("no conflict");

        solver.assert_bounds(a, 7, 7);
    }
}
