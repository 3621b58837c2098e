#![cfg(test)]
//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.
use super::QueuePolicy;
use super::State;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Contradiction;
use crate::engine::domains::ReadDomains;
use crate::engine::predicates::Predicate;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorHandle;
use crate::engine::reversible::StoreDiscipline;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;

/// A container for variables and propagators, which can be used to test propagators in
/// isolation from the search.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) state: State,
}

impl TestSolver {
    /// A solver which calls every propagator a second time and counts the calls which still
    /// changed a domain.
    pub(crate) fn with_idempotence_check() -> TestSolver {
        TestSolver {
            state: State::new(StoreDiscipline::default(), QueuePolicy::default(), true),
        }
    }

    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.state
            .new_interval(lb, ub, None)
            .expect("the test requested an empty domain")
    }

    pub(crate) fn new_sparse_variable(&mut self, values: &[i32]) -> DomainId {
        self.state
            .new_sparse(values.to_vec(), None)
            .expect("the test requested an empty domain")
    }

    pub(crate) fn new_literal(&mut self) -> Literal {
        Literal::new(self.new_variable(0, 1))
    }

    /// Add the propagator and run it (and every other propagator) to the fixpoint.
    pub(crate) fn new_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError> {
        self.state.add_propagator(constructor, None)
    }

    pub(crate) fn propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> &P {
        self.state
            .propagators
            .get_propagator(handle)
            .expect("the handle has the type of the propagator")
    }

    pub(crate) fn is_active<P>(&self, handle: PropagatorHandle<P>) -> bool {
        self.state.is_active(handle.untyped())
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.domains().lower_bound(&var)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.domains().upper_bound(&var)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        self.state.domains().contains(&var, value)
    }

    pub(crate) fn is_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        self.state.domains().is_fixed(&var)
    }

    #[track_caller]
    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual = (self.lower_bound(var.clone()), self.upper_bound(var.clone()));
        assert_eq!((lb, ub), actual, "unexpected bounds for {var:?}");
    }

    /// Post a change as the search would and propagate to the fixpoint.
    pub(crate) fn post(&mut self, predicate: Predicate) -> Result<(), Contradiction> {
        let _ = self.state.post(predicate)?;
        self.state.propagate_to_fixed_point()
    }

    pub(crate) fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: Var,
        bound: i32,
    ) -> Result<(), Contradiction> {
        self.post(var.lower_bound_predicate(bound))
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: Var,
        bound: i32,
    ) -> Result<(), Contradiction> {
        self.post(var.upper_bound_predicate(bound))
    }

    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: Var,
        value: i32,
    ) -> Result<(), Contradiction> {
        self.post(var.disequality_predicate(value))
    }

    pub(crate) fn assign<Var: IntegerVariable>(
        &mut self,
        var: Var,
        value: i32,
    ) -> Result<(), Contradiction> {
        self.post(var.equality_predicate(value))
    }

    pub(crate) fn set_literal(&mut self, literal: Literal, value: bool) -> Result<(), Contradiction> {
        if value {
            self.post(literal.get_true_predicate())
        } else {
            self.post(literal.get_false_predicate())
        }
    }

    /// Open a new world; changes made after this call are undone by [`TestSolver::pop`].
    pub(crate) fn push(&mut self) {
        self.state.push();
    }

    pub(crate) fn pop(&mut self) {
        let world = self.state.world();
        self.state.restore_to(world - 1);
    }
}
