use enumset::EnumSet;

use crate::basic_types::Contradiction;
use crate::basic_types::PropagatorConflict;
use crate::engine::domains::DomainStore;
use crate::engine::domains::DomainUpdate;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::predicates::Predicate;
use crate::engine::propagation::PropagatorId;
use crate::engine::reversible::Environment;
use crate::engine::reversible::ReversibleBool;
use crate::engine::reversible::ReversibleCell;
use crate::engine::variables::IntegerVariable;

/// Provides information about the state of the solver to a propagator.
///
/// Domains can be read through the implementation of [`ReadDomains`], and changes to the domains
/// are made through [`PropagationContextMut::post`] and the bound helpers. Every change is
/// attributed to the propagator that owns the context.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    environment: &'a mut Environment,
    domain_store: &'a mut DomainStore,
    propagator_id: PropagatorId,
    events: EnumSet<IntDomainEvent>,
    activity: ReversibleBool,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        environment: &'a mut Environment,
        domain_store: &'a mut DomainStore,
        propagator_id: PropagatorId,
        events: EnumSet<IntDomainEvent>,
        activity: ReversibleBool,
    ) -> Self {
        PropagationContextMut {
            environment,
            domain_store,
            propagator_id,
            events,
            activity,
        }
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    /// The kinds of events that happened on the scope since the propagator was last called.
    pub fn events(&self) -> EnumSet<IntDomainEvent> {
        self.events
    }

    /// Make `predicate` true. Returns whether a domain changed.
    pub fn post(&mut self, predicate: Predicate) -> DomainUpdate {
        self.domain_store
            .post(self.environment, predicate, Some(self.propagator_id))
    }

    pub fn set_lower_bound<Var: IntegerVariable>(&mut self, var: &Var, bound: i32) -> DomainUpdate {
        self.post(var.lower_bound_predicate(bound))
    }

    pub fn set_upper_bound<Var: IntegerVariable>(&mut self, var: &Var, bound: i32) -> DomainUpdate {
        self.post(var.upper_bound_predicate(bound))
    }

    pub fn remove<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> DomainUpdate {
        self.post(var.disequality_predicate(value))
    }

    pub fn assign<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> DomainUpdate {
        self.post(var.equality_predicate(value))
    }

    pub fn read<Cell: ReversibleCell>(&self, cell: Cell) -> Cell::Value {
        self.environment.read(cell)
    }

    pub fn write<Cell: ReversibleCell>(&mut self, cell: Cell, value: Cell::Value) {
        self.environment.write(cell, value);
    }

    /// Stop calling the propagator until the search backtracks above the current world.
    ///
    /// Only call this when the propagator can never filter again under the current domains,
    /// typically because its relation is entailed.
    pub fn set_passive(&mut self) {
        self.environment.write(self.activity, false);
    }

    /// A conflict detected by the reasoning of the propagator.
    pub fn conflict(&self, reason: &'static str) -> Contradiction {
        PropagatorConflict {
            propagator: self.propagator_id,
            reason,
        }
        .into()
    }

    pub fn reborrow(&mut self) -> PropagationContextMut<'_> {
        PropagationContextMut {
            environment: self.environment,
            domain_store: self.domain_store,
            propagator_id: self.propagator_id,
            events: self.events,
            activity: self.activity,
        }
    }

    /// A context for a propagator nested in this one, with its own activity flag.
    pub(crate) fn nested(
        &mut self,
        events: EnumSet<IntDomainEvent>,
        activity: ReversibleBool,
    ) -> PropagationContextMut<'_> {
        PropagationContextMut {
            environment: self.environment,
            domain_store: self.domain_store,
            propagator_id: self.propagator_id,
            events,
            activity,
        }
    }
}

impl ReadDomains for PropagationContextMut<'_> {
    fn domains(&self) -> Domains<'_> {
        Domains::new(self.environment, self.domain_store)
    }
}
