use std::any::Any;

use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
#[cfg(doc)]
use crate::api::Solver;
use crate::engine::domains::DomainStore;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::WatchList;
use crate::engine::notifications::Watchers;
use crate::engine::reversible::Environment;
use crate::engine::reversible::ReversibleBool;
use crate::engine::reversible::ReversibleInt;
use crate::engine::reversible::ReversibleLong;
use crate::engine::reversible::ReversibleObject;
use crate::engine::variables::IntegerVariable;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued. Additionally, the propagator can be initialized with values that come from the state
/// of the solver.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// It represents a communication point between the [`Solver`] and the [`Propagator`].
/// Propagators use the [`PropagatorConstructorContext`] to register to domain changes
/// of variables, to allocate their reversible cells, and to retrieve the current bounds of
/// variables.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    environment: &'a mut Environment,
    domain_store: &'a DomainStore,
    watch_list: &'a mut WatchList,
    pub(crate) propagator_id: PropagatorId,
    /// Added to every local id registered through this context.
    local_id_offset: u32,
    /// A [`LocalId`] that is guaranteed not to be used to register any variables yet. Shared with
    /// every reborrowed context.
    next_local_id: &'a mut LocalId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        environment: &'a mut Environment,
        domain_store: &'a DomainStore,
        watch_list: &'a mut WatchList,
        propagator_id: PropagatorId,
        next_local_id: &'a mut LocalId,
    ) -> Self {
        PropagatorConstructorContext {
            environment,
            domain_store,
            watch_list,
            propagator_id,
            local_id_offset: 0,
            next_local_id,
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// The domain events determine when [`Propagator::notify()`] will be called on the propagator.
    /// The [`LocalId`] is internal information related to the propagator,
    /// which is used when calling [`Propagator::notify()`] to identify the variable.
    ///
    /// Each variable *must* have a unique [`LocalId`]. Most often this would be its index of the
    /// variable in the internal array of variables.
    pub fn register(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let local_id = local_id.shifted_by(self.local_id_offset);
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        if local_id >= *self.next_local_id {
            *self.next_local_id = local_id.next();
        }

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.int_events());
    }

    pub fn new_reversible_int(&mut self, value: i32) -> ReversibleInt {
        self.environment.new_int(value)
    }

    pub fn new_reversible_long(&mut self, value: i64) -> ReversibleLong {
        self.environment.new_long(value)
    }

    pub fn new_reversible_bool(&mut self, value: bool) -> ReversibleBool {
        self.environment.new_bool(value)
    }

    pub fn new_reversible_object<T: Any + Send + Sync>(&mut self, value: T) -> ReversibleObject<T> {
        self.environment.new_object(value)
    }

    /// Get a new [`LocalId`] which is guaranteed to be unused, relative to the offset of this
    /// context.
    pub fn get_next_local_id(&self) -> LocalId {
        LocalId::from(self.next_local_id.unpack().saturating_sub(self.local_id_offset))
    }

    /// Reborrow the current context to a new value with a shorter lifetime. Should be used when
    /// passing `Self` to another function that takes ownership, but the value is still needed
    /// afterwards.
    pub fn reborrow(&mut self) -> PropagatorConstructorContext<'_> {
        PropagatorConstructorContext {
            environment: self.environment,
            domain_store: self.domain_store,
            watch_list: self.watch_list,
            propagator_id: self.propagator_id,
            local_id_offset: self.local_id_offset,
            next_local_id: self.next_local_id,
        }
    }

    /// Reborrow the context for a nested propagator whose local ids are shifted by `offset`.
    pub(crate) fn with_offset(&mut self, offset: u32) -> PropagatorConstructorContext<'_> {
        let mut context = self.reborrow();
        context.local_id_offset += offset;
        context
    }
}

impl ReadDomains for PropagatorConstructorContext<'_> {
    fn domains(&self) -> Domains<'_> {
        Domains::new(self.environment, self.domain_store)
    }
}
