use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

use super::Priority;
use super::Propagator;
use super::PropagatorId;
use crate::constraints::ConstraintId;
use crate::containers::KeyedVec;
use crate::engine::reversible::ReversibleBool;

/// Scheduling information the engine keeps next to every propagator.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagatorInfo {
    /// Cleared when the propagator goes passive; restored on backtracking.
    pub(crate) activity: ReversibleBool,
    pub(crate) priority: Priority,
    pub(crate) idempotent: bool,
    pub(crate) constraint: Option<ConstraintId>,
}

/// A central store for propagators.
#[derive(Default)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    info: KeyedVec<PropagatorId, PropagatorInfo>,
}

/// A typed wrapper around a [`PropagatorId`] that allows retrieving concrete propagators from the
/// solver.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PropagatorHandle<P> {
    id: PropagatorId,
    propagator: PhantomData<P>,
}

impl<P> PropagatorHandle<P> {
    pub(crate) fn new(id: PropagatorId) -> Self {
        PropagatorHandle {
            id,
            propagator: PhantomData,
        }
    }

    /// Get a type-erased handle to the propagator.
    pub fn untyped(self) -> PropagatorId {
        self.id
    }
}

impl<P> Clone for PropagatorHandle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for PropagatorHandle<P> {}

impl PropagatorStore {
    pub(crate) fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    pub(crate) fn next_id(&self) -> PropagatorId {
        PropagatorId(self.propagators.len() as u32)
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = PropagatorId> {
        self.propagators.keys()
    }

    pub(crate) fn iter_propagators(&self) -> impl Iterator<Item = &dyn Propagator> + '_ {
        self.propagators.iter().map(|b| b.as_ref())
    }

    pub(crate) fn iter_propagators_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Box<dyn Propagator>> + '_ {
        self.propagators.iter_mut()
    }

    pub(crate) fn add(
        &mut self,
        propagator: Box<dyn Propagator>,
        info: PropagatorInfo,
    ) -> PropagatorId {
        let id = self.propagators.push(propagator);
        let _ = self.info.push(info);
        id
    }

    pub(crate) fn info(&self, id: PropagatorId) -> PropagatorInfo {
        self.info[id]
    }

    /// Get a reference to the propagator identified by the given handle.
    pub(crate) fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self[handle.id].downcast_ref()
    }

    /// Get an exclusive reference to the propagator identified by the given handle.
    pub(crate) fn get_propagator_mut<P: Propagator>(
        &mut self,
        handle: PropagatorHandle<P>,
    ) -> Option<&mut P> {
        self[handle.id].downcast_mut()
    }
}

impl Index<PropagatorId> for PropagatorStore {
    type Output = dyn Propagator;

    fn index(&self, index: PropagatorId) -> &Self::Output {
        self.propagators[index].as_ref()
    }
}

impl IndexMut<PropagatorId> for PropagatorStore {
    fn index_mut(&mut self, index: PropagatorId) -> &mut Self::Output {
        self.propagators[index].as_mut()
    }
}

impl Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.propagators.iter().map(|propagator| propagator.name()))
            .finish()
    }
}
