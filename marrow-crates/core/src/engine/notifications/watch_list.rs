use enumset::EnumSet;

use super::IntDomainEvent;
use crate::containers::KeyedVec;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::DomainId;

/// For every domain and every event, the propagator-variable pairs that must be notified.
#[derive(Debug, Default)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, [Vec<PropagatorVarId>; 4]>,
}

fn slot(event: IntDomainEvent) -> usize {
    match event {
        IntDomainEvent::Assign => 0,
        IntDomainEvent::LowerBound => 1,
        IntDomainEvent::UpperBound => 2,
        IntDomainEvent::Removal => 3,
    }
}

impl WatchList {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Default::default());
    }

    pub(crate) fn watch(
        &mut self,
        watcher: PropagatorVarId,
        domain: DomainId,
        events: EnumSet<IntDomainEvent>,
    ) {
        for event in events {
            let watchers = &mut self.watchers[domain][slot(event)];
            if !watchers.contains(&watcher) {
                watchers.push(watcher);
            }
        }
    }

    pub(crate) fn get_affected(
        &self,
        event: IntDomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        &self.watchers[domain][slot(event)]
    }

    pub(crate) fn num_watchers(&self, domain: DomainId) -> usize {
        self.watchers[domain].iter().map(Vec::len).sum()
    }
}

/// Registers one propagator-variable pair with the watch list.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchList,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<IntDomainEvent>) {
        self.watch_list.watch(self.propagator_var, domain, events);
    }
}
