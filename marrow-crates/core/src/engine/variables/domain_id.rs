use std::fmt::Debug;
use std::fmt::Display;

use enumset::EnumSet;

use super::AffineView;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::containers::StorageKey;
use crate::engine::domains::Domains;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;

/// The identity of an integer domain owned by the solver.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId {
    id: u32,
}

impl DomainId {
    pub const fn new(id: u32) -> Self {
        DomainId { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl IntegerVariable for DomainId {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, domains: Domains<'_>) -> i32 {
        domains.lower_bound_of(*self)
    }

    fn upper_bound(&self, domains: Domains<'_>) -> i32 {
        domains.upper_bound_of(*self)
    }

    fn contains(&self, domains: Domains<'_>, value: i32) -> bool {
        domains.contains_value(*self, value)
    }

    fn size(&self, domains: Domains<'_>) -> u64 {
        domains.size_of(*self)
    }

    fn iterate_domain<'a>(&self, domains: Domains<'a>) -> impl Iterator<Item = i32> + 'a {
        domains.values_of(*self)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>) {
        watchers.watch_all(*self, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> IntDomainEvent {
        event.unwrap()
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
