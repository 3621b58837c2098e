use std::fmt::Display;

use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change to the domain of an integer variable.
#[derive(Debug, EnumSetType, Hash)]
pub enum IntDomainEvent {
    /// The domain became a single value.
    Assign,
    LowerBound,
    UpperBound,
    /// A value strictly between the bounds was removed.
    Removal,
}

impl Display for IntDomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntDomainEvent::Assign => write!(f, "assign"),
            IntDomainEvent::LowerBound => write!(f, "lower bound"),
            IntDomainEvent::UpperBound => write!(f, "upper bound"),
            IntDomainEvent::Removal => write!(f, "removal"),
        }
    }
}

/// A set of [`IntDomainEvent`]s a propagator subscribes to for a variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    int_events: EnumSet<IntDomainEvent>,
}

impl DomainEvents {
    /// Tightening of either bound.
    pub const BOUNDS: DomainEvents =
        DomainEvents::new(enum_set!(IntDomainEvent::LowerBound | IntDomainEvent::UpperBound));
    /// Every change to the domain.
    pub const ANY_INT: DomainEvents = DomainEvents::new(enum_set!(
        IntDomainEvent::Assign
            | IntDomainEvent::LowerBound
            | IntDomainEvent::UpperBound
            | IntDomainEvent::Removal
    ));
    pub const LOWER_BOUND: DomainEvents = DomainEvents::new(enum_set!(IntDomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents = DomainEvents::new(enum_set!(IntDomainEvent::UpperBound));
    pub const ASSIGN: DomainEvents = DomainEvents::new(enum_set!(IntDomainEvent::Assign));

    pub const fn new(int_events: EnumSet<IntDomainEvent>) -> DomainEvents {
        DomainEvents { int_events }
    }

    pub fn int_events(&self) -> EnumSet<IntDomainEvent> {
        self.int_events
    }
}

/// An event as it happened to a domain, before it is translated to the perspective of a view.
///
/// Use [`IntegerVariable::unpack_event`](crate::variables::IntegerVariable::unpack_event) to
/// obtain the event as seen through a particular variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpaqueDomainEvent(IntDomainEvent);

impl From<IntDomainEvent> for OpaqueDomainEvent {
    fn from(event: IntDomainEvent) -> Self {
        OpaqueDomainEvent(event)
    }
}

impl OpaqueDomainEvent {
    pub(crate) fn unwrap(self) -> IntDomainEvent {
        self.0
    }
}
