use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::contexts::NotificationContext;
use super::LocalId;
use super::PropagationContextMut;
use crate::basic_types::Entailment;
use crate::basic_types::PropagationStatus;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::domains::Domains;
use crate::engine::notifications::OpaqueDomainEvent;
#[cfg(doc)]
use crate::engine::propagation::PropagatorConstructor;
use crate::statistics::StatisticLogger;

// Needed to get a concrete propagator back out of a `Box<dyn Propagator>`.
impl_downcast!(Propagator);

/// A propagator removes values from domains which will never be in any solution, or raises
/// explicit conflicts.
///
/// The only required functions are [`Propagator::name`] and [`Propagator::propagate`]; all
/// other functions have default implementations.
///
/// A propagator must be sound (it never removes a value that is part of a solution of its
/// relation), it must terminate, and it should be idempotent at its fixpoint. It is not required
/// to reach its own fixpoint in one call: the scheduler calls it again as long as it is notified
/// of changes.
pub trait Propagator: Downcast {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Remove values which cannot be part of any solution given the current domains, or detect
    /// that no solution exists.
    ///
    /// The events on the scope since the previous call are available through
    /// [`PropagationContextMut::events`]. Only the variables in the scope of the propagator may
    /// be examined or changed.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatus;

    /// Returns whether the propagator should be enqueued when an event happens to one of the
    /// variables it is subscribed to (as registered during creation with
    /// [`PropagatorConstructor`]).
    ///
    /// This can be used to incrementally maintain data structures, and should only be used for
    /// computationally cheap logic. By default the propagator is always enqueued.
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after backtracking, allowing the propagator to update its internal data structures
    /// given the new variable domains.
    ///
    /// By default this function does nothing.
    fn synchronise(&mut self, _domains: Domains<'_>) {}

    /// Returns the [`Priority`] of the propagator, used for determining the order in which
    /// propagators are called under [`QueuePolicy::PriorityBuckets`].
    ///
    /// By default the priority is set to [`Priority::VeryLow`].
    ///
    /// [`QueuePolicy::PriorityBuckets`]: crate::engine::QueuePolicy::PriorityBuckets
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Whether the relation of the propagator holds for all, no, or only some of the
    /// assignments in the current domains. Must not change any state.
    fn is_entailed(&self, _domains: Domains<'_>) -> Entailment {
        Entailment::Undefined
    }

    /// An idempotent propagator is at its fixpoint after every call, so it is not notified of
    /// events it caused itself.
    fn is_idempotent(&self) -> bool {
        false
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// The priority of a propagator, used for determining the order in which propagators will be
/// called.
///
/// Propagators with high priority are propagated before propagators with low(er) priority. If two
/// propagators have the same priority, they are called in the order in which they were enqueued.
///
/// Typically, propagators with low computational complexity should be assigned a high
/// priority (i.e., should be propagated before computationally expensive propagators).
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_LEVELS: usize = 4;
}
