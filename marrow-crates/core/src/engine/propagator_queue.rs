use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use enumset::EnumSet;

use crate::containers::KeyedVec;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagatorId;
use crate::marrow_assert_moderate;

/// The order in which pending propagators are called.
///
/// The fixpoint reached does not depend on the policy, only the amount of work to reach it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueuePolicy {
    /// One first-in-first-out queue per [`Priority`]; the highest priority goes first.
    #[default]
    PriorityBuckets,
    /// A single first-in-first-out queue.
    Fifo,
    /// A single last-in-first-out stack.
    Lifo,
}

/// Pending propagators, each with the events it has not seen yet.
///
/// A propagator is in the queue at most once; further events for an enqueued propagator are
/// merged into its pending set.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    policy: QueuePolicy,
    queues: Vec<VecDeque<PropagatorId>>,
    pending: KeyedVec<PropagatorId, Option<EnumSet<IntDomainEvent>>>,
    num_enqueued: usize,
    present_priorities: BinaryHeap<Reverse<u32>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        Self::new(QueuePolicy::default())
    }
}

impl PropagatorQueue {
    pub(crate) fn new(policy: QueuePolicy) -> PropagatorQueue {
        let num_queues = match policy {
            QueuePolicy::PriorityBuckets => Priority::NUM_LEVELS,
            QueuePolicy::Fifo | QueuePolicy::Lifo => 1,
        };

        PropagatorQueue {
            policy,
            queues: vec![VecDeque::new(); num_queues],
            pending: KeyedVec::default(),
            num_enqueued: 0,
            present_priorities: BinaryHeap::new(),
        }
    }

    pub(crate) fn policy(&self) -> QueuePolicy {
        self.policy
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.num_enqueued
    }

    pub(crate) fn enqueue_propagator(
        &mut self,
        propagator_id: PropagatorId,
        priority: Priority,
        events: EnumSet<IntDomainEvent>,
    ) {
        self.pending.accomodate(propagator_id, None);

        if let Some(pending) = self.pending[propagator_id].as_mut() {
            *pending |= events;
            return;
        }

        self.pending[propagator_id] = Some(events);
        self.num_enqueued += 1;

        let queue = match self.policy {
            QueuePolicy::PriorityBuckets => priority as usize,
            QueuePolicy::Fifo | QueuePolicy::Lifo => 0,
        };
        if self.queues[queue].is_empty() {
            self.present_priorities.push(Reverse(queue as u32));
        }
        self.queues[queue].push_back(propagator_id);
    }

    /// Remove the next propagator, returning it together with its pending events.
    pub(crate) fn pop(&mut self) -> Option<(PropagatorId, EnumSet<IntDomainEvent>)> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        marrow_assert_moderate!(!self.queues[top_priority].is_empty());

        let next_propagator_id = match self.policy {
            QueuePolicy::Lifo => self.queues[top_priority].pop_back(),
            QueuePolicy::PriorityBuckets | QueuePolicy::Fifo => {
                self.queues[top_priority].pop_front()
            }
        }?;

        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }
        self.num_enqueued -= 1;

        let events = self.pending[next_propagator_id]
            .take()
            .expect("every queued propagator has pending events");
        Some((next_propagator_id, events))
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(priority)) = self.present_priorities.pop() {
            self.queues[priority as usize].clear();
        }

        for pending in self.pending.iter_mut() {
            *pending = None;
        }

        self.num_enqueued = 0;
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.pending
            .get(propagator_id)
            .is_some_and(|pending| pending.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queue: &mut PropagatorQueue) -> Vec<u32> {
        std::iter::from_fn(|| queue.pop().map(|(id, _)| id.0)).collect()
    }

    #[test]
    fn priority_buckets_follow_the_priority() {
        let mut queue = PropagatorQueue::new(QueuePolicy::PriorityBuckets);

        queue.enqueue_propagator(PropagatorId(1), Priority::High, EnumSet::all());
        queue.enqueue_propagator(PropagatorId(0), Priority::Medium, EnumSet::all());
        queue.enqueue_propagator(PropagatorId(3), Priority::VeryLow, EnumSet::all());
        queue.enqueue_propagator(PropagatorId(4), Priority::Low, EnumSet::all());
        queue.enqueue_propagator(PropagatorId(2), Priority::High, EnumSet::all());

        assert_eq!(vec![1, 2, 0, 4, 3], ids(&mut queue));
        assert!(queue.is_empty());
    }

    #[test]
    fn fifo_and_lifo_ignore_the_priority() {
        let mut fifo = PropagatorQueue::new(QueuePolicy::Fifo);
        let mut lifo = PropagatorQueue::new(QueuePolicy::Lifo);

        for (id, priority) in [(0, Priority::Low), (1, Priority::High), (2, Priority::Medium)] {
            fifo.enqueue_propagator(PropagatorId(id), priority, EnumSet::all());
            lifo.enqueue_propagator(PropagatorId(id), priority, EnumSet::all());
        }

        assert_eq!(vec![0, 1, 2], ids(&mut fifo));
        assert_eq!(vec![2, 1, 0], ids(&mut lifo));
    }

    #[test]
    fn enqueueing_twice_merges_events() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(
            PropagatorId(0),
            Priority::High,
            IntDomainEvent::LowerBound.into(),
        );
        queue.enqueue_propagator(
            PropagatorId(0),
            Priority::High,
            IntDomainEvent::Assign.into(),
        );

        assert_eq!(1, queue.len());
        assert_eq!(
            Some((
                PropagatorId(0),
                IntDomainEvent::LowerBound | IntDomainEvent::Assign
            )),
            queue.pop()
        );
        assert!(!queue.is_propagator_enqueued(PropagatorId(0)));
    }

    #[test]
    fn clearing_forgets_pending_events() {
        let mut queue = PropagatorQueue::default();
        queue.enqueue_propagator(PropagatorId(2), Priority::Low, EnumSet::all());

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(None, queue.pop());

        queue.enqueue_propagator(
            PropagatorId(2),
            Priority::Low,
            IntDomainEvent::Removal.into(),
        );
        assert_eq!(
            Some((PropagatorId(2), EnumSet::only(IntDomainEvent::Removal))),
            queue.pop()
        );
    }
}
