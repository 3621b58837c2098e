use enumset::EnumSet;
use log::trace;
use log::warn;

use super::propagator_queue::PropagatorQueue;
use super::QueuePolicy;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Contradiction;
use crate::basic_types::ModelError;
use crate::basic_types::PropagationStatus;
use crate::constraints::ConstraintId;
use crate::create_statistics_struct;
use crate::engine::domains::DomainStore;
use crate::engine::domains::DomainUpdate;
use crate::engine::domains::Domains;
use crate::engine::notifications::IntDomainEvent;
use crate::engine::notifications::WatchList;
use crate::engine::predicates::Predicate;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::NotificationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::PropagatorHandle;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorInfo;
use crate::engine::propagation::PropagatorStore;
use crate::engine::reversible::Environment;
use crate::engine::reversible::EnvironmentSnapshot;
use crate::engine::reversible::SnapshotError;
use crate::engine::reversible::StoreDiscipline;
use crate::engine::variables::DomainId;
use crate::marrow_assert_simple;

create_statistics_struct!(
    /// Counters of the propagation engine.
    pub PropagationStatistics {
        propagator_calls: u64,
        contradictions: u64,
        /// Calls after which an immediate second call still changed a domain; only counted
        /// when the idempotence check is enabled.
        idempotence_violations: u64,
    }
);

/// The propagation engine: the reversible store, the domains, the propagators and the queue
/// which drives them to a common fixpoint.
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) environment: Environment,
    pub(crate) domains: DomainStore,
    pub(crate) propagators: PropagatorStore,
    watch_list: WatchList,
    queue: PropagatorQueue,
    check_idempotence: bool,
    is_infeasible: bool,
    last_failure: Option<(Option<PropagatorId>, Contradiction)>,
    pub(crate) statistics: PropagationStatistics,
}

impl Default for State {
    fn default() -> Self {
        State::new(StoreDiscipline::default(), QueuePolicy::default(), false)
    }
}

impl State {
    pub(crate) fn new(
        discipline: StoreDiscipline,
        policy: QueuePolicy,
        check_idempotence: bool,
    ) -> Self {
        let mut environment = Environment::new(discipline);
        let domains = DomainStore::new(&mut environment);
        let mut watch_list = WatchList::default();
        // The dummy domain.
        watch_list.grow();

        State {
            environment,
            domains,
            propagators: PropagatorStore::default(),
            watch_list,
            queue: PropagatorQueue::new(policy),
            check_idempotence,
            is_infeasible: false,
            last_failure: None,
            statistics: PropagationStatistics::default(),
        }
    }

    pub(crate) fn domains(&self) -> Domains<'_> {
        Domains::new(&self.environment, &self.domains)
    }

    pub(crate) fn queue_policy(&self) -> QueuePolicy {
        self.queue.policy()
    }

    pub(crate) fn world(&self) -> usize {
        self.environment.world_index()
    }

    pub(crate) fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    /// The propagator and contradiction of the most recent failed propagation.
    pub(crate) fn last_failure(&self) -> Option<(Option<PropagatorId>, Contradiction)> {
        self.last_failure
    }

    pub(crate) fn new_interval(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: Option<String>,
    ) -> Result<DomainId, ModelError> {
        let domain =
            self.domains
                .new_interval(&mut self.environment, lower_bound, upper_bound, name)?;
        self.watch_list.grow();
        Ok(domain)
    }

    pub(crate) fn new_sparse(
        &mut self,
        values: Vec<i32>,
        name: Option<String>,
    ) -> Result<DomainId, ModelError> {
        let domain = self.domains.new_sparse(&mut self.environment, values, name)?;
        self.watch_list.grow();
        Ok(domain)
    }

    /// Create the propagator, schedule it with every event and propagate at the root.
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
        constraint: Option<ConstraintId>,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError> {
        marrow_assert_simple!(
            self.world() == 0,
            "propagators can only be added at the root"
        );

        if self.is_infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator_id = self.propagators.next_id();
        let mut next_local_id = LocalId::from(0);
        let propagator = constructor.create(PropagatorConstructorContext::new(
            &mut self.environment,
            &self.domains,
            &mut self.watch_list,
            propagator_id,
            &mut next_local_id,
        ));

        if next_local_id.unpack() == 0 {
            return Err(ModelError::EmptyScope {
                propagator: propagator.name().to_owned(),
            }
            .into());
        }

        let info = PropagatorInfo {
            activity: self.environment.new_bool(true),
            priority: propagator.priority(),
            idempotent: propagator.is_idempotent(),
            constraint,
        };
        let id = self.propagators.add(Box::new(propagator), info);
        marrow_assert_simple!(id == propagator_id);

        self.queue
            .enqueue_propagator(id, info.priority, EnumSet::all());

        if self.propagate_to_fixed_point().is_err() {
            self.is_infeasible = true;
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        Ok(PropagatorHandle::new(id))
    }

    pub(crate) fn is_active(&self, propagator: PropagatorId) -> bool {
        self.environment
            .read(self.propagators.info(propagator).activity)
    }

    pub(crate) fn constraint_of(&self, propagator: PropagatorId) -> Option<ConstraintId> {
        self.propagators.info(propagator).constraint
    }

    /// Schedule every propagator, e.g. after the domains were replaced wholesale.
    pub(crate) fn enqueue_all(&mut self) {
        for id in self.propagators.ids() {
            let info = self.propagators.info(id);
            self.queue
                .enqueue_propagator(id, info.priority, EnumSet::all());
        }
    }

    /// Make `predicate` true on behalf of the search.
    pub(crate) fn post(&mut self, predicate: Predicate) -> DomainUpdate {
        self.domains.post(&mut self.environment, predicate, None)
    }

    pub(crate) fn push(&mut self) {
        self.environment.push();
    }

    /// Undo every change made above `world`, and let the propagators synchronise with the
    /// restored domains.
    ///
    /// Restoring to the current world only discards the pending events and queue entries.
    pub(crate) fn restore_to(&mut self, world: usize) {
        marrow_assert_simple!(world <= self.world());
        if world < self.world() {
            self.environment.pop_to(world);
        }
        self.queue.clear();
        self.domains.clear_events();

        let domains = Domains::new(&self.environment, &self.domains);
        for propagator in self.propagators.iter_propagators_mut() {
            propagator.synchronise(domains);
        }
    }

    /// Replace the root values of the reversible store with `snapshot` and run every
    /// propagator on the restored domains.
    pub(crate) fn restore_snapshot(
        &mut self,
        snapshot: &EnvironmentSnapshot,
    ) -> Result<PropagationStatus, SnapshotError> {
        self.environment.restore(snapshot)?;
        self.restore_to(0);
        self.is_infeasible = false;
        Ok(self.propagate_root())
    }

    /// Run every propagator at the root; a contradiction makes the state infeasible.
    pub(crate) fn propagate_root(&mut self) -> PropagationStatus {
        marrow_assert_simple!(self.world() == 0);
        if self.is_infeasible {
            return Err(Contradiction::EmptyDomain);
        }

        self.enqueue_all();
        let status = self.propagate_to_fixed_point();
        self.is_infeasible = status.is_err();
        status
    }

    /// Deliver the pending domain events to the subscribed propagators and enqueue those that
    /// ask for it.
    fn notify_propagators(&mut self) {
        while self.domains.has_pending_events() {
            for record in self.domains.take_events() {
                for &watcher in self.watch_list.get_affected(record.event, record.domain) {
                    let id = watcher.propagator;
                    let info = self.propagators.info(id);
                    if !self.environment.read(info.activity) {
                        continue;
                    }

                    let context = NotificationContext::new(&mut self.environment, &self.domains);
                    let decision =
                        self.propagators[id].notify(context, watcher.variable, record.event.into());

                    let is_own_event = info.idempotent && record.cause == Some(id);
                    if decision == EnqueueDecision::Enqueue && !is_own_event {
                        self.queue
                            .enqueue_propagator(id, info.priority, record.event.into());
                    }
                }
            }
        }
    }

    /// Run the enqueued propagators until none is pending, or until one of them fails. On
    /// failure the queue is flushed; the domains are left for the caller to restore.
    pub(crate) fn propagate_to_fixed_point(&mut self) -> PropagationStatus {
        loop {
            self.notify_propagators();

            let Some((id, events)) = self.queue.pop() else {
                return Ok(());
            };
            let info = self.propagators.info(id);
            if !self.environment.read(info.activity) {
                continue;
            }

            if let Err(contradiction) = self.call_propagator(id, events, info) {
                self.statistics.contradictions += 1;
                self.last_failure = Some((Some(id), contradiction));
                self.queue.clear();
                self.domains.clear_events();
                return Err(contradiction);
            }
        }
    }

    fn call_propagator(
        &mut self,
        id: PropagatorId,
        events: EnumSet<IntDomainEvent>,
        info: PropagatorInfo,
    ) -> PropagationStatus {
        trace!("propagating {} ({id}) on {events:?}", self.propagators[id].name());
        self.statistics.propagator_calls += 1;

        let context = PropagationContextMut::new(
            &mut self.environment,
            &mut self.domains,
            id,
            events,
            info.activity,
        );
        self.propagators[id].propagate(context)?;

        if self.check_idempotence && self.environment.read(info.activity) {
            let num_events = self.domains.num_pending_events();
            let context = PropagationContextMut::new(
                &mut self.environment,
                &mut self.domains,
                id,
                events,
                info.activity,
            );
            self.propagators[id].propagate(context)?;

            if self.domains.num_pending_events() > num_events {
                self.statistics.idempotence_violations += 1;
                warn!(
                    "propagator {} ({id}) is not idempotent: a second call changed a domain",
                    self.propagators[id].name()
                );
            }
        }

        Ok(())
    }
}
