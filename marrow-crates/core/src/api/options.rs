use crate::engine::search::RestartStrategy;
use crate::reversible::StoreDiscipline;
use crate::QueuePolicy;

/// Options for the [`Solver`](crate::Solver) which determine how it behaves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverOptions {
    /// The seed of the random generator used by the randomised selectors.
    pub random_seed: u64,
    /// The order in which enqueued propagators are run.
    pub queue_policy: QueuePolicy,
    /// How the reversible store records the information needed to undo writes.
    pub store_discipline: StoreDiscipline,
    pub restart_strategy: RestartStrategy,
    /// Run every propagator twice and warn when the second call still changes a domain.
    pub check_idempotence: bool,
    /// Write every search event to the log, see [`LogMonitor`](crate::search::LogMonitor).
    pub log_search: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            random_seed: 42,
            queue_policy: QueuePolicy::default(),
            store_discipline: StoreDiscipline::default(),
            restart_strategy: RestartStrategy::default(),
            check_idempotence: false,
            log_search: false,
        }
    }
}
