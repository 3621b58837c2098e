//! The propagation and backtracking kernel: the reversible store, domains and variables,
//! the propagator scheduler and the depth-first search.
pub mod domains;
pub mod notifications;
pub mod predicates;
pub mod propagation;
mod propagator_queue;
pub mod reversible;
pub mod search;
mod state;
pub mod termination;
#[cfg(test)]
pub(crate) mod test_solver;
pub mod variables;

pub use propagator_queue::QueuePolicy;
pub use state::PropagationStatistics;
pub(crate) use state::State;
