use std::fmt::Debug;

use log::debug;
use log::trace;

use crate::engine::predicates::Predicate;

/// Observes the search without influencing it.
pub trait SearchMonitor: Debug {
    fn before_decision(&mut self, _decision: Predicate, _depth: usize) {}

    /// Called once the decision has been applied (before propagation).
    fn after_decision(&mut self, _decision: Predicate, _depth: usize) {}

    fn on_fail(&mut self, _depth: usize) {}

    fn on_solution(&mut self, _num_solutions: u64) {}

    fn on_restart(&mut self, _num_restarts: u64) {}
}

/// A [`SearchMonitor`] which writes search events to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMonitor;

impl SearchMonitor for LogMonitor {
    fn before_decision(&mut self, decision: Predicate, depth: usize) {
        trace!("depth {depth}: deciding {decision}");
    }

    fn after_decision(&mut self, decision: Predicate, depth: usize) {
        trace!("depth {depth}: applied {decision}");
    }

    fn on_fail(&mut self, depth: usize) {
        trace!("depth {depth}: fail");
    }

    fn on_solution(&mut self, num_solutions: u64) {
        debug!("found solution {num_solutions}");
    }

    fn on_restart(&mut self, num_restarts: u64) {
        debug!("restart {num_restarts}");
    }
}
