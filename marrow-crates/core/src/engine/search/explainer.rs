use std::fmt::Debug;

use crate::basic_types::Contradiction;
use crate::engine::propagation::PropagatorId;

/// What the search knows about a conflict when it asks how far to backtrack.
#[derive(Clone, Copy, Debug)]
pub struct ConflictInfo {
    /// The number of open decisions at the time of the conflict.
    pub depth: usize,
    /// The propagator which reported the conflict, if any. Conflicts from applying a decision
    /// or an objective bound have no propagator.
    pub propagator: Option<PropagatorId>,
    pub contradiction: Contradiction,
}

/// Decides how many decisions are undone after a conflict.
///
/// The search undoes `backjump_distance - 1` decisions entirely and then refutes the next one.
/// Any distance other than 1 is only sound if the skipped decisions provably did not
/// contribute to the conflict.
pub trait FailureExplainer: Debug {
    /// Must lie in `1..=conflict.depth` when `conflict.depth > 0`.
    fn backjump_distance(&mut self, conflict: &ConflictInfo) -> usize;
}

/// Plain chronological backtracking: only the most recent decision is refuted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chronological;

impl FailureExplainer for Chronological {
    fn backjump_distance(&mut self, _conflict: &ConflictInfo) -> usize {
        1
    }
}
