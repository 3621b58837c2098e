use thiserror::Error;

use crate::engine::propagation::PropagatorId;

/// The outcome of running a propagator. Anything other than `Ok(())` makes the current node of
/// the search fail.
pub type PropagationStatus = Result<(), Contradiction>;

/// The recoverable failure signal of the engine.
///
/// A contradiction is always caught by the search loop and turned into a backtrack; it never
/// escapes ordinary resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Contradiction {
    #[error("a domain became empty")]
    EmptyDomain,
    #[error("{0}")]
    Propagator(PropagatorConflict),
}

/// Returned by domain mutations that would leave a domain without values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("the domain would become empty")]
pub struct EmptyDomain;

impl From<EmptyDomain> for Contradiction {
    fn from(_: EmptyDomain) -> Self {
        Contradiction::EmptyDomain
    }
}

impl From<PropagatorConflict> for Contradiction {
    fn from(conflict: PropagatorConflict) -> Self {
        Contradiction::Propagator(conflict)
    }
}

/// A failure detected by the reasoning of a propagator rather than by an empty domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("propagator {propagator} detected a conflict: {reason}")]
pub struct PropagatorConflict {
    pub propagator: PropagatorId,
    pub reason: &'static str,
}
