use thiserror::Error;

use crate::reversible::EnvironmentSnapshot;
use crate::reversible::SnapshotError;

/// The root state of a [`Solver`](crate::Solver): the values of its reversible store and the
/// number of domains of the model it was taken from.
///
/// A snapshot can only be restored into a solver built by the same model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverSnapshot {
    pub environment: EnvironmentSnapshot,
    pub num_domains: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverSnapshotError {
    #[error("the snapshot has {found} domains, but the solver has {expected}")]
    DomainMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Environment(#[from] SnapshotError),
}
