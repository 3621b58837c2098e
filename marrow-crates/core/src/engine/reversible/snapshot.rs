use thiserror::Error;

/// The values of every primitive cell and vector of an
/// [`Environment`](super::Environment), taken at some world.
///
/// It is an explicit struct rather than a dump of the environment's internals, so it can be
/// stored (with the `serde` feature) and later restored into an environment built by the same
/// model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentSnapshot {
    pub world: usize,
    pub integers: Vec<i64>,
    pub booleans: Vec<bool>,
    pub doubles: Vec<f64>,
    pub vectors: Vec<Vec<i64>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("the environment holds {count} object cells, which cannot be captured in a snapshot")]
    UnsupportedObjectCells { count: usize },
    #[error("the snapshot has {found} {what}, but the environment has {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
