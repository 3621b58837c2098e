mod options;
mod snapshot;
pub(crate) mod solver;

pub use options::SolverOptions;
pub use snapshot::SolverSnapshot;
pub use snapshot::SolverSnapshotError;
pub use solver::Solver;
