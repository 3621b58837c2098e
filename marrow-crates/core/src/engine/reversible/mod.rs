//! The reversible store: cells whose writes are undone when the search backtracks.
mod cells;
mod copied_cells;
mod environment;
mod handles;
mod snapshot;
mod trailed_cells;
mod vectors;

pub(crate) use copied_cells::CopiedCells;
pub use environment::Environment;
pub use environment::EnvironmentStatistics;
pub use environment::ReversibleCell;
pub use environment::StoreDiscipline;
pub use handles::ReversibleBool;
pub use handles::ReversibleDouble;
pub use handles::ReversibleInt;
pub use handles::ReversibleLong;
pub use handles::ReversibleObject;
pub use handles::ReversibleVec;
pub use snapshot::EnvironmentSnapshot;
pub use snapshot::SnapshotError;
pub(crate) use trailed_cells::TrailedCells;
