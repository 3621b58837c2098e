//! Running several independent searches concurrently.
//!
//! The kernel itself is single-threaded; parallelism comes from running one [`Solver`] per
//! worker thread, coordinated through a [`CompletionBarrier`], a [`SharedBound`] on the objective
//! and a shared [`StopFlag`].
//!
//! [`Solver`]: crate::Solver
//! [`StopFlag`]: crate::termination::StopFlag
mod barrier;
mod master;
mod shared_bound;

pub use barrier::CompletionBarrier;
pub use master::ParallelMaster;
pub use master::WorkerContext;
pub use shared_bound::SharedBound;
