//! The depth-first search which turns propagation into a search tree, together with its
//! pluggable parts: the failure explainer, search monitors and restart strategies.
mod decision_pool;
mod depth_first;
mod explainer;
mod monitor;
mod restarts;
mod statistics;

pub(crate) use depth_first::DepthFirstSearch;
pub(crate) use depth_first::Objective;
pub(crate) use depth_first::SearchOutcome;
pub use explainer::Chronological;
pub use explainer::ConflictInfo;
pub use explainer::FailureExplainer;
pub use monitor::LogMonitor;
pub use monitor::SearchMonitor;
pub use restarts::RestartStrategy;
pub use statistics::SearchStatistics;
