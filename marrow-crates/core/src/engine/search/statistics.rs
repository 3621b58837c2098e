use crate::create_statistics_struct;

create_statistics_struct!(
    /// Counters of the depth-first search, accumulated over every solve call of a solver.
    pub SearchStatistics {
        /// The number of solutions found.
        solutions: u64,
        /// The number of branching nodes, i.e. decisions taken.
        nodes: u64,
        /// The number of conflicts, from propagation or from applying a decision.
        fails: u64,
        /// The number of worlds popped while backtracking.
        backtracks: u64,
        restarts: u64,
        /// The largest number of simultaneously open decisions.
        max_depth: u64,
        propagator_calls: u64,
        /// Wall-clock time spent in solve calls, in milliseconds.
        wall_time_ms: u64,
    }
);
