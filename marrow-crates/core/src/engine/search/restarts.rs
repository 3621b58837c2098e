use crate::marrow_assert_simple;

/// When the search abandons the current tree and starts again from the root.
///
/// Limits are counted in conflicts since the previous restart. Restarts are never performed while
/// enumerating solutions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestartStrategy {
    #[default]
    Never,
    /// The `i`-th restart happens after `scale * luby(i)` conflicts.
    Luby { scale: u64 },
    /// The `i`-th restart happens after `base * factor^i` conflicts.
    Geometric { base: u64, factor: f64 },
}

/// Tracks the conflicts since the last restart against the current limit.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RestartSchedule {
    strategy: RestartStrategy,
    num_restarts: u64,
    conflicts_since_restart: u64,
    limit: u64,
}

impl RestartSchedule {
    pub(crate) fn new(strategy: RestartStrategy) -> RestartSchedule {
        if let RestartStrategy::Geometric { factor, .. } = strategy {
            marrow_assert_simple!(factor >= 1.0, "a geometric restart factor below 1 shrinks");
        }

        let mut schedule = RestartSchedule {
            strategy,
            num_restarts: 0,
            conflicts_since_restart: 0,
            limit: 0,
        };
        schedule.limit = schedule.compute_limit();
        schedule
    }

    pub(crate) fn reset(&mut self) {
        *self = RestartSchedule::new(self.strategy);
    }

    /// Registers a conflict and returns whether the search should now restart.
    pub(crate) fn conflict(&mut self) -> bool {
        if self.strategy == RestartStrategy::Never {
            return false;
        }

        self.conflicts_since_restart += 1;
        self.conflicts_since_restart >= self.limit
    }

    pub(crate) fn notify_restart(&mut self) {
        self.num_restarts += 1;
        self.conflicts_since_restart = 0;
        self.limit = self.compute_limit();
    }

    fn compute_limit(&self) -> u64 {
        match self.strategy {
            RestartStrategy::Never => u64::MAX,
            RestartStrategy::Luby { scale } => scale.max(1) * luby(self.num_restarts + 1),
            RestartStrategy::Geometric { base, factor } => {
                let limit = base.max(1) as f64 * factor.powi(self.num_restarts as i32);
                if limit >= u64::MAX as f64 {
                    u64::MAX
                } else {
                    limit.ceil() as u64
                }
            }
        }
    }
}

/// The `i`-th element (1-based) of the Luby sequence 1 1 2 1 1 2 4 1 1 2 ...
pub(crate) fn luby(i: u64) -> u64 {
    marrow_assert_simple!(i >= 1);

    let mut i = i;
    loop {
        let mut power = 1_u64;
        while power * 2 - 1 < i {
            power *= 2;
        }
        if power * 2 - 1 == i {
            return power;
        }
        i -= power - 1;
    }
}
