use std::fmt::Display;

use super::statistic_logging::log_statistic;

/// Logs statistics under an underscore-joined name prefix, e.g.
/// `search_nodes` or `propagator_3_all_different_calls`.
#[derive(Clone, Debug, Default)]
pub struct StatisticLogger {
    name_prefix: String,
}

impl StatisticLogger {
    pub fn new(name_prefix: impl Display) -> Self {
        Self {
            name_prefix: name_prefix.to_string(),
        }
    }

    pub fn attach_to_prefix(&self, addition: impl Display) -> Self {
        if self.name_prefix.is_empty() {
            return Self::new(addition);
        }
        Self {
            name_prefix: format!("{}_{addition}", self.name_prefix),
        }
    }

    pub fn log(&self, value: impl Display) {
        log_statistic(&self.name_prefix, value);
    }
}

impl std::fmt::Write for StatisticLogger {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        log_statistic(&self.name_prefix, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new("search").attach_to_prefix("nodes");
        assert_eq!("search_nodes", logger.name_prefix);

        let root = StatisticLogger::default().attach_to_prefix("fails");
        assert_eq!("fails", root.name_prefix);
    }
}
