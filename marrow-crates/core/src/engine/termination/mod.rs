//! A [`TerminationCondition`] is a condition which is polled by the solver during the search
//! process. It indicates when the solver should stop, even if no definitive conclusions have been
//! made. The most common example would be [`TimeBudget`], which gives the solver a certain time
//! budget to complete its search.
//!
//! Conditions are only polled between search nodes, never during propagation.

mod combinator;
mod counting_budgets;
mod indefinite;
mod stop_flag;
mod time_budget;

pub use combinator::Combinator;
pub use counting_budgets::DecisionBudget;
pub use counting_budgets::FailBudget;
pub use counting_budgets::SolutionBudget;
pub use indefinite::Indefinite;
pub use stop_flag::StopFlag;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines when
/// the solver should give up searching for solutions.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called after the search has taken a decision.
    fn decision_has_been_made(&mut self) {}

    /// Called after the search has encountered a conflict.
    fn fail_has_occurred(&mut self) {}

    /// Called after the search has found a solution.
    fn solution_has_been_found(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }

    fn fail_has_occurred(&mut self) {
        if let Some(t) = self {
            t.fail_has_occurred()
        }
    }

    fn solution_has_been_found(&mut self) {
        if let Some(t) = self {
            t.solution_has_been_found()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn decision_has_been_made(&mut self) {
        (**self).decision_has_been_made()
    }

    fn fail_has_occurred(&mut self) {
        (**self).fail_has_occurred()
    }

    fn solution_has_been_found(&mut self) {
        (**self).solution_has_been_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_condition_never_stops() {
        let mut condition: Option<DecisionBudget> = None;
        condition.decision_has_been_made();
        assert!(!condition.should_stop());
    }

    #[test]
    fn present_condition_is_forwarded() {
        let mut condition = Some(DecisionBudget::new(1));
        assert!(!condition.should_stop());
        condition.decision_has_been_made();
        assert!(condition.should_stop());
    }
}
