use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the search has taken `budget` decisions.
#[derive(Debug, Copy, Clone)]
pub struct DecisionBudget {
    budget: u64,
    num_decisions: u64,
}

impl DecisionBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_decisions: 0,
        }
    }
}

impl TerminationCondition for DecisionBudget {
    fn should_stop(&mut self) -> bool {
        self.num_decisions >= self.budget
    }

    fn decision_has_been_made(&mut self) {
        self.num_decisions += 1;
    }
}

/// A [`TerminationCondition`] which triggers once the search has encountered `budget` conflicts.
#[derive(Debug, Copy, Clone)]
pub struct FailBudget {
    budget: u64,
    num_fails: u64,
}

impl FailBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_fails: 0,
        }
    }
}

impl TerminationCondition for FailBudget {
    fn should_stop(&mut self) -> bool {
        self.num_fails >= self.budget
    }

    fn fail_has_occurred(&mut self) {
        self.num_fails += 1;
    }
}

/// A [`TerminationCondition`] which triggers once `budget` solutions have been found.
///
/// Only meaningful while enumerating; a satisfaction call stops at its first solution anyway.
#[derive(Debug, Copy, Clone)]
pub struct SolutionBudget {
    budget: u64,
    num_solutions: u64,
}

impl SolutionBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_solutions: 0,
        }
    }
}

impl TerminationCondition for SolutionBudget {
    fn should_stop(&mut self) -> bool {
        self.num_solutions >= self.budget
    }

    fn solution_has_been_found(&mut self) {
        self.num_solutions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_budget_counts_decisions() {
        let mut budget = DecisionBudget::new(2);
        budget.decision_has_been_made();
        budget.fail_has_occurred();
        assert!(!budget.should_stop());
        budget.decision_has_been_made();
        assert!(budget.should_stop());
    }

    #[test]
    fn fail_budget_counts_fails() {
        let mut budget = FailBudget::new(1);
        budget.decision_has_been_made();
        assert!(!budget.should_stop());
        budget.fail_has_occurred();
        assert!(budget.should_stop());
    }

    #[test]
    fn solution_budget_counts_solutions() {
        let mut budget = SolutionBudget::new(1);
        assert!(!budget.should_stop());
        budget.solution_has_been_found();
        assert!(budget.should_stop());
    }

    #[test]
    fn zero_budget_stops_immediately() {
        assert!(DecisionBudget::new(0).should_stop());
    }
}
