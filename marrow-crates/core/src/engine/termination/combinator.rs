use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers when one of two given [`TerminationCondition`]s
/// triggers.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    t1: T1,
    t2: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    /// Combine two [`TerminationCondition`]s into one.
    pub fn new(t1: T1, t2: T2) -> Self {
        Combinator { t1, t2 }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self) -> bool {
        self.t1.should_stop() || self.t2.should_stop()
    }

    fn decision_has_been_made(&mut self) {
        self.t1.decision_has_been_made();
        self.t2.decision_has_been_made();
    }

    fn fail_has_occurred(&mut self) {
        self.t1.fail_has_occurred();
        self.t2.fail_has_occurred();
    }

    fn solution_has_been_found(&mut self) {
        self.t1.solution_has_been_found();
        self.t2.solution_has_been_found();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::DecisionBudget;
    use crate::termination::FailBudget;
    use crate::termination::Indefinite;

    #[test]
    fn either_side_stops_the_combination() {
        let mut combined = Combinator::new(DecisionBudget::new(5), FailBudget::new(1));
        assert!(!combined.should_stop());

        combined.fail_has_occurred();
        assert!(combined.should_stop());
    }

    #[test]
    fn indefinite_never_stops_the_combination() {
        let mut combined = Combinator::new(Indefinite, Indefinite);
        combined.decision_has_been_made();
        assert!(!combined.should_stop());
    }
}
