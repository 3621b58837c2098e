use super::TerminationCondition;

/// Never asks the search to stop; a run ends only when the search space is exhausted or a
/// solution callback breaks out.
#[derive(Clone, Copy, Debug, Default)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
