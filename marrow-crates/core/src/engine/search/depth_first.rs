use std::time::Instant;

use log::debug;

use super::decision_pool::Branch;
use super::decision_pool::Decision;
use super::decision_pool::DecisionHandle;
use super::decision_pool::DecisionPool;
use super::explainer::ConflictInfo;
use super::explainer::FailureExplainer;
use super::monitor::SearchMonitor;
use super::restarts::RestartSchedule;
use super::restarts::RestartStrategy;
use super::statistics::SearchStatistics;
use crate::basic_types::Contradiction;
use crate::basic_types::Random;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::AffineView;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::State;
use crate::parallel::SharedBound;
use crate::predicate;
use crate::results::SolutionReference;

/// Where a call to [`DepthFirstSearch::next`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    /// Every variable is fixed and propagation is at a fixpoint. The solution can be read from
    /// the state until the search is resumed or finished.
    Solution,
    /// The search space below the root of the search has been exhausted.
    Exhausted,
    /// The termination condition triggered.
    Stopped,
}

/// The objective of a branch-and-bound search, always minimised.
#[derive(Clone, Debug)]
pub(crate) struct Objective {
    view: AffineView<DomainId>,
    best: Option<i32>,
    shared: Option<SharedBound>,
}

impl Objective {
    pub(crate) fn minimise(view: AffineView<DomainId>, shared: Option<SharedBound>) -> Objective {
        Objective {
            view,
            best: None,
            shared,
        }
    }

    /// The constraint every further solution has to satisfy.
    fn cut(&self) -> Option<Predicate> {
        let shared = self.shared.as_ref().and_then(SharedBound::best);
        let bound = match (self.best, shared) {
            (Some(own), Some(shared)) => own.min(shared),
            (Some(bound), None) | (None, Some(bound)) => bound,
            (None, None) => return None,
        };

        Some(
            bound
                .checked_sub(1)
                .map_or(Predicate::trivially_false(), |bound| {
                    self.view.upper_bound_predicate(bound)
                }),
        )
    }
}

/// The depth-first decision loop.
///
/// Decisions are taken one world deeper than the world they were selected in, so undoing a
/// decision is a single [`State::restore_to`]. A refuted positive branch is replaced by its
/// negation in a fresh world; a refuted negative branch refutes its predecessor.
#[derive(Debug)]
pub(crate) struct DepthFirstSearch {
    pool: DecisionPool,
    head: Option<DecisionHandle>,
    depth: usize,
    root_world: usize,
    at_solution: bool,
    pending_conflict: Option<ConflictInfo>,
    restarts: RestartSchedule,
    restarts_enabled: bool,
    objective: Option<Objective>,
    explainer: Box<dyn FailureExplainer>,
    monitors: Vec<Box<dyn SearchMonitor>>,
    started_at: Option<Instant>,
    statistics: SearchStatistics,
}

impl DepthFirstSearch {
    pub(crate) fn new(
        restart_strategy: RestartStrategy,
        explainer: Box<dyn FailureExplainer>,
    ) -> DepthFirstSearch {
        DepthFirstSearch {
            pool: DecisionPool::default(),
            head: None,
            depth: 0,
            root_world: 0,
            at_solution: false,
            pending_conflict: None,
            restarts: RestartSchedule::new(restart_strategy),
            restarts_enabled: true,
            objective: None,
            explainer,
            monitors: vec![],
            started_at: None,
            statistics: SearchStatistics::default(),
        }
    }

    pub(crate) fn add_monitor(&mut self, monitor: Box<dyn SearchMonitor>) {
        self.monitors.push(monitor);
    }

    pub(crate) fn set_explainer(&mut self, explainer: Box<dyn FailureExplainer>) {
        self.explainer = explainer;
    }

    pub(crate) fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// The best objective value found by the current search.
    pub(crate) fn best_objective_value(&self) -> Option<i32> {
        self.objective.as_ref().and_then(|objective| objective.best)
    }

    /// Prepares a fresh search rooted at the current world of `state`.
    pub(crate) fn start(&mut self, state: &State, objective: Option<Objective>, enumerate: bool) {
        self.pool.clear();
        self.head = None;
        self.depth = 0;
        self.root_world = state.world();
        self.at_solution = false;
        self.pending_conflict = None;
        self.restarts.reset();
        self.restarts_enabled = !enumerate;
        self.objective = objective;
        self.started_at = Some(Instant::now());
    }

    /// Undoes every decision of the current search and brings the statistics up to date.
    pub(crate) fn finish(&mut self, state: &mut State) {
        state.restore_to(self.root_world);
        self.pool.clear();
        self.head = None;
        self.depth = 0;
        self.at_solution = false;
        self.pending_conflict = None;
        self.objective = None;

        if let Some(started_at) = self.started_at.take() {
            self.statistics.wall_time_ms += started_at.elapsed().as_millis() as u64;
        }
        self.statistics.propagator_calls = state.statistics.propagator_calls;
    }

    /// Runs the search until the next solution, until the search space is exhausted, or until
    /// `termination` triggers. After a [`SearchOutcome::Solution`] the next call continues
    /// with the remainder of the search tree.
    pub(crate) fn next<B, T>(
        &mut self,
        state: &mut State,
        brancher: &mut B,
        rng: &mut dyn Random,
        termination: &mut T,
    ) -> SearchOutcome
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        if self.at_solution {
            self.at_solution = false;
            if !self.backtrack(state, brancher, 1) {
                return SearchOutcome::Exhausted;
            }
        }

        loop {
            if termination.should_stop() {
                return SearchOutcome::Stopped;
            }

            let conflict = match self.pending_conflict.take() {
                Some(conflict) => Some(conflict),
                None => self.propagate(state),
            };

            if let Some(conflict) = conflict {
                self.statistics.fails += 1;
                termination.fail_has_occurred();
                brancher.on_conflict();
                for monitor in self.monitors.iter_mut() {
                    monitor.on_fail(self.depth);
                }

                if self.head.is_none() {
                    return SearchOutcome::Exhausted;
                }

                if self.restarts_enabled && self.restarts.conflict() {
                    self.restart(state, brancher);
                    continue;
                }

                let distance = self
                    .explainer
                    .backjump_distance(&conflict)
                    .clamp(1, self.depth);
                if !self.backtrack(state, brancher, distance) {
                    return SearchOutcome::Exhausted;
                }
                continue;
            }

            let decision = brancher
                .next_decision(&mut SelectionContext::new(state.domains(), rng))
                .or_else(|| first_unfixed_decision(state));

            match decision {
                Some(predicate) => self.branch(state, predicate, termination),
                None => {
                    self.on_solution(state, brancher, termination);
                    return SearchOutcome::Solution;
                }
            }
        }
    }

    fn propagate(&mut self, state: &mut State) -> Option<ConflictInfo> {
        if let Some(cut) = self.objective.as_ref().and_then(Objective::cut) {
            if let Err(empty_domain) = state.post(cut) {
                return Some(ConflictInfo {
                    depth: self.depth,
                    propagator: None,
                    contradiction: empty_domain.into(),
                });
            }
        }

        match state.propagate_to_fixed_point() {
            Ok(()) => None,
            Err(contradiction) => Some(ConflictInfo {
                depth: self.depth,
                propagator: state.last_failure().and_then(|(propagator, _)| propagator),
                contradiction,
            }),
        }
    }

    fn branch<T: TerminationCondition + ?Sized>(
        &mut self,
        state: &mut State,
        predicate: Predicate,
        termination: &mut T,
    ) {
        self.statistics.nodes += 1;
        termination.decision_has_been_made();
        for monitor in self.monitors.iter_mut() {
            monitor.before_decision(predicate, self.depth);
        }

        let handle = self.pool.allocate(Decision {
            predicate,
            world: state.world(),
            branch: Branch::NotApplied,
            previous: self.head,
        });
        self.head = Some(handle);
        self.depth += 1;
        self.statistics.max_depth = self.statistics.max_depth.max(self.depth as u64);

        state.push();
        self.apply(state, predicate);
        self.pool.get_mut(handle).branch = Branch::Positive;

        for monitor in self.monitors.iter_mut() {
            monitor.after_decision(predicate, self.depth);
        }
    }

    fn apply(&mut self, state: &mut State, predicate: Predicate) {
        if state.post(predicate).is_err() {
            self.pending_conflict = Some(ConflictInfo {
                depth: self.depth,
                propagator: None,
                contradiction: Contradiction::EmptyDomain,
            });
        }
    }

    /// Undoes `distance - 1` decisions, and then refutes the most recent remaining decision
    /// whose negative branch is still open. Returns `false` if there is none.
    fn backtrack<B: Brancher + ?Sized>(
        &mut self,
        state: &mut State,
        brancher: &mut B,
        distance: usize,
    ) -> bool {
        let mut remaining = distance;

        while let Some(handle) = self.head {
            let decision = *self.pool.get(handle);
            state.restore_to(decision.world);
            self.statistics.backtracks += 1;
            brancher.on_backtrack();

            remaining = remaining.saturating_sub(1);
            if remaining == 0 && decision.branch == Branch::Positive {
                state.push();
                self.apply(state, !decision.predicate);
                self.pool.get_mut(handle).branch = Branch::Negative;
                return true;
            }

            self.head = decision.previous;
            self.pool.release(handle);
            self.depth -= 1;
        }

        false
    }

    fn restart<B: Brancher + ?Sized>(&mut self, state: &mut State, brancher: &mut B) {
        state.restore_to(self.root_world);
        self.pool.clear();
        self.head = None;
        self.depth = 0;
        self.pending_conflict = None;

        self.statistics.restarts += 1;
        self.restarts.notify_restart();
        debug!("Restarting after {} fails", self.statistics.fails);
        brancher.on_restart();
        for monitor in self.monitors.iter_mut() {
            monitor.on_restart(self.statistics.restarts);
        }
    }

    fn on_solution<B, T>(&mut self, state: &State, brancher: &mut B, termination: &mut T)
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        self.at_solution = true;
        self.statistics.solutions += 1;
        termination.solution_has_been_found();

        if let Some(objective) = self.objective.as_mut() {
            let value = objective.view.lower_bound(state.domains());
            objective.best = Some(value);
            if let Some(shared) = objective.shared.as_ref() {
                let _ = shared.offer(value);
            }
            debug!("New best objective value {value}");
        }

        brancher.on_solution(SolutionReference::new(state.domains()));
        for monitor in self.monitors.iter_mut() {
            monitor.on_solution(self.statistics.solutions);
        }
    }
}

/// Branches on any domain the brancher left unfixed, so every solution is complete.
fn first_unfixed_decision(state: &State) -> Option<Predicate> {
    let domains = state.domains();
    domains
        .store()
        .domain_ids()
        .find(|&domain| !domains.is_fixed_domain(domain))
        .map(|domain| {
            let lower_bound = domains.lower_bound_of(domain);
            predicate!(domain <= lower_bound)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::branchers::DefaultBrancher;
    use crate::engine::search::Chronological;
    use crate::engine::variables::TransformableVariable;
    use crate::termination::Indefinite;

    fn search() -> DepthFirstSearch {
        DepthFirstSearch::new(RestartStrategy::Never, Box::new(Chronological))
    }

    fn count_solutions(state: &mut State, brancher: &mut DefaultBrancher) -> u64 {
        let mut search = search();
        let mut rng = TestRandom::default();
        search.start(state, None, true);

        let mut count = 0;
        while search.next(state, brancher, &mut rng, &mut Indefinite) == SearchOutcome::Solution {
            count += 1;
        }
        search.finish(state);
        count
    }

    #[test]
    fn enumerates_the_cartesian_product() {
        let mut state = State::default();
        let x = state.new_interval(0, 2, None).expect("non-empty");
        let y = state.new_interval(5, 6, None).expect("non-empty");
        let mut brancher = DefaultBrancher::default_over_all_variables(&[x, y]);

        assert_eq!(6, count_solutions(&mut state, &mut brancher));
        assert_eq!(0, state.world());
        assert_eq!(0, state.domains().lower_bound_of(x));
        assert_eq!(6, state.domains().upper_bound_of(y));
    }

    #[test]
    fn unbranched_domains_are_decided_anyway() {
        let mut state = State::default();
        let x = state.new_interval(0, 1, None).expect("non-empty");
        let _y = state.new_interval(0, 2, None).expect("non-empty");
        let mut brancher = DefaultBrancher::default_over_all_variables(&[x]);

        assert_eq!(6, count_solutions(&mut state, &mut brancher));
    }

    #[test]
    fn objective_cut_excludes_worse_solutions() {
        let mut state = State::default();
        let x = state.new_interval(0, 5, None).expect("non-empty");
        let mut brancher = DefaultBrancher::default_over_all_variables(&[x]);
        let mut search = search();
        let mut rng = TestRandom::default();

        search.start(
            &state,
            Some(Objective::minimise(AffineView::from(x).scaled(-1), None)),
            false,
        );
        let mut values = vec![];
        while search.next(&mut state, &mut brancher, &mut rng, &mut Indefinite)
            == SearchOutcome::Solution
        {
            values.push(state.domains().lower_bound_of(x));
        }

        assert_eq!(Some(-5), search.best_objective_value());
        assert_eq!(vec![0, 1, 2, 3, 4, 5], values);
        search.finish(&mut state);
    }

    #[test]
    fn statistics_are_counted() {
        let mut state = State::default();
        let x = state.new_interval(0, 1, None).expect("non-empty");
        let mut brancher = DefaultBrancher::default_over_all_variables(&[x]);
        let mut search = search();
        let mut rng = TestRandom::default();

        search.start(&state, None, true);
        while search.next(&mut state, &mut brancher, &mut rng, &mut Indefinite)
            == SearchOutcome::Solution
        {}
        search.finish(&mut state);

        let statistics = search.statistics();
        assert_eq!(2, statistics.solutions);
        assert_eq!(1, statistics.nodes);
        assert_eq!(1, statistics.max_depth);
        assert_eq!(0, search.depth());
    }
}
