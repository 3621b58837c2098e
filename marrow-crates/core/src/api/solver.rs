use std::ops::ControlFlow;

use log::info;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::options::SolverOptions;
use super::snapshot::SolverSnapshot;
use super::snapshot::SolverSnapshotError;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Entailment;
use crate::branching::branchers::DefaultBrancher;
use crate::branching::Brancher;
use crate::constraints::ConstraintId;
use crate::constraints::ConstraintPoster;
use crate::constraints::ConstraintStore;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::search::Chronological;
use crate::engine::search::DepthFirstSearch;
use crate::engine::search::FailureExplainer;
use crate::engine::search::LogMonitor;
use crate::engine::search::Objective;
use crate::engine::search::SearchMonitor;
use crate::engine::search::SearchOutcome;
use crate::engine::search::SearchStatistics;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::AffineView;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::variables::TransformableVariable;
use crate::engine::State;
use crate::parallel::SharedBound;
use crate::results::EnumerationResult;
use crate::results::OptimisationResult;
use crate::results::PropagationOutcome;
use crate::results::SatisfactionResult;
use crate::results::Solution;
use crate::results::SolutionReference;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The main interaction point which allows the creation of variables, the addition of
/// constraints, and solving problems.
///
/// # Creating Variables
/// ```rust
/// # use marrow_core::Solver;
/// # use marrow_core::variables::TransformableVariable;
/// let mut solver = Solver::default();
///
/// // An integer variable with the domain [0, 10].
/// let x = solver.new_bounded_integer(0, 10);
///
/// // A named variable with holes in its domain.
/// let y = solver.new_named_sparse_integer(vec![0, 3, 5], "y");
///
/// // A view 15 - x, which needs no extra variable.
/// let view = x.scaled(-1).offset(15);
///
/// // A 0-1 variable.
/// let literal = solver.new_literal();
/// # let _ = (y, view, literal);
/// ```
///
/// # Solving
/// The resolution methods ([`Solver::satisfy`], [`Solver::find_all_solutions`],
/// [`Solver::minimise`] and [`Solver::maximise`]) all start from the root and leave the solver
/// at the root afterwards, so they can be called repeatedly and constraints can be added in
/// between.
#[derive(Debug)]
pub struct Solver {
    state: State,
    search: DepthFirstSearch,
    rng: SmallRng,
    constraints: ConstraintStore,
    shared_bound: Option<SharedBound>,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::with_options(SolverOptions::default())
    }
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(options: SolverOptions) -> Self {
        let mut search = DepthFirstSearch::new(options.restart_strategy, Box::new(Chronological));
        if options.log_search {
            search.add_monitor(Box::new(LogMonitor));
        }

        Solver {
            state: State::new(
                options.store_discipline,
                options.queue_policy,
                options.check_idempotence,
            ),
            search,
            rng: SmallRng::seed_from_u64(options.random_seed),
            constraints: ConstraintStore::default(),
            shared_bound: None,
        }
    }

    /// Let the optimisation methods share their objective bound with other solvers, e.g. the
    /// other workers of a [`ParallelMaster`](crate::parallel::ParallelMaster).
    pub fn with_shared_bound(mut self, bound: SharedBound) -> Self {
        self.shared_bound = Some(bound);
        self
    }

    /// Observe every subsequent search with `monitor`.
    pub fn add_monitor(&mut self, monitor: impl SearchMonitor + 'static) {
        self.search.add_monitor(Box::new(monitor));
    }

    /// Replace the [`FailureExplainer`], which decides how far the search backtracks on a
    /// conflict. The default is [`Chronological`].
    pub fn set_failure_explainer(&mut self, explainer: impl FailureExplainer + 'static) {
        self.search.set_explainer(Box::new(explainer));
    }

    /// The counters of the search, accumulated over every resolution call.
    pub fn statistics(&self) -> SearchStatistics {
        self.search.statistics()
    }

    /// Logs the statistics currently present in the solver with the provided objective value.
    pub fn log_statistics_with_objective(&self, objective_value: i64) {
        log_statistic("objective", objective_value);
        self.log_statistics();
    }

    /// Logs the statistics currently present in the solver.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.search.statistics().log(StatisticLogger::new("search"));
        self.state
            .statistics
            .log(StatisticLogger::new("propagation"));
        self.state
            .environment
            .log_statistics(StatisticLogger::new("environment"));
        for (index, propagator) in self.state.propagators.iter_propagators().enumerate() {
            propagator.log_statistics(StatisticLogger::new(format!("propagator{index}")));
        }
        log_statistic_postfix();
    }
}

/// Methods to create and inspect variables.
impl Solver {
    /// Create a new integer variable with the domain `[lower_bound, upper_bound]`.
    ///
    /// # Panics
    /// If `lower_bound > upper_bound`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.create_interval(lower_bound, upper_bound, None)
    }

    /// Create a new named integer variable with the domain `[lower_bound, upper_bound]`.
    ///
    /// # Panics
    /// If `lower_bound > upper_bound`.
    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> DomainId {
        self.create_interval(lower_bound, upper_bound, Some(name.into()))
    }

    /// Create a new integer variable which has a domain of predefined values. Duplicate values
    /// are ignored.
    ///
    /// # Panics
    /// If `values` is empty.
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        self.create_sparse(values.into(), None)
    }

    /// Create a new named integer variable which has a domain of predefined values.
    ///
    /// # Panics
    /// If `values` is empty.
    pub fn new_named_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
        name: impl Into<String>,
    ) -> DomainId {
        self.create_sparse(values.into(), Some(name.into()))
    }

    /// Create a fresh 0-1 variable and return the literal which is true when it is 1.
    pub fn new_literal(&mut self) -> Literal {
        Literal::new(self.new_bounded_integer(0, 1))
    }

    pub fn new_named_literal(&mut self, name: impl Into<String>) -> Literal {
        Literal::new(self.new_named_bounded_integer(0, 1, name))
    }

    /// The variable that was created with `name`, if any.
    pub fn variable_by_name(&self, name: &str) -> Option<DomainId> {
        self.state.domains.domain_by_name(name)
    }

    /// Get the lower-bound of the given [`IntegerVariable`] at the root level (after
    /// propagation).
    pub fn lower_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.lower_bound(self.state.domains())
    }

    /// Get the upper-bound of the given [`IntegerVariable`] at the root level (after
    /// propagation).
    pub fn upper_bound(&self, variable: &impl IntegerVariable) -> i32 {
        variable.upper_bound(self.state.domains())
    }

    /// Whether `value` is in the domain of `variable` at the root level (after propagation).
    pub fn contains(&self, variable: &impl IntegerVariable, value: i32) -> bool {
        variable.contains(self.state.domains(), value)
    }

    /// Whether a contradiction at the root has been found, after which no constraint can be
    /// added and every resolution method reports that there is no solution.
    pub fn is_infeasible(&self) -> bool {
        self.state.is_infeasible()
    }

    /// The brancher which branches on every variable with the smallest domain first, assigning
    /// its lower bound.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self.state.domains.domain_ids().collect::<Vec<_>>();
        DefaultBrancher::default_over_all_variables(&variables)
    }

    fn create_interval(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: Option<String>,
    ) -> DomainId {
        self.state
            .new_interval(lower_bound, upper_bound, name)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    fn create_sparse(&mut self, values: Vec<i32>, name: Option<String>) -> DomainId {
        self.state
            .new_sparse(values, name)
            .unwrap_or_else(|error| panic!("{error}"))
    }
}

/// Methods to add and inspect constraints.
impl Solver {
    /// Add a constraint to the solver. This returns a [`ConstraintPoster`] which enables
    /// control on whether to add the constraint as-is, or whether to (half) reify it.
    ///
    /// If none of the methods on [`ConstraintPoster`] are used, the constraint _is not_
    /// actually added to the solver. In this case, a warning is logged.
    ///
    /// # Example
    /// ```
    /// # use marrow_core::constraints;
    /// # use marrow_core::Solver;
    /// let mut solver = Solver::default();
    ///
    /// let a = solver.new_bounded_integer(0, 3);
    /// let b = solver.new_bounded_integer(0, 3);
    ///
    /// solver
    ///     .add_constraint(constraints::equals([a, b], 0))
    ///     .post()
    ///     .expect("a = b = 0 is feasible");
    ///
    /// assert_eq!(0, solver.upper_bound(&a));
    /// ```
    pub fn add_constraint<Constraint>(
        &mut self,
        constraint: Constraint,
    ) -> ConstraintPoster<'_, Constraint> {
        ConstraintPoster::new(self, constraint)
    }

    /// The number of constraints added to the solver.
    pub fn num_constraints(&self) -> usize {
        self.constraints.num_constraints()
    }

    /// Every constraint added to the solver, in the order in which it was added.
    pub fn constraints(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.constraints.ids()
    }

    pub fn constraint_name(&self, constraint: ConstraintId) -> Option<&str> {
        self.constraints.name(constraint)
    }

    /// Whether the constraint is certainly satisfied, certainly violated, or neither, given the
    /// domains at the root.
    pub fn constraint_entailment(&self, constraint: ConstraintId) -> Entailment {
        self.constraints
            .entailment(constraint, &self.state.propagators, self.state.domains())
    }

    /// Whether every propagator of the constraint reports that it holds.
    pub fn is_satisfied(&self, constraint: ConstraintId) -> bool {
        self.constraint_entailment(constraint) == Entailment::True
    }

    pub(crate) fn new_constraint(&mut self, name: Option<String>) -> ConstraintId {
        self.constraints.new_constraint(name)
    }

    /// Add a propagator on behalf of `constraint` and propagate it at the root.
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        match self.state.add_propagator(constructor, Some(constraint)) {
            Ok(handle) => {
                self.constraints.add_propagator(constraint, handle.untyped());
                Ok(())
            }
            Err(error) => {
                warn!(
                    "Adding constraint {} failed: {error}",
                    self.constraints.describe(constraint)
                );
                Err(error)
            }
        }
    }
}

/// Methods which solve the model.
impl Solver {
    /// Runs every propagator at the root until the fixpoint.
    pub fn propagate(&mut self) -> PropagationOutcome {
        match self.state.propagate_root() {
            Ok(()) => PropagationOutcome::Fixpoint,
            Err(_) => PropagationOutcome::Contradiction,
        }
    }

    /// Searches for a single solution.
    ///
    /// # Example
    /// ```rust
    /// # use marrow_core::constraints;
    /// # use marrow_core::results::ProblemSolution;
    /// # use marrow_core::results::SatisfactionResult;
    /// # use marrow_core::termination::Indefinite;
    /// # use marrow_core::variables::TransformableVariable;
    /// # use marrow_core::Solver;
    /// let mut solver = Solver::default();
    /// let x = solver.new_bounded_integer(0, 2);
    /// let y = solver.new_bounded_integer(0, 2);
    ///
    /// // x - y <= -2
    /// solver
    ///     .add_constraint(constraints::less_than_or_equals([x.scaled(1), y.scaled(-1)], -2))
    ///     .post()
    ///     .expect("feasible");
    ///
    /// let mut brancher = solver.default_brancher();
    /// let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
    /// else {
    ///     panic!("y >= x + 2 has a solution")
    /// };
    /// assert_eq!((0, 2), (solution.get_integer_value(x), solution.get_integer_value(y)));
    /// ```
    pub fn satisfy<B, T>(&mut self, brancher: &mut B, termination: &mut T) -> SatisfactionResult
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        if self.state.is_infeasible() {
            return SatisfactionResult::Unsatisfiable;
        }

        self.start_search(None, false);
        let result = match self
            .search
            .next(&mut self.state, brancher, &mut self.rng, termination)
        {
            SearchOutcome::Solution => SatisfactionResult::Satisfiable(self.current_solution()),
            SearchOutcome::Exhausted => SatisfactionResult::Unsatisfiable,
            SearchOutcome::Stopped => SatisfactionResult::Unknown,
        };
        self.finish_search();

        result
    }

    /// Enumerates the solutions, passing each one to `on_solution` while the search is paused
    /// at it. The enumeration stops early when `on_solution` returns [`ControlFlow::Break`].
    ///
    /// Restarts are never performed while enumerating, so every solution is reported once.
    pub fn find_all_solutions<B, T>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        mut on_solution: impl FnMut(SolutionReference<'_>) -> ControlFlow<()>,
    ) -> EnumerationResult
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        if self.state.is_infeasible() {
            return EnumerationResult::Exhausted { num_solutions: 0 };
        }

        self.start_search(None, true);
        let mut num_solutions = 0;
        let result = loop {
            match self
                .search
                .next(&mut self.state, brancher, &mut self.rng, termination)
            {
                SearchOutcome::Solution => {
                    num_solutions += 1;
                    let solution = SolutionReference::new(self.state.domains());
                    if on_solution(solution).is_break() {
                        break EnumerationResult::Stopped { num_solutions };
                    }
                }
                SearchOutcome::Exhausted => break EnumerationResult::Exhausted { num_solutions },
                SearchOutcome::Stopped => break EnumerationResult::Stopped { num_solutions },
            }
        };
        self.finish_search();

        result
    }

    /// Minimises `objective` by branch-and-bound: every solution found constrains the next
    /// ones to be strictly better.
    pub fn minimise<B, T>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        objective: impl Into<AffineView<DomainId>>,
    ) -> OptimisationResult
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        self.optimise(brancher, termination, objective.into())
    }

    /// Maximises `objective` by branch-and-bound, see [`Solver::minimise`].
    pub fn maximise<B, T>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        objective: impl Into<AffineView<DomainId>>,
    ) -> OptimisationResult
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        self.optimise(brancher, termination, objective.into().scaled(-1))
    }

    fn optimise<B, T>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        objective: AffineView<DomainId>,
    ) -> OptimisationResult
    where
        B: Brancher + ?Sized,
        T: TerminationCondition + ?Sized,
    {
        if self.state.is_infeasible() {
            return OptimisationResult::Unsatisfiable;
        }

        self.start_search(
            Some(Objective::minimise(objective.clone(), self.shared_bound.clone())),
            false,
        );

        let mut best = None;
        let result = loop {
            match self
                .search
                .next(&mut self.state, brancher, &mut self.rng, termination)
            {
                SearchOutcome::Solution => {
                    info!(
                        "Found a solution with objective value {}",
                        objective.lower_bound(self.state.domains())
                    );
                    best = Some(self.current_solution());
                }
                SearchOutcome::Exhausted => {
                    // Exhaustion only proves that nothing beats the best bound seen, which may
                    // have been found by another solver sharing the bound.
                    let beaten_elsewhere = self
                        .shared_bound
                        .as_ref()
                        .and_then(SharedBound::best)
                        .is_some_and(|shared| {
                            self.search
                                .best_objective_value()
                                .map_or(true, |own| shared < own)
                        });

                    break match (best.take(), beaten_elsewhere) {
                        (Some(solution), false) => OptimisationResult::Optimal(solution),
                        (Some(solution), true) => OptimisationResult::Satisfiable(solution),
                        (None, false) => OptimisationResult::Unsatisfiable,
                        (None, true) => OptimisationResult::Unknown,
                    };
                }
                SearchOutcome::Stopped => {
                    break match best.take() {
                        Some(solution) => OptimisationResult::Satisfiable(solution),
                        None => OptimisationResult::Unknown,
                    };
                }
            }
        };
        self.finish_search();

        result
    }

    /// Searches happen one world above the root, so that the changes made by a failing root
    /// propagation are undone as well.
    fn start_search(&mut self, objective: Option<Objective>, enumerate: bool) {
        self.state.push();
        self.search.start(&self.state, objective, enumerate);
    }

    fn finish_search(&mut self) {
        self.search.finish(&mut self.state);
        self.state.restore_to(0);
    }

    fn current_solution(&self) -> Solution {
        Solution::from(SolutionReference::new(self.state.domains()))
    }
}

/// Methods to persist the root state.
impl Solver {
    /// Captures the root domains and the root state of every propagator.
    pub fn snapshot(&self) -> Result<SolverSnapshot, SolverSnapshotError> {
        Ok(SolverSnapshot {
            environment: self.state.environment.snapshot()?,
            num_domains: self.state.domains.num_domains(),
        })
    }

    /// Makes `snapshot` the root state of this solver, which has to be built by the same model
    /// as the solver the snapshot was taken from. Every propagator is run on the restored
    /// domains.
    pub fn restore_snapshot(
        &mut self,
        snapshot: &SolverSnapshot,
    ) -> Result<PropagationOutcome, SolverSnapshotError> {
        let expected = self.state.domains.num_domains();
        if snapshot.num_domains != expected {
            return Err(SolverSnapshotError::DomainMismatch {
                expected,
                found: snapshot.num_domains,
            });
        }

        match self.state.restore_snapshot(&snapshot.environment)? {
            Ok(()) => Ok(PropagationOutcome::Fixpoint),
            Err(_) => Ok(PropagationOutcome::Contradiction),
        }
    }
}
