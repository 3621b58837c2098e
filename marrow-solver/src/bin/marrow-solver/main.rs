mod os_signal_termination;
mod result;

use std::io::Write;
use std::ops::ControlFlow;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use log::debug;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use marrow_solver::branching::branchers::IndependentVariableValueBrancher;
use marrow_solver::branching::value_selection::InDomainRandom;
use marrow_solver::branching::variable_selection::RandomSelector;
use marrow_solver::branching::Brancher;
use marrow_solver::constraints;
use marrow_solver::constraints::AllDifferentConsistency;
use marrow_solver::convert_case::Case;
use marrow_solver::nqueens;
use marrow_solver::parallel::ParallelMaster;
use marrow_solver::parallel::WorkerContext;
use marrow_solver::results::EnumerationResult;
use marrow_solver::results::ProblemSolution;
use marrow_solver::results::SatisfactionResult;
use marrow_solver::reversible::StoreDiscipline;
use marrow_solver::statistics::configure_statistic_logging;
use marrow_solver::termination::StopFlag;
use marrow_solver::QueuePolicy;
use marrow_solver::Solver;
use marrow_solver::SolverOptions;
use result::SolverResult;

/// Solves the N-Queens problem.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The size of the board, which is also the number of queens.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    n: u32,

    /// The propagation strength of the all-different constraints.
    #[arg(long, value_enum, default_value_t)]
    consistency: AllDifferentConsistency,

    /// The order in which the propagators are run.
    #[arg(long, value_enum, default_value_t)]
    queue_policy: QueuePolicy,

    /// How the reversible store undoes changes on backtracking.
    #[arg(long, value_enum, default_value_t)]
    store_discipline: StoreDiscipline,

    /// Count every solution instead of stopping at the first one.
    #[arg(short = 'a', long = "all-solutions")]
    all_solutions: bool,

    /// The time limit in milliseconds; the search is stopped when it expires.
    #[arg(short = 't', long = "time-limit")]
    time_limit: Option<u64>,

    /// The number of worker threads.
    ///
    /// When counting solutions the first queen is split over the workers; otherwise the
    /// workers race with differently randomised searches.
    #[arg(
        short = 'w',
        long = "workers",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..),
        verbatim_doc_comment
    )]
    num_workers: u16,

    /// The seed of the random generator of the first worker; worker `i` uses `seed + i`.
    #[arg(long = "random-seed", default_value_t = 42)]
    random_seed: u64,

    /// Run every propagator twice and warn when the second call still changes a domain.
    #[arg(long = "check-idempotence")]
    check_idempotence: bool,

    /// Log every decision, fail and solution.
    #[arg(long = "log-search")]
    log_search: bool,

    /// Enables log message output from the solver.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the statistics of every worker once it finishes.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_search: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging(
            "%%mrw-stat:",
            Some("%%mrw-stat-end"),
            Some(Case::Camel),
            None,
        );
    }

    let level_filter = if log_search {
        LevelFilter::Trace
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> SolverResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose, args.log_search, args.log_statistics);

    if marrow_solver::asserts::MARROW_ASSERT_LEVEL_DEFINITION
        >= marrow_solver::asserts::MARROW_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the marrow assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            marrow_solver::asserts::MARROW_ASSERT_LEVEL_DEFINITION
        );
    }

    let stop = match args.time_limit {
        Some(time_limit) => StopFlag::deadline(Instant::now() + Duration::from_millis(time_limit)),
        None => StopFlag::new(),
    };
    os_signal_termination::install(&stop)?;

    let master = ParallelMaster::new(usize::from(args.num_workers)).with_stop_flag(stop);
    if args.all_solutions {
        count_solutions(&args, &master)
    } else {
        find_solution(&args, &master)
    }
}

fn solver_options(args: &Args, context: &WorkerContext) -> SolverOptions {
    SolverOptions {
        random_seed: args.random_seed.wrapping_add(context.index as u64),
        queue_policy: args.queue_policy,
        store_discipline: args.store_discipline,
        check_idempotence: args.check_idempotence,
        log_search: args.log_search,
        ..SolverOptions::default()
    }
}

/// Every worker counts the solutions in which the first queen is on one of its columns.
fn count_solutions(args: &Args, master: &ParallelMaster) -> SolverResult<()> {
    let outcomes = master.run(|mut context| -> SolverResult<EnumerationResult> {
        let mut solver = Solver::with_options(solver_options(args, &context));
        let queens = nqueens::add_nqueens(&mut solver, args.n, args.consistency)?;

        for column in 0..args.n as i32 {
            if column as usize % context.num_workers == context.index {
                continue;
            }
            let split = solver
                .add_constraint(constraints::not_equals([queens[0]], column))
                .post();
            if let Err(error) = split {
                debug!("Worker {} has no columns left: {error}", context.index);
                break;
            }
        }

        let mut brancher = solver.default_brancher();
        let result = solver.find_all_solutions(&mut brancher, &mut context.stop, |solution| {
            debug!(
                "Found {}",
                describe(queens.iter().map(|&queen| solution.get_integer_value(queen)))
            );
            ControlFlow::Continue(())
        });

        solver.log_statistics();
        Ok(result)
    });

    let mut num_solutions = 0;
    let mut complete = true;
    for outcome in outcomes {
        let outcome = outcome?;
        num_solutions += outcome.num_solutions();
        complete &= matches!(outcome, EnumerationResult::Exhausted { .. });
    }

    if complete {
        println!("Found all {num_solutions} solutions");
    } else {
        println!("Found {num_solutions} solutions before the search was stopped");
    }

    Ok(())
}

/// The workers race; the first one with a definitive answer stops the others.
fn find_solution(args: &Args, master: &ParallelMaster) -> SolverResult<()> {
    let outcomes = master.run(|mut context| -> SolverResult<SatisfactionResult> {
        let mut solver = Solver::with_options(solver_options(args, &context));
        let queens = nqueens::add_nqueens(&mut solver, args.n, args.consistency)?;

        let mut brancher: Box<dyn Brancher> = if context.index == 0 {
            Box::new(solver.default_brancher())
        } else {
            Box::new(IndependentVariableValueBrancher::new(
                RandomSelector::new(&queens),
                InDomainRandom,
            ))
        };

        let result = solver.satisfy(&mut brancher, &mut context.stop);
        if !matches!(result, SatisfactionResult::Unknown) {
            context.stop.raise();
        }

        solver.log_statistics();
        Ok(result)
    });

    let mut unsatisfiable = false;
    for outcome in outcomes {
        match outcome? {
            SatisfactionResult::Satisfiable(solution) => {
                let columns = solution.assignments().map(|(_, column)| column);
                println!("Solution: {}", describe(columns));
                return Ok(());
            }
            SatisfactionResult::Unsatisfiable => unsatisfiable = true,
            SatisfactionResult::Unknown => {}
        }
    }

    if unsatisfiable {
        println!("UNSATISFIABLE");
    } else {
        println!("UNKNOWN");
    }

    Ok(())
}

fn describe(columns: impl Iterator<Item = i32>) -> String {
    columns
        .map(|column| column.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
