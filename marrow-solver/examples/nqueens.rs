use clap::Parser;
use marrow_solver::constraints;
use marrow_solver::constraints::AllDifferentConsistency;
use marrow_solver::results::ProblemSolution;
use marrow_solver::results::SatisfactionResult;
use marrow_solver::termination::Indefinite;
use marrow_solver::variables::TransformableVariable;
use marrow_solver::Solver;

#[derive(Parser)]
struct Cli {
    /// The size of the chess board.
    n: u32,

    /// The propagation strength of the all-different constraints.
    #[arg(short, long, value_enum, default_value_t)]
    consistency: AllDifferentConsistency,
}

fn main() {
    let Cli { n, consistency } = Cli::parse();

    if n < 2 {
        println!("Please provide an 'n > 1'");
        return;
    }

    let mut solver = Solver::default();

    let variables = (0..n)
        .map(|i| solver.new_named_bounded_integer(0, n as i32 - 1, format!("q{i}")))
        .collect::<Vec<_>>();

    let diag1 = variables
        .iter()
        .enumerate()
        .map(|(i, var)| var.offset(i as i32))
        .collect::<Vec<_>>();
    let diag2 = variables
        .iter()
        .enumerate()
        .map(|(i, var)| var.offset(-(i as i32)))
        .collect::<Vec<_>>();

    let posted = solver
        .add_constraint(constraints::all_different(variables.clone(), consistency))
        .with_name("columns")
        .post()
        .and_then(|_| {
            solver
                .add_constraint(constraints::all_different(diag1, consistency))
                .with_name("diagonals")
                .post()
        })
        .and_then(|_| {
            solver
                .add_constraint(constraints::all_different(diag2, consistency))
                .with_name("anti-diagonals")
                .post()
        });
    if posted.is_err() {
        println!("{n}-queens is unsatisfiable.");
        return;
    }

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            let row_separator = format!("{}+", "+---".repeat(n as usize));

            for row in 0..n {
                println!("{row_separator}");

                let queen_col = solution.get_integer_value(variables[row as usize]) as u32;

                for col in 0..n {
                    let string = if queen_col == col { "| * " } else { "|   " };

                    print!("{string}");
                }

                println!("|");
            }

            println!("{row_separator}");
        }
        SatisfactionResult::Unsatisfiable => {
            println!("{n}-queens is unsatisfiable.");
        }
        SatisfactionResult::Unknown => {
            println!("Timeout.");
        }
    };
}
