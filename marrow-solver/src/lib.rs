//! # Marrow
//! Marrow is a constraint programming solver built around a propagation and backtracking
//! kernel. This crate re-exports the kernel ([`marrow_core`]) and adds the N-Queens benchmark
//! model ([`nqueens`]), which the `marrow-solver` binary runs.
//!
//! # Using Marrow
//! A model consists of variables and constraints, after which the solver is asked for a
//! solution, every solution, or an optimal solution:
//! ```rust
//! # use marrow_solver::constraints;
//! # use marrow_solver::results::OptimisationResult;
//! # use marrow_solver::results::ProblemSolution;
//! # use marrow_solver::termination::Indefinite;
//! # use marrow_solver::Solver;
//! let mut solver = Solver::default();
//!
//! let x = solver.new_bounded_integer(5, 10);
//! let y = solver.new_bounded_integer(-3, 15);
//! let z = solver.new_bounded_integer(7, 25);
//!
//! // x + y + z = 17
//! solver
//!     .add_constraint(constraints::equals(vec![x, y, z], 17))
//!     .post()
//!     .expect("the sum can be 17");
//!
//! let mut brancher = solver.default_brancher();
//! let result = solver.maximise(&mut brancher, &mut Indefinite, z);
//!
//! let OptimisationResult::Optimal(solution) = result else {
//!     panic!("the model has an optimum");
//! };
//! assert_eq!(15, solution.get_integer_value(z));
//! ```
//!
//! ## Feature Flags
//! - `debug-checks`: Enable expensive assertions in the solver. Turning this on slows down the
//!   solver considerably, so it is turned off by default.
pub use marrow_core::*;

pub mod nqueens;
