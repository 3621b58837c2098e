//! Contains structures and traits to define the decision making procedure of the search.
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which defines how to branch (i.e. the decision to post next)
//! - The [`VariableSelector`] which defines which variable to branch on
//! - The [`ValueSelector`] which defines which value of the selected variable to branch on
//!
//! [`IndependentVariableValueBrancher`] combines one of each selector into a [`Brancher`].
//!
//! # Example
//! ```rust
//! # use marrow_core::branching::branchers::IndependentVariableValueBrancher;
//! # use marrow_core::branching::value_selection::InDomainMax;
//! # use marrow_core::branching::variable_selection::AntiFirstFail;
//! # use marrow_core::termination::Indefinite;
//! # use marrow_core::results::ProblemSolution;
//! # use marrow_core::results::SatisfactionResult;
//! # use marrow_core::Solver;
//! let mut solver = Solver::default();
//! let variables = vec![solver.new_bounded_integer(0, 10), solver.new_bounded_integer(2, 4)];
//!
//! let mut brancher = IndependentVariableValueBrancher::new(
//!     AntiFirstFail::new(&variables),
//!     InDomainMax,
//! );
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//! if let SatisfactionResult::Satisfiable(solution) = result {
//!     assert_eq!(10, solution.get_integer_value(variables[0]));
//!     assert_eq!(4, solution.get_integer_value(variables[1]));
//! }
//! ```
//!
//! [`VariableSelector`]: variable_selection::VariableSelector
//! [`ValueSelector`]: value_selection::ValueSelector
//! [`IndependentVariableValueBrancher`]: branchers::IndependentVariableValueBrancher
mod brancher;
pub mod branchers;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use selection_context::SelectionContext;
#[cfg(test)]
pub(crate) use selection_context::tests::create_for_testing;
