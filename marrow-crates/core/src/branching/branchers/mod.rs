//! Provides several implementations of [`Brancher`]s.
//!
//! [`Brancher`]: crate::branching::Brancher
mod independent_variable_value_brancher;

pub use independent_variable_value_brancher::DefaultBrancher;
pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
