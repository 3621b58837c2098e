//! # Marrow
//! Marrow is the propagation and backtracking kernel of a constraint programming solver. A
//! model consists of integer variables with finite domains and constraints over them; the
//! solver searches for assignments which satisfy every constraint (or which optimise an
//! objective) by interleaving constraint propagation with a depth-first search.
//!
//! The state of the search lives in a reversible store ([`reversible`]), whose writes are
//! undone when the search backtracks. Constraints are enforced by propagators
//! ([`propagation`]), which are scheduled by the events on the domains of their variables until
//! a common fixpoint is reached.
//!
//! # Example
//! Placing three queens on a 3x3 board is impossible:
//! ```rust
//! # use marrow_core::constraints;
//! # use marrow_core::constraints::AllDifferentConsistency;
//! # use marrow_core::results::SatisfactionResult;
//! # use marrow_core::termination::Indefinite;
//! # use marrow_core::variables::TransformableVariable;
//! # use marrow_core::Solver;
//! let mut solver = Solver::default();
//! let queens = (0..3)
//!     .map(|_| solver.new_bounded_integer(0, 2))
//!     .collect::<Vec<_>>();
//!
//! for offset in [0, 1, -1] {
//!     let diagonal = queens
//!         .iter()
//!         .enumerate()
//!         .map(|(row, queen)| queen.offset(offset * row as i32))
//!         .collect::<Vec<_>>();
//!     solver
//!         .add_constraint(constraints::all_different(
//!             diagonal,
//!             AllDifferentConsistency::Pairwise,
//!         ))
//!         .post()
//!         .expect("no conflict at the root");
//! }
//!
//! let mut brancher = solver.default_brancher();
//! assert_eq!(
//!     SatisfactionResult::Unsatisfiable,
//!     solver.satisfy(&mut brancher, &mut Indefinite)
//! );
//! ```
#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagators;

pub mod branching;
pub mod constraints;
pub mod parallel;
pub mod results;
pub mod statistics;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use marrow_core::Solver;`
// vs.
// `use marrow_core::api::Solver;`
mod api;

pub use api::*;
pub use engine::domains;
pub use engine::notifications;
pub use engine::predicates;
pub use engine::propagation;
pub use engine::reversible;
pub use engine::search;
pub use engine::termination;
pub use engine::variables;
pub use engine::PropagationStatistics;
pub use engine::QueuePolicy;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Contradiction;
pub use crate::basic_types::EmptyDomain;
pub use crate::basic_types::Entailment;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::PropagatorConflict;
pub use crate::basic_types::Random;
