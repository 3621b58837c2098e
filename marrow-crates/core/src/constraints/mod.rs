//! Defines the constraints that are provided out of the box and can be added to the
//! [`Solver`].
//!
//! A constraint is a relation over variables. In the solver, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
//!
//! # Example
//! ```
//! # use marrow_core::constraints;
//! # use marrow_core::Solver;
//! let mut solver = Solver::default();
//!
//! let a = solver.new_bounded_integer(0, 3);
//! let b = solver.new_bounded_integer(0, 3);
//!
//! solver
//!     .add_constraint(constraints::equals([a, b], 0))
//!     .with_name("both zero")
//!     .post()
//!     .expect("a and b can both be zero");
//! ```

mod all_different;
mod arithmetic;
mod constraint_poster;
mod constraint_store;
mod element;

pub use all_different::*;
pub use arithmetic::*;
pub use constraint_poster::*;
pub use constraint_store::ConstraintId;
pub(crate) use constraint_store::ConstraintStore;
pub use element::*;

use crate::engine::propagation::PropagatorConstructor;
use crate::propagators::ReifiedPropagatorArgs;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// A [`Constraint`] is a relation over variables. It disqualifies certain partial assignments of
/// making it into a solution of the problem.
///
/// For example, the constraint `a = b` over two variables `a` and `b` only allows assignments to
/// `a` and `b` of the same value, and rejects any assignment where `a` and `b` differ.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`Solver`], recording its propagators under `constraint`.
    ///
    /// This method returns a [`ConstraintOperationError`] if the addition of the [`Constraint`]
    /// led to a root-level conflict.
    fn post(
        self,
        solver: &mut Solver,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError>;

    /// Add the half-reified version of the [`Constraint`] to the [`Solver`]; i.e. post the
    /// constraint `r -> constraint` where `r` is a reification literal.
    ///
    /// This method returns a [`ConstraintOperationError`] if the addition of the [`Constraint`]
    /// led to a root-level conflict.
    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError>;
}

impl<Constructor> Constraint for Constructor
where
    Constructor: PropagatorConstructor,
{
    fn post(
        self,
        solver: &mut Solver,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self, constraint)
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(
            ReifiedPropagatorArgs {
                positive: self,
                negative: None::<Constructor>,
                reification_literal,
            },
            constraint,
        )
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(
        self,
        solver: &mut Solver,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(solver, constraint))
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        self.into_iter()
            .try_for_each(|c| c.implied_by(solver, reification_literal, constraint))
    }
}

/// A [`Constraint`] which has a well-defined negation.
///
/// Having a negation means the [`Constraint`] can be fully reified; i.e., a constraint `C` can be
/// turned into `r <-> C` where `r` is a reification literal.
///
/// For example, the negation of the [`Constraint`] `a = b` is (well-)defined as `a != b`.
pub trait NegatableConstraint: Constraint {
    type NegatedConstraint: NegatableConstraint + 'static;

    fn negation(&self) -> Self::NegatedConstraint;

    /// Add the reified version of the [`Constraint`] to the [`Solver`]; i.e. post the constraint
    /// `r <-> constraint` where `r` is a reification literal.
    ///
    /// By default this posts `r -> constraint` and `!r -> negation`. Constraints backed by a
    /// single propagator instead post one reified propagator over both sides, which also
    /// detects when both sides are violated.
    ///
    /// This method returns a [`ConstraintOperationError`] if the addition of the [`Constraint`]
    /// led to a root-level conflict.
    fn reify(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError>
    where
        Self: Sized,
    {
        let negation = self.negation();

        self.implied_by(solver, reification_literal, constraint)?;
        negation.implied_by(solver, !reification_literal, constraint)
    }
}

/// Post `reification_literal <-> positive`, where `negative` propagates the negation of
/// `positive`.
pub(crate) fn reify_with_propagators<Positive, Negative>(
    solver: &mut Solver,
    positive: Positive,
    negative: Negative,
    reification_literal: Literal,
    constraint: ConstraintId,
) -> Result<(), ConstraintOperationError>
where
    Positive: PropagatorConstructor,
    Negative: PropagatorConstructor,
{
    solver.add_propagator(
        ReifiedPropagatorArgs {
            positive,
            negative: Some(negative),
            reification_literal,
        },
        constraint,
    )
}
