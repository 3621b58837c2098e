use crate::constraints::reify_with_propagators;
use crate::constraints::Constraint;
use crate::constraints::ConstraintId;
use crate::constraints::NegatableConstraint;
use crate::propagators::LinearLessOrEqualPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// Create the [`NegatableConstraint`] `\sum terms_i <= rhs`.
///
/// Its negation is `\sum terms_i > rhs`.
pub fn less_than_or_equals<Var: IntegerVariable>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    Inequality {
        terms: terms.into(),
        rhs,
    }
}

/// Create the [`NegatableConstraint`] `\sum terms_i >= rhs`.
///
/// Its negation is `\sum terms_i < rhs`.
pub fn greater_than_or_equals<Var: IntegerVariable>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    let terms: Box<[Var]> = terms.into();
    less_than_or_equals(
        terms.iter().map(|term| term.scaled(-1)).collect::<Box<[_]>>(),
        -rhs,
    )
}

/// Creates the [`NegatableConstraint`] `lhs <= rhs`.
///
/// Its negation is `lhs > rhs`.
pub fn binary_less_than_or_equals<Var: IntegerVariable>(
    lhs: Var,
    rhs: Var,
) -> impl NegatableConstraint {
    less_than_or_equals([lhs.scaled(1), rhs.scaled(-1)], 0)
}

struct Inequality<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> Inequality<Var> {
    fn into_propagator(self) -> LinearLessOrEqualPropagatorArgs<Var> {
        LinearLessOrEqualPropagatorArgs {
            x: self.terms,
            c: self.rhs,
        }
    }
}

impl<Var: IntegerVariable> Constraint for Inequality<Var> {
    fn post(
        self,
        solver: &mut Solver,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        self.into_propagator().post(solver, constraint)
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        self.into_propagator()
            .implied_by(solver, reification_literal, constraint)
    }
}

impl<Var: IntegerVariable> NegatableConstraint for Inequality<Var> {
    type NegatedConstraint = Inequality<Var::AffineView>;

    fn negation(&self) -> Self::NegatedConstraint {
        Inequality {
            terms: self.terms.iter().map(|term| term.scaled(-1)).collect(),
            // `-rhs - 1`, which cannot overflow.
            rhs: !self.rhs,
        }
    }

    fn reify(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        let negation = self.negation();
        reify_with_propagators(
            solver,
            self.into_propagator(),
            negation.into_propagator(),
            reification_literal,
            constraint,
        )
    }
}
