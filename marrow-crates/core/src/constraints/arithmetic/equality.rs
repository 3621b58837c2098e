use crate::constraints::reify_with_propagators;
use crate::constraints::Constraint;
use crate::constraints::ConstraintId;
use crate::constraints::NegatableConstraint;
use crate::propagators::BinaryEqualsPropagatorArgs;
use crate::propagators::BinaryNotEqualsPropagatorArgs;
use crate::propagators::LinearEqualPropagatorArgs;
use crate::propagators::LinearNotEqualPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// Creates the [`NegatableConstraint`] `\sum terms_i = rhs`.
///
/// Its negation is [`not_equals`].
pub fn equals<Var: IntegerVariable>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    EqualConstraint {
        terms: terms.into(),
        rhs,
    }
}

/// Creates the [`NegatableConstraint`] `lhs = rhs`.
///
/// Its negation is [`binary_not_equals`].
pub fn binary_equals<Var: IntegerVariable>(lhs: Var, rhs: Var) -> impl NegatableConstraint {
    BinaryEqualConstraint { a: lhs, b: rhs }
}

/// Create the [`NegatableConstraint`] `\sum terms_i != rhs`.
///
/// Its negation is [`equals`].
pub fn not_equals<Var: IntegerVariable>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    equals(terms, rhs).negation()
}

/// Creates the [`NegatableConstraint`] `lhs != rhs`.
///
/// Its negation is [`binary_equals`].
pub fn binary_not_equals<Var: IntegerVariable>(lhs: Var, rhs: Var) -> impl NegatableConstraint {
    BinaryNotEqualsConstraint { a: lhs, b: rhs }
}

/// Implements [`Constraint`] and [`NegatableConstraint`] for a constraint backed by a single
/// propagator, given the conversion into its propagator and its negation.
macro_rules! single_propagator_constraint {
    ($constraint:ident, $negated:ident) => {
        impl<Var: IntegerVariable> Constraint for $constraint<Var> {
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

        impl<Var: IntegerVariable> NegatableConstraint for $constraint<Var> {
            type NegatedConstraint = $negated<Var>;

            fn negation(&self) -> Self::NegatedConstraint {
                $negated::from(self)
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
    };
}

struct BinaryEqualConstraint<Var> {
    a: Var,
    b: Var,
}

impl<Var: IntegerVariable> BinaryEqualConstraint<Var> {
    fn into_propagator(self) -> BinaryEqualsPropagatorArgs<Var, Var> {
        BinaryEqualsPropagatorArgs {
            a: self.a,
            b: self.b,
        }
    }
}

impl<Var: Clone> From<&BinaryNotEqualsConstraint<Var>> for BinaryEqualConstraint<Var> {
    fn from(constraint: &BinaryNotEqualsConstraint<Var>) -> Self {
        BinaryEqualConstraint {
            a: constraint.a.clone(),
            b: constraint.b.clone(),
        }
    }
}

struct BinaryNotEqualsConstraint<Var> {
    a: Var,
    b: Var,
}

impl<Var: IntegerVariable> BinaryNotEqualsConstraint<Var> {
    fn into_propagator(self) -> BinaryNotEqualsPropagatorArgs<Var, Var> {
        BinaryNotEqualsPropagatorArgs {
            a: self.a,
            b: self.b,
        }
    }
}

impl<Var: Clone> From<&BinaryEqualConstraint<Var>> for BinaryNotEqualsConstraint<Var> {
    fn from(constraint: &BinaryEqualConstraint<Var>) -> Self {
        BinaryNotEqualsConstraint {
            a: constraint.a.clone(),
            b: constraint.b.clone(),
        }
    }
}

struct EqualConstraint<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> EqualConstraint<Var> {
    fn into_propagator(self) -> LinearEqualPropagatorArgs<Var> {
        LinearEqualPropagatorArgs {
            x: self.terms,
            c: self.rhs,
        }
    }
}

impl<Var: Clone> From<&NotEqualConstraint<Var>> for EqualConstraint<Var> {
    fn from(constraint: &NotEqualConstraint<Var>) -> Self {
        EqualConstraint {
            terms: constraint.terms.clone(),
            rhs: constraint.rhs,
        }
    }
}

struct NotEqualConstraint<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> NotEqualConstraint<Var> {
    fn into_propagator(self) -> LinearNotEqualPropagatorArgs<Var> {
        LinearNotEqualPropagatorArgs {
            terms: self.terms,
            rhs: self.rhs,
        }
    }
}

impl<Var: Clone> From<&EqualConstraint<Var>> for NotEqualConstraint<Var> {
    fn from(constraint: &EqualConstraint<Var>) -> Self {
        NotEqualConstraint {
            terms: constraint.terms.clone(),
            rhs: constraint.rhs,
        }
    }
}

single_propagator_constraint!(BinaryEqualConstraint, BinaryNotEqualsConstraint);
single_propagator_constraint!(BinaryNotEqualsConstraint, BinaryEqualConstraint);
single_propagator_constraint!(EqualConstraint, NotEqualConstraint);
single_propagator_constraint!(NotEqualConstraint, EqualConstraint);
