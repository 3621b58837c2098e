use itertools::Itertools;

use super::binary_not_equals;
use super::Constraint;
use super::ConstraintId;
use crate::propagators::AllDifferentBoundsPropagatorArgs;
use crate::propagators::AllDifferentValuePropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// The strength of the propagation of [`all_different`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllDifferentConsistency {
    /// A binary disequality for every pair of variables.
    #[default]
    Pairwise,
    /// One propagator removing the value of every fixed variable from the others. Reaches the
    /// same fixpoint as [`AllDifferentConsistency::Pairwise`].
    Value,
    /// Bounds consistency through Hall intervals; stronger on bounds than the other levels,
    /// weaker on the interior of domains.
    Bounds,
}

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct.
pub fn all_different<Var: IntegerVariable>(
    variables: impl Into<Box<[Var]>>,
    consistency: AllDifferentConsistency,
) -> impl Constraint {
    AllDifferent {
        variables: variables.into(),
        consistency,
    }
}

struct AllDifferent<Var> {
    variables: Box<[Var]>,
    consistency: AllDifferentConsistency,
}

impl<Var: IntegerVariable> AllDifferent<Var> {
    fn pairwise(&self) -> Vec<impl Constraint> {
        self.variables
            .iter()
            .tuple_combinations::<(_, _)>()
            .map(|(a, b)| binary_not_equals(a.clone(), b.clone()))
            .collect()
    }
}

impl<Var: IntegerVariable> Constraint for AllDifferent<Var> {
    fn post(
        self,
        solver: &mut Solver,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        match self.consistency {
            AllDifferentConsistency::Pairwise => self.pairwise().post(solver, constraint),
            AllDifferentConsistency::Value => AllDifferentValuePropagatorArgs {
                vars: self.variables,
            }
            .post(solver, constraint),
            AllDifferentConsistency::Bounds => AllDifferentBoundsPropagatorArgs {
                vars: self.variables,
            }
            .post(solver, constraint),
        }
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
        constraint: ConstraintId,
    ) -> Result<(), ConstraintOperationError> {
        match self.consistency {
            AllDifferentConsistency::Pairwise => {
                self.pairwise()
                    .implied_by(solver, reification_literal, constraint)
            }
            AllDifferentConsistency::Value => AllDifferentValuePropagatorArgs {
                vars: self.variables,
            }
            .implied_by(solver, reification_literal, constraint),
            AllDifferentConsistency::Bounds => AllDifferentBoundsPropagatorArgs {
                vars: self.variables,
            }
            .implied_by(solver, reification_literal, constraint),
        }
    }
}
