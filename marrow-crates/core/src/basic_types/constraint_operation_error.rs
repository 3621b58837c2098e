use thiserror::Error;

/// Errors in the description of a model, detected while it is being built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("the domain [{lower_bound}, {upper_bound}] contains no values")]
    EmptyDomain { lower_bound: i32, upper_bound: i32 },
    #[error("a sparse domain needs at least one value")]
    EmptyValueSet,
    #[error("propagator {propagator} does not register any variable")]
    EmptyScope { propagator: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the propagator failed because it is infeasible at the root")]
    InfeasiblePropagator,
    #[error("Adding constraint failed because the solver is in an infeasible state")]
    InfeasibleState,
    #[error(transparent)]
    Model(#[from] ModelError),
}
