use marrow_solver::ConstraintOperationError;
use thiserror::Error;

pub(crate) type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub(crate) enum SolverError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to build the model, more details: {0}")]
    Model(#[from] ConstraintOperationError),
}
