mod constraint_operation_error;
mod entailment;
mod propagation_status;
mod random;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use constraint_operation_error::ModelError;
pub use entailment::Entailment;
pub use propagation_status::*;
pub use random::Random;
#[cfg(test)]
pub(crate) use random::tests::TestRandom;
pub(crate) use trail::Trail;
