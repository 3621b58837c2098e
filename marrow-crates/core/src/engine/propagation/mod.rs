//! Contains the main building blocks for propagators.
//!
//! A propagator takes as input a set of variables (<code>x<sub>i</sub> ∈ X</code>) and for each
//! variable a corresponding domain (<code>D<sub>i</sub> ∈ D</code>); it can then be seen as a
//! function which maps `D ↦ D'` such that <code>D'<sub>i</sub> ⊆ D<sub>i</sub></code> for all
//! variables.
//!
//! A propagator is said to be at fix-point if applying it again changes no domain. A propagator
//! is said to be "idempotent" if a single call to it will result in it being at fix-point.
//!
//! # Practical
//!
//! Each concrete propagator implements [`Propagator`]; the main function to implement is
//! [`Propagator::propagate`], which performs the domain reduction through a
//! [`PropagationContextMut`].
//!
//! A propagator is created by a [`PropagatorConstructor`]. The constructor registers the
//! propagator for domain events on its scope, and allocates the reversible cells holding its
//! incremental state, through a [`PropagatorConstructorContext`].
//!
//! Propagators are not required to be idempotent; the scheduler calls a propagator again as
//! long as it is notified of events on its scope.
mod constructor;
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;
mod propagator_var_id;
mod store;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::NotificationContext;
pub use contexts::PropagationContextMut;
pub use local_id::LocalId;
pub use propagator::EnqueueDecision;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;
pub(crate) use propagator_var_id::PropagatorVarId;
pub(crate) use store::PropagatorInfo;
pub use store::PropagatorHandle;
pub(crate) use store::PropagatorStore;
