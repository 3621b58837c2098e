//! The variable abstractions propagators are written against.
//!
//! A [`DomainId`] names a domain in the solver, an [`AffineView`] transforms it, and a
//! [`Literal`] interprets a 0-1 domain as a Boolean.

mod affine_view;
mod domain_id;
mod integer_variable;
mod literal;
mod transformable_variable;

pub use affine_view::AffineView;
pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use literal::Literal;
pub use transformable_variable::TransformableVariable;
