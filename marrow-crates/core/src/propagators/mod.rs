//! Contains the propagator implementations shipped with the solver.
//!
//! See [`crate::propagation`] for info on propagators.

mod reified_propagator;

pub(crate) mod all_different;
pub(crate) mod arithmetic;
pub(crate) mod element;

pub(crate) use all_different::*;
pub(crate) use arithmetic::binary::*;
pub(crate) use arithmetic::*;
pub(crate) use element::*;
pub(crate) use reified_propagator::*;
