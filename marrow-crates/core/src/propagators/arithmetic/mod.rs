pub(crate) mod binary;
mod linear_equal;
mod linear_less_or_equal;
mod linear_not_equal;

pub(crate) use linear_equal::*;
pub(crate) use linear_less_or_equal::*;
pub(crate) use linear_not_equal::*;
