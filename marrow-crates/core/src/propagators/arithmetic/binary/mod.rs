mod binary_equals;
mod binary_not_equals;

pub(crate) use binary_equals::*;
pub(crate) use binary_not_equals::*;
