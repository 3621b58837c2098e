use super::Constraint;
use crate::propagators::ElementPropagatorArgs;
use crate::variables::IntegerVariable;

/// Creates the [`Constraint`] `table[index] = rhs` over a table of constants.
///
/// The index is zero-based; values of `index` outside the table are removed.
pub fn element(
    index: impl IntegerVariable,
    table: impl Into<Box<[i32]>>,
    rhs: impl IntegerVariable,
) -> impl Constraint {
    ElementPropagatorArgs {
        index,
        table: table.into(),
        rhs,
    }
}
