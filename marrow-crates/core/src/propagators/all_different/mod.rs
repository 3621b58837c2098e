//! Propagators for `all_different(x)` above the pairwise decomposition.
mod all_different_bounds;
mod all_different_value;

pub(crate) use all_different_bounds::*;
pub(crate) use all_different_value::*;

use crate::basic_types::Entailment;
use crate::engine::domains::Domains;
use crate::engine::domains::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// False as soon as two fixed variables share a value, true once every variable is fixed to a
/// distinct value.
fn entailment_of_all_different<Var: IntegerVariable>(
    vars: &[Var],
    domains: Domains<'_>,
) -> Entailment {
    let mut fixed_values = Vec::with_capacity(vars.len());
    for var in vars {
        if domains.is_fixed(var) {
            fixed_values.push(domains.lower_bound(var));
        }
    }

    let num_fixed = fixed_values.len();
    fixed_values.sort_unstable();
    fixed_values.dedup();

    if fixed_values.len() < num_fixed {
        Entailment::False
    } else if num_fixed == vars.len() {
        Entailment::True
    } else {
        Entailment::Undefined
    }
}
