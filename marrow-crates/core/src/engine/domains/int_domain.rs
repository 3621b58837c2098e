use super::value_set::ValueSet;
use crate::engine::reversible::Environment;
use crate::engine::reversible::ReversibleInt;
use crate::engine::reversible::ReversibleLong;

/// The reversible state of one integer domain.
///
/// The domain is `[lower_bound, upper_bound]`, intersected with the value set when the domain
/// was created from an enumeration of values. Both bounds are always members.
#[derive(Debug)]
pub(super) struct IntDomain {
    lower_bound: ReversibleInt,
    upper_bound: ReversibleInt,
    size: ReversibleLong,
    values: Option<ValueSet>,
}

impl IntDomain {
    pub(super) fn interval(
        environment: &mut Environment,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Self {
        IntDomain {
            lower_bound: environment.new_int(lower_bound),
            upper_bound: environment.new_int(upper_bound),
            size: environment.new_long(span(lower_bound, upper_bound) as i64),
            values: None,
        }
    }

    /// `values` must be sorted, deduplicated and non-empty.
    pub(super) fn sparse(environment: &mut Environment, values: &[i32]) -> Self {
        IntDomain {
            lower_bound: environment.new_int(values[0]),
            upper_bound: environment.new_int(values[values.len() - 1]),
            size: environment.new_long(values.len() as i64),
            values: Some(ValueSet::new(environment, values)),
        }
    }

    pub(super) fn lower_bound(&self, environment: &Environment) -> i32 {
        environment.read(self.lower_bound)
    }

    pub(super) fn upper_bound(&self, environment: &Environment) -> i32 {
        environment.read(self.upper_bound)
    }

    pub(super) fn size(&self, environment: &Environment) -> u64 {
        environment.read(self.size) as u64
    }

    pub(super) fn is_interval(&self) -> bool {
        self.values.is_none()
    }

    pub(super) fn contains(&self, environment: &Environment, value: i32) -> bool {
        let in_bounds =
            self.lower_bound(environment) <= value && value <= self.upper_bound(environment);
        in_bounds
            && self
                .values
                .as_ref()
                .is_none_or(|values| values.contains(environment, value))
    }

    pub(super) fn values<'a>(
        &'a self,
        environment: &'a Environment,
    ) -> impl Iterator<Item = i32> + 'a {
        let upper_bound = self.upper_bound(environment);
        let mut next = Some(self.lower_bound(environment));

        std::iter::from_fn(move || {
            let current = next?;
            next = if current >= upper_bound {
                None
            } else {
                match &self.values {
                    None => Some(current + 1),
                    Some(values) => values.next_member(environment, current + 1, upper_bound),
                }
            };
            Some(current)
        })
    }

    /// Raise the lower bound to the smallest member that is at least `value`. Returns the new
    /// lower bound, or `None` if no such member exists; the domain is untouched in that case.
    pub(super) fn raise_lower_bound(
        &self,
        environment: &mut Environment,
        value: i32,
    ) -> Option<i32> {
        let lower_bound = self.lower_bound(environment);
        let upper_bound = self.upper_bound(environment);

        let new_lower_bound = match &self.values {
            None => value,
            Some(values) => values.next_member(environment, value, upper_bound)?,
        };
        if new_lower_bound > upper_bound {
            return None;
        }

        let removed = match &self.values {
            None => span(lower_bound, new_lower_bound) - 1,
            Some(values) => values.remove_range(environment, lower_bound, new_lower_bound - 1),
        };

        environment.write(self.lower_bound, new_lower_bound);
        self.shrink(environment, removed);
        Some(new_lower_bound)
    }

    /// Symmetric to [`IntDomain::raise_lower_bound`].
    pub(super) fn lower_upper_bound(
        &self,
        environment: &mut Environment,
        value: i32,
    ) -> Option<i32> {
        let lower_bound = self.lower_bound(environment);
        let upper_bound = self.upper_bound(environment);

        let new_upper_bound = match &self.values {
            None => value,
            Some(values) => values.previous_member(environment, lower_bound, value)?,
        };
        if new_upper_bound < lower_bound {
            return None;
        }

        let removed = match &self.values {
            None => span(new_upper_bound, upper_bound) - 1,
            Some(values) => values.remove_range(environment, new_upper_bound + 1, upper_bound),
        };

        environment.write(self.upper_bound, new_upper_bound);
        self.shrink(environment, removed);
        Some(new_upper_bound)
    }

    /// Remove a value strictly between the bounds. Returns whether it was a member; interval
    /// domains cannot represent holes and are left unchanged.
    pub(super) fn remove_interior(&self, environment: &mut Environment, value: i32) -> bool {
        let removed = self
            .values
            .as_ref()
            .is_some_and(|values| values.remove(environment, value));
        if removed {
            self.shrink(environment, 1);
        }
        removed
    }

    fn shrink(&self, environment: &mut Environment, removed: u64) {
        environment.add(self.size, -(removed as i64));
    }
}

/// The number of integers in `[from, to]`, which may exceed `u32::MAX`.
fn span(from: i32, to: i32) -> u64 {
    (to as i64 - from as i64 + 1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_full_integer_range_is_counted_without_overflow() {
        let mut environment = Environment::default();
        let domain = IntDomain::interval(&mut environment, i32::MIN, i32::MAX);
        assert_eq!(1 << 32, domain.size(&environment));

        assert_eq!(
            Some(1_000_000_000),
            domain.raise_lower_bound(&mut environment, 1_000_000_000)
        );
        assert_eq!(
            Some(-1_000_000_000),
            IntDomain::interval(&mut environment, -2_000_000_000, 2_000_000_000)
                .lower_upper_bound(&mut environment, -1_000_000_000)
        );
        assert_eq!(
            i32::MAX as u64 - 1_000_000_000 + 1,
            domain.size(&environment)
        );
    }

    #[test]
    fn sparse_domains_count_their_members() {
        let mut environment = Environment::default();
        let domain = IntDomain::sparse(&mut environment, &[i32::MIN, 0, i32::MAX]);
        assert_eq!(3, domain.size(&environment));

        assert_eq!(Some(0), domain.raise_lower_bound(&mut environment, -5));
        assert_eq!(2, domain.size(&environment));
        assert!(!domain.remove_interior(&mut environment, 5));
    }
}
