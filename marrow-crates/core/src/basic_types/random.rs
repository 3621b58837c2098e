use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

use crate::marrow_assert_moderate;

/// Source of randomness used by the randomised selectors.
///
/// Any seedable [`Rng`] implements it, which keeps searches reproducible for a fixed seed.
///
/// # Example
/// ```rust
/// # use rand::rngs::SmallRng;
/// # use rand::SeedableRng;
/// # use marrow_core::Random;
/// let mut rng = SmallRng::seed_from_u64(42);
/// let value = rng.generate_i32_in_range(3, 5);
/// assert!((3..=5).contains(&value));
/// ```
pub trait Random: Debug {
    /// Returns `true` with the given probability, which must lie in `[0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Uniformly samples from `[range.start, range.end)`.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Uniformly samples from `[lb, ub]`.
    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        marrow_assert_moderate!(
            (0.0..=1.0).contains(&probability),
            "It should hold that 0.0 <= {probability} <= 1.0"
        );

        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
        self.gen_range(lb..=ub)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed sequence of choices, so tests can force the outcome of random selectors.
    #[derive(Debug, Default)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
        pub(crate) integers: Vec<i32>,
    }

    impl Random for TestRandom {
        fn generate_bool(&mut self, _probability: f64) -> bool {
            false
        }

        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let value = self.usizes.remove(0);
            assert!(range.contains(&value));
            value
        }

        fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
            let value = self.integers.remove(0);
            assert!((lb..=ub).contains(&value));
            value
        }
    }
}
