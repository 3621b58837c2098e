use crate::engine::reversible::Environment;
use crate::engine::reversible::ReversibleLong;

const WORD_BITS: usize = 64;

/// The members of an enumerated domain.
///
/// The initial values are kept sorted, and one bit per position records whether the value at
/// that position is still a member. The bits live in reversible cells so that removals are
/// undone on backtracking. The number of cells depends only on the number of values, not on
/// the span between the smallest and the largest.
#[derive(Debug)]
pub(super) struct ValueSet {
    values: Box<[i32]>,
    words: Vec<ReversibleLong>,
}

impl ValueSet {
    /// Create the set of `values`, which must be sorted, deduplicated and non-empty.
    pub(super) fn new(environment: &mut Environment, values: &[i32]) -> ValueSet {
        let num_words = values.len().div_ceil(WORD_BITS);
        let words = (0..num_words)
            .map(|word_index| {
                let bits_in_word = (values.len() - word_index * WORD_BITS).min(WORD_BITS);
                let word = u64::MAX >> (WORD_BITS - bits_in_word);
                environment.new_long(word as i64)
            })
            .collect();

        ValueSet {
            values: values.into(),
            words,
        }
    }

    /// The positions of the initial values in `[from, to]`, as a half-open range.
    fn positions_between(&self, from: i32, to: i32) -> (usize, usize) {
        let start = self.values.partition_point(|&value| value < from);
        let end = self.values.partition_point(|&value| value <= to);
        (start, end)
    }

    fn word(&self, environment: &Environment, word_index: usize) -> u64 {
        environment.read(self.words[word_index]) as u64
    }

    fn is_set(&self, environment: &Environment, position: usize) -> bool {
        self.word(environment, position / WORD_BITS) & (1 << (position % WORD_BITS)) != 0
    }

    pub(super) fn contains(&self, environment: &Environment, value: i32) -> bool {
        self.values
            .binary_search(&value)
            .is_ok_and(|position| self.is_set(environment, position))
    }

    /// Remove `value`, returning whether it was a member.
    pub(super) fn remove(&self, environment: &mut Environment, value: i32) -> bool {
        let Ok(position) = self.values.binary_search(&value) else {
            return false;
        };
        if !self.is_set(environment, position) {
            return false;
        }

        let word_index = position / WORD_BITS;
        let word = self.word(environment, word_index) & !(1 << (position % WORD_BITS));
        environment.write(self.words[word_index], word as i64);
        true
    }

    /// Remove every member in `[from, to]`, returning how many were removed.
    pub(super) fn remove_range(&self, environment: &mut Environment, from: i32, to: i32) -> u64 {
        let (start, end) = self.positions_between(from, to);
        if start >= end {
            return 0;
        }
        let last = end - 1;

        let first_word = start / WORD_BITS;
        let last_word = last / WORD_BITS;

        let mut removed = 0;
        for word_index in first_word..=last_word {
            let low = if word_index == first_word {
                start % WORD_BITS
            } else {
                0
            };
            let high = if word_index == last_word {
                last % WORD_BITS
            } else {
                WORD_BITS - 1
            };
            let mask = (u64::MAX >> (WORD_BITS - 1 - high)) & (u64::MAX << low);

            let word = self.word(environment, word_index);
            if word & mask != 0 {
                removed += (word & mask).count_ones() as u64;
                environment.write(self.words[word_index], (word & !mask) as i64);
            }
        }

        removed
    }

    /// The smallest member in `[from, to]`.
    pub(super) fn next_member(&self, environment: &Environment, from: i32, to: i32) -> Option<i32> {
        let (mut position, end) = self.positions_between(from, to);

        while position < end {
            let word_index = position / WORD_BITS;
            let word = self.word(environment, word_index) >> (position % WORD_BITS);
            if word != 0 {
                let candidate = position + word.trailing_zeros() as usize;
                return (candidate < end).then(|| self.values[candidate]);
            }
            position = (word_index + 1) * WORD_BITS;
        }

        None
    }

    /// The largest member in `[from, to]`.
    pub(super) fn previous_member(
        &self,
        environment: &Environment,
        from: i32,
        to: i32,
    ) -> Option<i32> {
        let (start, end) = self.positions_between(from, to);
        if start >= end {
            return None;
        }

        let mut position = end - 1;
        loop {
            let word_index = position / WORD_BITS;
            let word =
                self.word(environment, word_index) << (WORD_BITS - 1 - position % WORD_BITS);
            if word != 0 {
                let candidate = position - word.leading_zeros() as usize;
                return (candidate >= start).then(|| self.values[candidate]);
            }
            if word_index * WORD_BITS <= start {
                return None;
            }
            position = word_index * WORD_BITS - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_found_across_word_boundaries() {
        let mut environment = Environment::default();
        let set = ValueSet::new(&mut environment, &[-3, 61, 70, 200]);

        assert_eq!(Some(-3), set.next_member(&environment, -10, 300));
        assert_eq!(Some(70), set.next_member(&environment, 62, 300));
        assert_eq!(None, set.next_member(&environment, 71, 199));
        assert_eq!(Some(200), set.previous_member(&environment, -10, 300));
        assert_eq!(Some(61), set.previous_member(&environment, -10, 69));
        assert_eq!(None, set.previous_member(&environment, -2, 60));
    }

    #[test]
    fn removing_a_range_counts_members() {
        let mut environment = Environment::default();
        let set = ValueSet::new(&mut environment, &[0, 1, 5, 64, 65, 130]);

        assert_eq!(4, set.remove_range(&mut environment, 1, 100));
        assert!(set.contains(&environment, 0));
        assert!(!set.contains(&environment, 64));
        assert!(set.contains(&environment, 130));
    }

    #[test]
    fn a_wide_span_needs_one_cell_per_word_of_values() {
        let mut environment = Environment::default();
        let set = ValueSet::new(&mut environment, &[0, 1_000_000, i32::MAX]);

        assert_eq!(1, set.words.len());
        assert!(set.contains(&environment, i32::MAX));
        assert!(!set.contains(&environment, 1));
        assert_eq!(Some(1_000_000), set.next_member(&environment, 1, i32::MAX));
        assert_eq!(1, set.remove_range(&mut environment, 1, 1_000_000));
        assert_eq!(Some(0), set.previous_member(&environment, i32::MIN, i32::MAX - 1));
    }

    #[test]
    fn sets_larger_than_a_word_track_every_position() {
        let mut environment = Environment::default();
        let values = (0..150).map(|value| value * 3).collect::<Vec<_>>();
        let set = ValueSet::new(&mut environment, &values);

        assert_eq!(3, set.words.len());
        assert_eq!(Some(447), set.previous_member(&environment, 0, 1000));
        assert_eq!(100, set.remove_range(&mut environment, 0, 299));
        assert_eq!(Some(300), set.next_member(&environment, i32::MIN, 1000));
        assert_eq!(None, set.previous_member(&environment, 0, 299));
    }

    #[test]
    fn removals_are_undone_on_pop() {
        let mut environment = Environment::default();
        let set = ValueSet::new(&mut environment, &[2, 4, 6]);

        environment.push();
        assert!(set.remove(&mut environment, 4));
        assert!(!set.remove(&mut environment, 4));
        assert!(!set.contains(&environment, 4));

        environment.pop();
        assert!(set.contains(&environment, 4));
    }
}
