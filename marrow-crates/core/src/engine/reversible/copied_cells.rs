use std::fmt::Debug;

use super::cells::ReversibleCells;

#[derive(Clone, Debug)]
struct SavedWorld<T> {
    world: usize,
    values: Vec<T>,
}

/// Reversible cells which copy the whole array on the first write in a world.
///
/// The saved copies form a stack with strictly increasing worlds. A copy tagged with world `w`
/// holds the values as they were just before the first write in `w`. When the store goes back
/// to world `t`, every copy tagged above `t` is discarded and the values are reset to the
/// lowest discarded copy. No write happened between the end of world `t` and that copy, so it
/// holds exactly the values at the end of `t`.
#[derive(Debug)]
pub(crate) struct CopiedCells<T> {
    values: Vec<T>,
    saved: Vec<SavedWorld<T>>,
    total_records: u64,
}

impl<T> Default for CopiedCells<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            saved: Vec::new(),
            total_records: 0,
        }
    }
}

impl<T: Clone + Debug> ReversibleCells<T> for CopiedCells<T> {
    fn create(&mut self, value: T) -> usize {
        self.values.push(value);
        self.values.len() - 1
    }

    fn read(&self, index: usize) -> &T {
        &self.values[index]
    }

    fn write(&mut self, index: usize, value: T, world: usize) {
        let needs_copy = world > 0
            && self
                .saved
                .last()
                .map_or(true, |saved| saved.world < world);

        if needs_copy {
            self.saved.push(SavedWorld {
                world,
                values: self.values.clone(),
            });
            self.total_records += 1;
        }

        self.values[index] = value;
    }

    fn new_checkpoint(&mut self) {}

    fn synchronise(&mut self, world: usize) {
        let mut lowest_discarded = None;
        while self.saved.last().is_some_and(|saved| saved.world > world) {
            lowest_discarded = self.saved.pop();
        }

        if let Some(saved) = lowest_discarded {
            // Cells created after the copy was taken keep their current value.
            self.values[..saved.values.len()].clone_from_slice(&saved.values);
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn num_records(&self) -> usize {
        self.saved.len()
    }

    fn total_records(&self) -> u64 {
        self.total_records
    }

    fn deepest_recorded_world(&self) -> usize {
        self.saved.last().map_or(0, |saved| saved.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_copy_per_world_with_writes() {
        let mut cells = CopiedCells::default();
        let a = cells.create(1_i64);
        let b = cells.create(2_i64);

        cells.write(a, 10, 1);
        cells.write(b, 20, 1);
        cells.write(a, 30, 3);

        assert_eq!(2, cells.num_records());

        cells.synchronise(2);
        assert_eq!((10, 20), (*cells.read(a), *cells.read(b)));

        cells.synchronise(0);
        assert_eq!((1, 2), (*cells.read(a), *cells.read(b)));
        assert_eq!(0, cells.num_records());
    }

    #[test]
    fn repeated_shallow_push_pop_cycles_restore_the_right_copy() {
        let mut cells = CopiedCells::default();
        let a = cells.create(0_i64);

        cells.write(a, 1, 1);
        for round in 0..5 {
            cells.write(a, 100 + round, 2);
            cells.synchronise(1);
            assert_eq!(1, *cells.read(a));
        }

        // Writes made in world 1 after returning to it are kept until world 1 is popped.
        cells.write(a, 5, 1);
        cells.write(a, 6, 2);
        cells.synchronise(1);
        assert_eq!(5, *cells.read(a));

        cells.synchronise(0);
        assert_eq!(0, *cells.read(a));
    }

    #[test]
    fn cells_created_after_a_copy_survive_restoration() {
        let mut cells = CopiedCells::default();
        let a = cells.create(0_i64);
        cells.write(a, 1, 1);
        let b = cells.create(7_i64);

        cells.synchronise(0);

        assert_eq!(0, *cells.read(a));
        assert_eq!(7, *cells.read(b));
    }
}
