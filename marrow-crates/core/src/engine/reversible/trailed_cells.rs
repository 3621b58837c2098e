use std::fmt::Debug;

use super::cells::ReversibleCells;
use crate::basic_types::Trail;

#[derive(Clone, Debug)]
struct TrailedChange<T> {
    index: usize,
    old_value: T,
    old_stamp: usize,
}

/// Reversible cells which log the old value on the first write to a cell in each world.
///
/// A write costs O(1) and undoing a world costs time proportional to the number of cells that
/// were written in it.
#[derive(Debug)]
pub(crate) struct TrailedCells<T> {
    values: Vec<T>,
    /// The world in which each cell was last recorded on the trail.
    stamps: Vec<usize>,
    trail: Trail<TrailedChange<T>>,
    total_records: u64,
}

impl<T> Default for TrailedCells<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            stamps: Vec::new(),
            trail: Trail::default(),
            total_records: 0,
        }
    }
}

impl<T: Clone + Debug> ReversibleCells<T> for TrailedCells<T> {
    fn create(&mut self, value: T) -> usize {
        self.values.push(value);
        // A stamp of zero makes the first write in any later world save the initial value.
        self.stamps.push(0);
        self.values.len() - 1
    }

    fn read(&self, index: usize) -> &T {
        &self.values[index]
    }

    fn write(&mut self, index: usize, value: T, world: usize) {
        let old_value = std::mem::replace(&mut self.values[index], value);

        if self.stamps[index] < world {
            self.trail.push(TrailedChange {
                index,
                old_value,
                old_stamp: self.stamps[index],
            });
            self.stamps[index] = world;
            self.total_records += 1;
        }
    }

    fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    fn synchronise(&mut self, world: usize) {
        for change in self.trail.synchronise(world) {
            self.values[change.index] = change.old_value;
            self.stamps[change.index] = change.old_stamp;
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn num_records(&self) -> usize {
        self.trail.len()
    }

    fn total_records(&self) -> u64 {
        self.total_records
    }

    fn deepest_recorded_world(&self) -> usize {
        self.trail.num_delimiters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_write_per_world_is_recorded() {
        let mut cells = TrailedCells::default();
        let cell = cells.create(0_i64);

        cells.new_checkpoint();
        cells.write(cell, 1, 1);
        cells.write(cell, 2, 1);
        cells.write(cell, 3, 1);

        assert_eq!(1, cells.num_records());
        cells.synchronise(0);
        assert_eq!(0, *cells.read(cell));
    }

    #[test]
    fn root_writes_are_not_recorded() {
        let mut cells = TrailedCells::default();
        let cell = cells.create(true);
        cells.write(cell, false, 0);

        assert_eq!(0, cells.num_records());
        assert!(!*cells.read(cell));
    }

    #[test]
    fn revisiting_a_world_records_again() {
        let mut cells = TrailedCells::default();
        let cell = cells.create(5_i64);

        cells.new_checkpoint();
        cells.write(cell, 6, 1);
        cells.synchronise(0);

        cells.new_checkpoint();
        cells.write(cell, 7, 1);
        cells.synchronise(0);

        assert_eq!(5, *cells.read(cell));
    }
}
