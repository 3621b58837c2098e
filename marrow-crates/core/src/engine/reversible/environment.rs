use std::any::Any;
use std::sync::Arc;

use log::trace;

use super::cells::ReversibleCells;
use super::handles::ReversibleBool;
use super::handles::ReversibleDouble;
use super::handles::ReversibleInt;
use super::handles::ReversibleLong;
use super::handles::ReversibleObject;
use super::handles::ReversibleVec;
use super::snapshot::EnvironmentSnapshot;
use super::snapshot::SnapshotError;
use super::vectors::ReversibleVectors;
use super::CopiedCells;
use super::TrailedCells;
use crate::create_statistics_struct;
use crate::marrow_assert_simple;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

type ObjectValue = Arc<dyn Any + Send + Sync>;

/// How a reversible cell array records the information needed to undo writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreDiscipline {
    /// Log the old value on the first write to a cell in a world. Cheap when few cells change
    /// per node.
    #[default]
    Trailing,
    /// Copy the whole array on the first write in a world. Cheap to restore when most cells
    /// change per node.
    Copying,
}

fn new_cells<T: Clone + std::fmt::Debug + 'static>(
    discipline: StoreDiscipline,
) -> Box<dyn ReversibleCells<T>> {
    match discipline {
        StoreDiscipline::Trailing => Box::new(TrailedCells::default()),
        StoreDiscipline::Copying => Box::new(CopiedCells::default()),
    }
}

create_statistics_struct!(
    /// Bookkeeping counters of an [`Environment`].
    pub EnvironmentStatistics {
        /// Undo records (trail entries or array copies) taken.
        undo_records: u64,
        pushes: u64,
        pops: u64,
    }
);

/// The reversible store.
///
/// It owns every reversible cell and a world counter. [`Environment::push`] opens a new world
/// and [`Environment::pop`] restores every cell to its value at the end of the previous one.
/// Everything outside the store refers to cells through `Copy` handles.
///
/// # Example
/// ```rust
/// # use marrow_core::reversible::Environment;
/// let mut environment = Environment::default();
/// let counter = environment.new_int(0);
///
/// environment.push();
/// environment.write(counter, 5);
/// assert_eq!(5, environment.read(counter));
///
/// environment.pop();
/// assert_eq!(0, environment.read(counter));
/// ```
#[derive(Debug)]
pub struct Environment {
    world: usize,
    discipline: StoreDiscipline,
    integers: Box<dyn ReversibleCells<i64>>,
    booleans: Box<dyn ReversibleCells<bool>>,
    doubles: Box<dyn ReversibleCells<f64>>,
    objects: Box<dyn ReversibleCells<ObjectValue>>,
    vectors: ReversibleVectors,
    statistics: EnvironmentStatistics,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(StoreDiscipline::default())
    }
}

impl Environment {
    pub fn new(discipline: StoreDiscipline) -> Self {
        Self {
            world: 0,
            discipline,
            integers: new_cells(discipline),
            booleans: new_cells(discipline),
            doubles: new_cells(discipline),
            objects: new_cells(discipline),
            vectors: ReversibleVectors::default(),
            statistics: EnvironmentStatistics::default(),
        }
    }

    pub fn discipline(&self) -> StoreDiscipline {
        self.discipline
    }

    /// The current world; 0 is the root.
    pub fn world_index(&self) -> usize {
        self.world
    }

    pub fn push(&mut self) {
        self.world += 1;
        self.statistics.pushes += 1;

        self.integers.new_checkpoint();
        self.booleans.new_checkpoint();
        self.doubles.new_checkpoint();
        self.objects.new_checkpoint();
        self.vectors.new_checkpoint();
    }

    /// Restores every cell to its value at the end of the previous world.
    ///
    /// Panics when called at the root world.
    pub fn pop(&mut self) {
        marrow_assert_simple!(self.world > 0, "the root world cannot be popped");
        self.pop_to(self.world - 1);
    }

    /// Pops worlds until `world` is the current world.
    pub fn pop_to(&mut self, world: usize) {
        marrow_assert_simple!(
            world < self.world,
            "cannot pop from world {} to world {world}",
            self.world
        );
        trace!("popping from world {} to world {world}", self.world);

        self.statistics.pops += (self.world - world) as u64;
        self.world = world;

        self.integers.synchronise(world);
        self.booleans.synchronise(world);
        self.doubles.synchronise(world);
        self.objects.synchronise(world);
        self.vectors.synchronise(world);
    }

    pub fn new_int(&mut self, value: i32) -> ReversibleInt {
        ReversibleInt::new(self.integers.create(value as i64))
    }

    pub fn new_long(&mut self, value: i64) -> ReversibleLong {
        ReversibleLong::new(self.integers.create(value))
    }

    pub fn new_bool(&mut self, value: bool) -> ReversibleBool {
        ReversibleBool::new(self.booleans.create(value))
    }

    pub fn new_double(&mut self, value: f64) -> ReversibleDouble {
        ReversibleDouble::new(self.doubles.create(value))
    }

    pub fn new_object<T: Any + Send + Sync>(&mut self, value: T) -> ReversibleObject<T> {
        ReversibleObject::new(self.objects.create(Arc::new(value)))
    }

    pub fn new_vector(&mut self) -> ReversibleVec {
        ReversibleVec::new(self.vectors.create())
    }

    pub fn read<Cell: ReversibleCell>(&self, cell: Cell) -> Cell::Value {
        cell.read_from(self)
    }

    /// Writes a value; writing the current value records nothing.
    pub fn write<Cell: ReversibleCell>(&mut self, cell: Cell, value: Cell::Value) {
        cell.write_to(self, value)
    }

    fn write_integer(&mut self, index: usize, value: i64) {
        if *self.integers.read(index) != value {
            self.integers.write(index, value, self.world);
        }
    }

    pub fn add(&mut self, cell: ReversibleLong, delta: i64) {
        let value = self.read(cell);
        self.write(cell, value + delta)
    }

    pub fn read_object<T: Any + Send + Sync>(&self, cell: ReversibleObject<T>) -> &T {
        self.objects
            .read(cell.index())
            .downcast_ref::<T>()
            .expect("object handles are typed by the value they were created with")
    }

    pub fn write_object<T: Any + Send + Sync>(&mut self, cell: ReversibleObject<T>, value: T) {
        self.objects
            .write(cell.index(), Arc::new(value), self.world);
    }

    pub fn vector(&self, vector: ReversibleVec) -> &[i64] {
        self.vectors.get(vector.index())
    }

    pub fn vector_push(&mut self, vector: ReversibleVec, value: i64) {
        self.vectors.push(vector.index(), value, self.world);
    }

    pub fn vector_set(&mut self, vector: ReversibleVec, index: usize, value: i64) {
        if self.vectors.get(vector.index())[index] != value {
            self.vectors.set(vector.index(), index, value, self.world);
        }
    }

    /// The number of undo records currently held by all cell arrays.
    pub fn num_undo_records(&self) -> usize {
        self.integers.num_records()
            + self.booleans.num_records()
            + self.doubles.num_records()
            + self.objects.num_records()
            + self.vectors.num_records()
    }

    /// The deepest world for which any undo information is held. After a pop this never
    /// exceeds [`Environment::world_index`].
    pub fn deepest_recorded_world(&self) -> usize {
        [
            self.integers.deepest_recorded_world(),
            self.booleans.deepest_recorded_world(),
            self.doubles.deepest_recorded_world(),
            self.objects.deepest_recorded_world(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn statistics(&self) -> EnvironmentStatistics {
        EnvironmentStatistics {
            undo_records: self.integers.total_records()
                + self.booleans.total_records()
                + self.doubles.total_records()
                + self.objects.total_records(),
            ..self.statistics
        }
    }

    pub fn log_statistics(&self, logger: StatisticLogger) {
        self.statistics().log(logger);
    }

    /// Captures the values of every primitive cell and vector.
    ///
    /// Object cells cannot be captured, since their values are not serialisable in general.
    pub fn snapshot(&self) -> Result<EnvironmentSnapshot, SnapshotError> {
        let count = self.objects.len();
        if count != 0 {
            return Err(SnapshotError::UnsupportedObjectCells { count });
        }

        Ok(EnvironmentSnapshot {
            world: self.world,
            integers: self.integers.values().to_vec(),
            booleans: self.booleans.values().to_vec(),
            doubles: self.doubles.values().to_vec(),
            vectors: self.vectors.all().to_vec(),
        })
    }

    /// Makes the values of `snapshot` the root state of this environment.
    ///
    /// The environment is first popped back to the root. The snapshot has to come from an
    /// environment with the same cells, i.e. one built by the same model.
    pub fn restore(&mut self, snapshot: &EnvironmentSnapshot) -> Result<(), SnapshotError> {
        let count = self.objects.len();
        if count != 0 {
            return Err(SnapshotError::UnsupportedObjectCells { count });
        }
        check_shape("integer cells", self.integers.len(), snapshot.integers.len())?;
        check_shape("boolean cells", self.booleans.len(), snapshot.booleans.len())?;
        check_shape("double cells", self.doubles.len(), snapshot.doubles.len())?;
        check_shape("vectors", self.vectors.len(), snapshot.vectors.len())?;

        if self.world > 0 {
            self.pop_to(0);
        }

        for (index, value) in snapshot.integers.iter().enumerate() {
            self.integers.write(index, *value, 0);
        }
        for (index, value) in snapshot.booleans.iter().enumerate() {
            self.booleans.write(index, *value, 0);
        }
        for (index, value) in snapshot.doubles.iter().enumerate() {
            self.doubles.write(index, *value, 0);
        }
        self.vectors.replace_all(snapshot.vectors.clone());

        Ok(())
    }
}

fn check_shape(what: &'static str, expected: usize, found: usize) -> Result<(), SnapshotError> {
    if expected == found {
        Ok(())
    } else {
        Err(SnapshotError::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}

/// A handle to a primitive reversible cell.
pub trait ReversibleCell: Copy {
    type Value;

    fn read_from(self, environment: &Environment) -> Self::Value;

    fn write_to(self, environment: &mut Environment, value: Self::Value);
}

impl ReversibleCell for ReversibleInt {
    type Value = i32;

    fn read_from(self, environment: &Environment) -> i32 {
        *environment.integers.read(self.index()) as i32
    }

    fn write_to(self, environment: &mut Environment, value: i32) {
        environment.write_integer(self.index(), value as i64);
    }
}

impl ReversibleCell for ReversibleLong {
    type Value = i64;

    fn read_from(self, environment: &Environment) -> i64 {
        *environment.integers.read(self.index())
    }

    fn write_to(self, environment: &mut Environment, value: i64) {
        environment.write_integer(self.index(), value);
    }
}

impl ReversibleCell for ReversibleBool {
    type Value = bool;

    fn read_from(self, environment: &Environment) -> bool {
        *environment.booleans.read(self.index())
    }

    fn write_to(self, environment: &mut Environment, value: bool) {
        if *environment.booleans.read(self.index()) != value {
            environment
                .booleans
                .write(self.index(), value, environment.world);
        }
    }
}

impl ReversibleCell for ReversibleDouble {
    type Value = f64;

    fn read_from(self, environment: &Environment) -> f64 {
        *environment.doubles.read(self.index())
    }

    fn write_to(self, environment: &mut Environment, value: f64) {
        if *environment.doubles.read(self.index()) != value {
            environment
                .doubles
                .write(self.index(), value, environment.world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both_disciplines() -> [Environment; 2] {
        [
            Environment::new(StoreDiscipline::Trailing),
            Environment::new(StoreDiscipline::Copying),
        ]
    }

    #[test]
    fn nested_pushes_and_pops_round_trip() {
        for mut environment in both_disciplines() {
            let int = environment.new_int(1);
            let long = environment.new_long(-4);
            let boolean = environment.new_bool(false);
            let double = environment.new_double(0.5);

            for depth in 1..=6 {
                environment.push();
                environment.write(int, depth);
                environment.add(long, depth as i64);
                environment.write(boolean, depth % 2 == 0);
                environment.write(double, depth as f64);
            }
            for _ in 0..6 {
                environment.pop();
            }

            assert_eq!(0, environment.world_index());
            assert_eq!(1, environment.read(int));
            assert_eq!(-4, environment.read(long));
            assert!(!environment.read(boolean));
            assert_eq!(0.5, environment.read(double));
            assert_eq!(0, environment.num_undo_records());
        }
    }

    #[test]
    fn popping_restores_the_end_of_the_previous_world() {
        for mut environment in both_disciplines() {
            let cell = environment.new_int(0);

            environment.push();
            environment.write(cell, 1);
            environment.push();
            environment.write(cell, 2);
            environment.pop();
            assert_eq!(1, environment.read(cell));

            environment.write(cell, 3);
            environment.push();
            environment.write(cell, 4);
            environment.pop_to(0);
            assert_eq!(0, environment.read(cell));
        }
    }

    #[test]
    fn writing_the_same_value_records_nothing() {
        let mut environment = Environment::default();
        let cell = environment.new_int(3);

        environment.push();
        environment.write(cell, 3);

        assert_eq!(0, environment.num_undo_records());
    }

    #[test]
    #[should_panic(expected = "the root world cannot be popped")]
    fn popping_the_root_panics() {
        let mut environment = Environment::default();
        environment.pop();
    }

    #[test]
    fn object_cells_are_reversible() {
        for mut environment in both_disciplines() {
            let names = environment.new_object(vec!["a".to_owned()]);

            environment.push();
            environment.write_object(names, vec!["a".to_owned(), "b".to_owned()]);
            assert_eq!(2, environment.read_object(names).len());

            environment.pop();
            assert_eq!(&vec!["a".to_owned()], environment.read_object(names));
        }
    }

    #[test]
    fn vectors_undo_pushes_and_sets() {
        let mut environment = Environment::default();
        let vector = environment.new_vector();
        environment.vector_push(vector, 1);

        environment.push();
        environment.vector_push(vector, 2);
        environment.vector_set(vector, 0, 9);
        assert_eq!(&[9, 2], environment.vector(vector));

        environment.pop();
        assert_eq!(&[1], environment.vector(vector));
    }

    #[test]
    fn no_undo_information_survives_above_the_current_world() {
        for mut environment in both_disciplines() {
            let cell = environment.new_int(0);
            environment.push();
            environment.write(cell, 1);
            environment.push();
            environment.write(cell, 2);
            environment.push();
            environment.write(cell, 3);

            environment.pop_to(1);

            assert_eq!(1, environment.world_index());
            assert!(environment.deepest_recorded_world() <= 1);
        }
    }

    #[test]
    fn snapshots_refuse_object_cells() {
        let mut environment = Environment::default();
        let _ = environment.new_object(5_u8);

        assert!(matches!(
            environment.snapshot(),
            Err(SnapshotError::UnsupportedObjectCells { count: 1 })
        ));
    }

    #[test]
    fn restoring_a_snapshot_sets_the_root_values() {
        let mut environment = Environment::default();
        let cell = environment.new_int(0);

        environment.push();
        environment.write(cell, 8);
        let snapshot = environment.snapshot().expect("no object cells");
        environment.write(cell, 9);

        environment.restore(&snapshot).expect("same shape");

        assert_eq!(0, environment.world_index());
        assert_eq!(8, environment.read(cell));
    }

    #[test]
    fn restoring_a_snapshot_of_another_model_fails() {
        let mut small = Environment::default();
        let _ = small.new_int(0);
        let snapshot = small.snapshot().expect("no object cells");

        let mut large = Environment::default();
        let _ = large.new_int(0);
        let _ = large.new_int(1);

        assert!(matches!(
            large.restore(&snapshot),
            Err(SnapshotError::ShapeMismatch { .. })
        ));
    }
}
