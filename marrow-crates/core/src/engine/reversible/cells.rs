use std::fmt::Debug;

/// An array of reversible values that can be restored to the state it had at the end of any
/// earlier world.
///
/// Two disciplines implement it: [`TrailedCells`](super::TrailedCells) and
/// [`CopiedCells`](super::CopiedCells). The [`Environment`](super::Environment) only talks to
/// this trait, so the discipline can be chosen per environment without affecting call sites.
pub(crate) trait ReversibleCells<T>: Debug {
    /// Appends a cell and returns its index.
    fn create(&mut self, value: T) -> usize;

    fn read(&self, index: usize) -> &T;

    /// Overwrites the cell, recording what is needed to undo the write when `world` is popped.
    fn write(&mut self, index: usize, value: T, world: usize);

    /// Called whenever a new world is pushed.
    fn new_checkpoint(&mut self);

    /// Restores every cell to its value at the end of `world`.
    fn synchronise(&mut self, world: usize);

    fn len(&self) -> usize;

    fn values(&self) -> &[T];

    /// The number of undo records (trail entries or saved copies) currently held.
    fn num_records(&self) -> usize;

    /// The number of undo records taken over the lifetime of the array.
    fn total_records(&self) -> u64;

    /// The deepest world for which undo information is held.
    fn deepest_recorded_world(&self) -> usize;
}
