use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::marrow_assert_simple;

/// An append-only log partitioned into checkpoints.
///
/// Entries pushed after the `i`-th call to [`Trail::new_checkpoint`] belong to checkpoint `i`.
/// [`Trail::synchronise`] hands back every entry above a checkpoint, newest first, so that the
/// caller can undo them.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// Entry `i` is the trail length at the moment checkpoint `i + 1` was opened.
    delimiters: Vec<usize>,
    entries: Vec<T>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: 0,
            delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.delimiters.push(self.entries.len());
    }

    /// The number of open checkpoints that still have bookkeeping on the trail.
    pub(crate) fn num_delimiters(&self) -> usize {
        self.delimiters.len()
    }

    /// Go back to `checkpoint`, returning the removed entries in reverse insertion order.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        marrow_assert_simple!(
            checkpoint < self.current_checkpoint,
            "cannot synchronise trail at checkpoint {} to checkpoint {checkpoint}",
            self.current_checkpoint
        );

        let new_len = self.delimiters[checkpoint];
        self.current_checkpoint = checkpoint;
        self.delimiters.truncate(checkpoint);
        self.entries.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_visible_through_the_slice() {
        let mut trail = Trail::default();
        for value in [1, 2, 3] {
            trail.push(value);
        }

        assert_eq!(&[1, 2, 3], trail.deref());
    }

    #[test]
    fn synchronising_drops_entries_above_the_checkpoint() {
        let mut trail = Trail::default();
        trail.push(1);
        trail.new_checkpoint();
        trail.push(2);
        trail.push(3);

        let undone = trail.synchronise(0).collect::<Vec<_>>();

        assert_eq!(vec![3, 2], undone);
        assert_eq!(&[1], trail.deref());
        assert_eq!(0, trail.num_delimiters());
    }

    #[test]
    fn synchronising_can_skip_several_checkpoints() {
        let mut trail = Trail::default();
        trail.new_checkpoint();
        trail.push(1);
        trail.new_checkpoint();
        trail.push(2);
        trail.new_checkpoint();
        trail.push(3);

        let undone = trail.synchronise(1).collect::<Vec<_>>();

        assert_eq!(vec![3, 2], undone);
        assert_eq!(1, trail.num_delimiters());
        assert_eq!(&[1], trail.deref());
    }

    #[test]
    #[should_panic]
    fn synchronising_to_the_current_checkpoint_panics() {
        let mut trail: Trail<u32> = Trail::default();
        trail.new_checkpoint();
        let _ = trail.synchronise(1);
    }
}
