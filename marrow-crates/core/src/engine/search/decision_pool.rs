use crate::engine::predicates::Predicate;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

/// Which branch of a [`Decision`] is currently applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Branch {
    NotApplied,
    /// The decision predicate holds.
    Positive,
    /// The negation of the decision predicate holds.
    Negative,
}

/// A choice point of the search.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Decision {
    pub(crate) predicate: Predicate,
    /// The world in which the decision was taken; its branches live one world deeper.
    pub(crate) world: usize,
    pub(crate) branch: Branch,
    pub(crate) previous: Option<DecisionHandle>,
}

/// A reference to a [`Decision`] in a [`DecisionPool`].
///
/// Handles carry the generation of the slot they point to, so using a handle after its decision
/// was released is detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DecisionHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Entry {
    decision: Decision,
    generation: u32,
    live: bool,
}

/// The arena holding the open decisions of the search, with a free list for reuse of slots.
#[derive(Debug, Default)]
pub(crate) struct DecisionPool {
    entries: Vec<Entry>,
    free: Vec<u32>,
    num_live: usize,
}

impl DecisionPool {
    pub(crate) fn allocate(&mut self, decision: Decision) -> DecisionHandle {
        self.num_live += 1;

        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            marrow_assert_moderate!(!entry.live);
            entry.decision = decision;
            entry.live = true;
            return DecisionHandle {
                index,
                generation: entry.generation,
            };
        }

        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            decision,
            generation: 0,
            live: true,
        });
        DecisionHandle {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, handle: DecisionHandle) -> &Decision {
        &self.entry(handle).decision
    }

    pub(crate) fn get_mut(&mut self, handle: DecisionHandle) -> &mut Decision {
        let index = self.checked_index(handle);
        &mut self.entries[index].decision
    }

    /// Returns the slot to the free list; the handle and its copies become stale.
    pub(crate) fn release(&mut self, handle: DecisionHandle) {
        let index = self.checked_index(handle);
        let entry = &mut self.entries[index];
        entry.live = false;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.num_live -= 1;
    }

    /// Releases every decision at once.
    pub(crate) fn clear(&mut self) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.live {
                entry.live = false;
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.num_live = 0;
    }

    pub(crate) fn num_live(&self) -> usize {
        self.num_live
    }

    fn entry(&self, handle: DecisionHandle) -> &Entry {
        &self.entries[self.checked_index(handle)]
    }

    fn checked_index(&self, handle: DecisionHandle) -> usize {
        let index = handle.index as usize;
        let entry = &self.entries[index];
        marrow_assert_simple!(
            entry.live && entry.generation == handle.generation,
            "stale decision handle {handle:?}, the slot is at generation {}",
            entry.generation
        );
        index
    }
}
