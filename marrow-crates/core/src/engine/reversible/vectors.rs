use crate::basic_types::Trail;

#[derive(Clone, Copy, Debug)]
enum VectorChange {
    Push { vector: usize },
    Set { vector: usize, index: usize, old: i64 },
}

/// Growable reversible vectors; every mutation is trailed regardless of the cell discipline.
#[derive(Debug, Default)]
pub(crate) struct ReversibleVectors {
    vectors: Vec<Vec<i64>>,
    trail: Trail<VectorChange>,
}

impl ReversibleVectors {
    pub(crate) fn create(&mut self) -> usize {
        self.vectors.push(Vec::new());
        self.vectors.len() - 1
    }

    pub(crate) fn get(&self, vector: usize) -> &[i64] {
        &self.vectors[vector]
    }

    pub(crate) fn push(&mut self, vector: usize, value: i64, world: usize) {
        self.vectors[vector].push(value);
        if world > 0 {
            self.trail.push(VectorChange::Push { vector });
        }
    }

    pub(crate) fn set(&mut self, vector: usize, index: usize, value: i64, world: usize) {
        let old = std::mem::replace(&mut self.vectors[vector][index], value);
        if world > 0 {
            self.trail.push(VectorChange::Set { vector, index, old });
        }
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn synchronise(&mut self, world: usize) {
        for change in self.trail.synchronise(world) {
            match change {
                VectorChange::Push { vector } => {
                    let _ = self.vectors[vector].pop();
                }
                VectorChange::Set { vector, index, old } => self.vectors[vector][index] = old,
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.vectors.len()
    }

    pub(crate) fn num_records(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn all(&self) -> &[Vec<i64>] {
        &self.vectors
    }

    pub(crate) fn replace_all(&mut self, vectors: Vec<Vec<i64>>) {
        self.vectors = vectors;
    }
}
