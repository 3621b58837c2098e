use crate::containers::StorageKey;

/// Identifies a variable within a single propagator, usually its index in the propagator's
/// array of variables.
///
/// Propagators nested in another one (e.g. both sides of a reification) register their
/// variables through an offset, so their ids never collide with those of the outer propagator.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> Self {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }

    /// The id `offset` places further along.
    pub fn shifted_by(self, offset: u32) -> LocalId {
        LocalId(self.0 + offset)
    }

    /// The id of a nested propagator that was registered with `offset`, if this id belongs to
    /// it.
    pub fn unshifted_by(self, offset: u32) -> Option<LocalId> {
        self.0.checked_sub(offset).map(LocalId)
    }

    /// The smallest id which is larger than this one.
    pub fn next(self) -> LocalId {
        self.shifted_by(1)
    }
}

impl StorageKey for LocalId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        LocalId(index as u32)
    }
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifting_round_trips() {
        let id = LocalId::from(3).shifted_by(4);
        assert_eq!(LocalId::from(7), id);
        assert_eq!(Some(LocalId::from(3)), id.unshifted_by(4));
    }

    #[test]
    fn ids_below_the_offset_are_not_nested() {
        assert_eq!(None, LocalId::from(2).unshifted_by(5));
    }
}
