use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// A vector which is indexed by a typed key instead of a `usize`.
///
/// Keys are handed out by [`KeyedVec::push`] and are only meaningful for the vector that
/// produced them.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a value and returns the key under which it is stored.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);
        Key::create_from_index(self.elements.len() - 1)
    }

    pub fn get(&self, key: Key) -> Option<&Value> {
        self.elements.get(key.index())
    }

    /// Reserve the next key before the value exists, so the value can be constructed knowing
    /// its own key.
    pub fn new_slot(&mut self) -> Slot<'_, Key, Value> {
        Slot { vec: self }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &'_ mut Value> {
        self.elements.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
    }
}

impl<Key: StorageKey, Value: Clone> KeyedVec<Key, Value> {
    /// Grow the vector so that `key` is a valid index, filling new entries with `default_value`.
    pub(crate) fn accomodate(&mut self, key: Key, default_value: Value) {
        if key.index() >= self.elements.len() {
            self.elements.resize(key.index() + 1, default_value);
        }
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

/// A type which can be converted to and from a dense index.
pub trait StorageKey: Clone + Copy {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

/// A reserved, not yet populated, entry of a [`KeyedVec`].
#[derive(Debug)]
pub struct Slot<'a, Key, Value> {
    vec: &'a mut KeyedVec<Key, Value>,
}

impl<Key: StorageKey, Value> Slot<'_, Key, Value> {
    pub fn key(&self) -> Key {
        Key::create_from_index(self.vec.len())
    }

    pub fn populate(self, value: Value) -> Key {
        self.vec.push(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Id(usize);

    impl StorageKey for Id {
        fn index(&self) -> usize {
            self.0
        }

        fn create_from_index(index: usize) -> Self {
            Id(index)
        }
    }

    #[test]
    fn slot_key_matches_populated_key() {
        let mut vec: KeyedVec<Id, &str> = KeyedVec::default();
        let _ = vec.push("first");

        let slot = vec.new_slot();
        let reserved = slot.key();
        let populated = slot.populate("second");

        assert_eq!(reserved, populated);
        assert_eq!(vec[Id(1)], "second");
    }

    #[test]
    fn accomodate_only_grows() {
        let mut vec: KeyedVec<Id, u8> = KeyedVec::default();
        vec.accomodate(Id(3), 7);
        assert_eq!(vec.len(), 4);

        vec[Id(0)] = 1;
        vec.accomodate(Id(1), 9);
        assert_eq!(vec.len(), 4);
        assert_eq!(vec[Id(0)], 1);
    }
}
