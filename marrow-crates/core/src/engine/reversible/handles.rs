use std::fmt::Debug;
use std::fmt::Formatter;
use std::marker::PhantomData;

macro_rules! cell_handle {
    ($(#[$documentation:meta])* $name:ident) => {
        $(#[$documentation])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            pub(crate) index: u32,
        }

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self {
                    index: index as u32,
                }
            }

            pub(crate) fn index(self) -> usize {
                self.index as usize
            }
        }
    };
}

cell_handle!(
    /// Handle to a reversible `i32`.
    ReversibleInt
);
cell_handle!(
    /// Handle to a reversible `i64`.
    ReversibleLong
);
cell_handle!(
    /// Handle to a reversible `bool`.
    ReversibleBool
);
cell_handle!(
    /// Handle to a reversible `f64`.
    ReversibleDouble
);
cell_handle!(
    /// Handle to a reversible vector of `i64`; pushes and element writes are undone on
    /// backtracking.
    ReversibleVec
);

/// Handle to a reversible value of an arbitrary type `T`.
pub struct ReversibleObject<T> {
    pub(crate) index: u32,
    value_type: PhantomData<fn() -> T>,
}

impl<T> ReversibleObject<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index: index as u32,
            value_type: PhantomData,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for ReversibleObject<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReversibleObject<T> {}

impl<T> Debug for ReversibleObject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReversibleObject")
            .field("index", &self.index)
            .finish()
    }
}
