//! Assertion macros with configurable strength.
//!
//! The simple level is always active. The `debug-checks` feature raises the level to
//! [`MARROW_ASSERT_EXTREME`], which enables the expensive consistency checks of the engine.

pub const MARROW_ASSERT_LEVEL_DEFINITION: u8 = if cfg!(feature = "debug-checks") {
    MARROW_ASSERT_EXTREME
} else {
    MARROW_ASSERT_SIMPLE
};

pub const MARROW_ASSERT_SIMPLE: u8 = 1;
pub const MARROW_ASSERT_MODERATE: u8 = 2;
pub const MARROW_ASSERT_ADVANCED: u8 = 3;
pub const MARROW_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_ne_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_SIMPLE {
            assert_ne!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! marrow_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MARROW_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
