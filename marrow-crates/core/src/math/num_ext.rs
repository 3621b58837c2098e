//! Rounding divisions which are not yet stable for signed integers in the standard library.

pub(crate) trait NumExt {
    /// Division rounding towards positive infinity.
    fn div_ceil(self, other: Self) -> Self;

    /// Division rounding towards negative infinity, which differs from truncation for
    /// negative quotients.
    fn div_floor(self, other: Self) -> Self;
}

macro_rules! impl_num_ext {
    ($($int:ty),+) => {
        $(
            impl NumExt for $int {
                fn div_ceil(self, other: Self) -> Self {
                    let quotient = self / other;
                    let remainder = self % other;
                    if (remainder > 0 && other > 0) || (remainder < 0 && other < 0) {
                        quotient + 1
                    } else {
                        quotient
                    }
                }

                fn div_floor(self, other: Self) -> Self {
                    let quotient = self / other;
                    let remainder = self % other;
                    if (remainder > 0 && other < 0) || (remainder < 0 && other > 0) {
                        quotient - 1
                    } else {
                        quotient
                    }
                }
            }
        )+
    };
}

impl_num_ext!(i32, i64);

#[cfg(test)]
mod tests {
    use super::NumExt;

    #[test]
    fn rounding_follows_the_sign_of_the_quotient() {
        assert_eq!(2, <i32 as NumExt>::div_ceil(3, 2));
        assert_eq!(-1, <i32 as NumExt>::div_ceil(-3, 2));
        assert_eq!(1, <i32 as NumExt>::div_floor(3, 2));
        assert_eq!(-2, <i32 as NumExt>::div_floor(-3, 2));
        assert_eq!(-2, <i64 as NumExt>::div_floor(3, -2));
        assert_eq!(2, <i64 as NumExt>::div_ceil(-3, -2));
    }
}
