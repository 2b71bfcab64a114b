//! Decimal printing for the fixed-width integers reef code can hold.
//!
//! Every width and signedness goes through [`write_decimal`]; the per-type
//! pieces are the sign split and the digit split, both generated below.

use std::io;

use crate::sink::ByteSink;

mod sealed {
    pub trait Sealed {}
}

/// Unsigned value that decimal digits are peeled off of.
pub trait Magnitude: Copy + sealed::Sealed {
    /// Splits off the least significant decimal digit. The remaining prefix is
    /// `None` once the value is a single digit.
    fn split_last_digit(self) -> (Option<Self>, u8);
}

/// Integer type the runtime can print.
pub trait RuntimeInt: Copy + sealed::Sealed {
    type Magnitude: Magnitude;

    /// Returns whether the value is negative along with its absolute value.
    /// Must be exact for the most negative value of the type.
    fn into_sign_and_magnitude(self) -> (bool, Self::Magnitude);
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl Magnitude for $ty {
            #[inline]
            fn split_last_digit(self) -> (Option<Self>, u8) {
                let digit = (self % 10) as u8;
                let prefix = if self > 9 { Some(self / 10) } else { None };
                (prefix, digit)
            }
        }

        impl RuntimeInt for $ty {
            type Magnitude = $ty;

            #[inline]
            fn into_sign_and_magnitude(self) -> (bool, $ty) {
                (false, self)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($ty:ty => $unsigned:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl RuntimeInt for $ty {
            type Magnitude = $unsigned;

            #[inline]
            fn into_sign_and_magnitude(self) -> (bool, $unsigned) {
                if self < 0 {
                    // negating `self` directly overflows on MIN; `self + 1` can't
                    (true, ((-(self + 1)) as $unsigned) + 1)
                } else {
                    (false, self as $unsigned)
                }
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64);
impl_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64);

/// Writes `num` in base 10, most significant digit first, with a leading `-`
/// for negative values and no leading zeros.
pub fn write_decimal<I, S>(num: I, sink: &mut S) -> io::Result<()>
where
    I: RuntimeInt,
    S: ByteSink + ?Sized,
{
    let (negative, magnitude) = num.into_sign_and_magnitude();
    if negative {
        sink.put(b'-')?;
    }
    write_digits(magnitude, sink)
}

fn write_digits<M, S>(value: M, sink: &mut S) -> io::Result<()>
where
    M: Magnitude,
    S: ByteSink + ?Sized,
{
    let (prefix, digit) = value.split_last_digit();
    if let Some(prefix) = prefix {
        write_digits(prefix, sink)?;
    }
    sink.put(b'0' + digit)
}
