//! Numbers and numerics.

#![allow(clippy::excessive_precision)]

use bytemuck::Pod;
use num_traits as nt;
use std::fmt;

/// Gathers what an element of a [`Container`](crate::Container) must support.
///
/// Implemented for the signed and unsigned integer types up to 64 bits and
/// for `f32` and `f64`.
pub trait Scalar:
    Copy
    + Default
    + fmt::Debug
    + fmt::Display
    + PartialOrd
    + nt::Num
    + nt::NumCast
    + Pod
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    /// Tolerance used by [`equals`](Scalar::equals). Machine epsilon for
    /// floating point types and zero for integers, so integer comparison is
    /// exact.
    const EPSILON: Self;

    /// Returns the absolute value. The identity for unsigned types.
    fn abs_value(self) -> Self;

    /// Returns the absolute difference between this and the other value.
    #[inline]
    fn distance_to(self, other: Self) -> Self {
        if self > other {
            self - other
        } else {
            other - self
        }
    }

    /// Whether the two values differ by at most `epsilon`.
    #[inline]
    fn nearly_equal(self, other: Self, epsilon: Self) -> bool {
        self.distance_to(other) <= epsilon
    }

    /// Whether the two values differ by at most [`Scalar::EPSILON`].
    #[inline]
    fn equals(self, other: Self) -> bool {
        self.nearly_equal(other, Self::EPSILON)
    }

    /// Returns the smaller of the two values.
    #[inline]
    fn min_with(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// Returns the larger of the two values.
    #[inline]
    fn max_with(self, other: Self) -> Self {
        if other > self { other } else { self }
    }
}

/// Marker for integer scalars, which are the only ones supporting remainder
/// operations on containers.
pub trait Integer: Scalar + Eq + Ord {}

/// Gathers traits useful for working with generic floating point types.
pub trait Float:
    Scalar + nt::Float + nt::FromPrimitive + approx::AbsDiffEq<Epsilon = Self> + approx::RelativeEq
{
    const NEG_ONE: Self;
    const TWO: Self;
    const ONE_HALF: Self;
    const ONE_FOURTH: Self;
    const PI: Self;
    const TWO_PI: Self;
    const FRAC_PI_2: Self;
    const FRAC_PI_3: Self;
    const FRAC_PI_4: Self;
    const THREE_FRAC_PI_2: Self;
    const DEGREES_TO_RADIANS: Self;
    const RADIANS_TO_DEGREES: Self;
    /// Lower bound on the length a vector is divided by when normalized.
    const MIN_NORMALIZATION_LENGTH: Self;
    /// Largest value of an 8-bit colour channel.
    const COLOR_CHANNEL_MAX: Self;
}

macro_rules! impl_signed_integer {
    ($($i:ty),*) => {$(
        impl Scalar for $i {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const EPSILON: Self = 0;

            #[inline]
            fn abs_value(self) -> Self {
                self.abs()
            }
        }

        impl Integer for $i {}
    )*};
}

macro_rules! impl_unsigned_integer {
    ($($u:ty),*) => {$(
        impl Scalar for $u {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const EPSILON: Self = 0;

            #[inline]
            fn abs_value(self) -> Self {
                self
            }
        }

        impl Integer for $u {}
    )*};
}

macro_rules! impl_float {
    ($f:tt) => {
        impl Scalar for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const EPSILON: Self = $f::EPSILON;

            #[inline]
            fn abs_value(self) -> Self {
                self.abs()
            }
        }

        impl Float for $f {
            const NEG_ONE: Self = -1.0;
            const TWO: Self = 2.0;
            const ONE_HALF: Self = 0.5;
            const ONE_FOURTH: Self = 0.25;
            const PI: Self = std::$f::consts::PI;
            const TWO_PI: Self = 2.0 * std::$f::consts::PI;
            const FRAC_PI_2: Self = std::$f::consts::FRAC_PI_2;
            const FRAC_PI_3: Self = std::$f::consts::FRAC_PI_3;
            const FRAC_PI_4: Self = std::$f::consts::FRAC_PI_4;
            const THREE_FRAC_PI_2: Self = 4.712388980384689857693965074919254326;
            const DEGREES_TO_RADIANS: Self = std::$f::consts::PI / 180.0;
            const RADIANS_TO_DEGREES: Self = 180.0 / std::$f::consts::PI;
            const MIN_NORMALIZATION_LENGTH: Self = 1e-8;
            const COLOR_CHANNEL_MAX: Self = 255.0;
        }
    };
}

impl_signed_integer!(i8, i16, i32, i64);
impl_unsigned_integer!(u8, u16, u32, u64);
impl_float!(f32);
impl_float!(f64);

/// Whether `a` and `b` differ by at most `epsilon`.
#[inline]
pub fn nearly_equal<T: Scalar>(a: T, b: T, epsilon: T) -> bool {
    a.nearly_equal(b, epsilon)
}

/// Compares `a` and `b` exactly for integers and within machine epsilon for
/// floating point types.
#[inline]
pub fn equal<T: Scalar>(a: T, b: T) -> bool {
    a.equals(b)
}

/// Linearly interpolates between two plain numbers.
#[inline]
pub fn lerp_scalar<F: Float>(a: F, b: F, t: F) -> F {
    a + t * (b - a)
}
