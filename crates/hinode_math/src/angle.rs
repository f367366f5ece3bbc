//! Different units for angles.

use crate::num::Float;
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Represents an angle.
pub trait Angle<F: Float>: Copy {
    /// Creates a zero angle.
    fn zero() -> Self;

    /// Returns the angle as degrees.
    fn as_degrees(self) -> Degrees<F>;

    /// Returns the angle as radians.
    fn as_radians(self) -> Radians<F>;

    /// Returns the value of the angle in degrees.
    fn degrees(self) -> F;

    /// Returns the value of the angle in radians.
    fn radians(self) -> F;
}

/// An angle in degrees.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degrees<F>(pub F);

/// An angle in radians.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians<F>(pub F);

impl<F: Float> Radians<F> {
    /// Returns the equivalent angle in `[-PI, PI]`.
    pub fn normalized(self) -> Self {
        Self(normalize_radians(self.0))
    }
}

impl<F: Float> Angle<F> for Degrees<F> {
    fn zero() -> Self {
        Self(F::ZERO)
    }

    fn as_degrees(self) -> Degrees<F> {
        self
    }

    fn as_radians(self) -> Radians<F> {
        Radians::from(self)
    }

    fn degrees(self) -> F {
        self.0
    }

    fn radians(self) -> F {
        to_radians(self.0)
    }
}

impl<F: Float> Angle<F> for Radians<F> {
    fn zero() -> Self {
        Self(F::ZERO)
    }

    fn as_degrees(self) -> Degrees<F> {
        Degrees::from(self)
    }

    fn as_radians(self) -> Radians<F> {
        self
    }

    fn degrees(self) -> F {
        to_degrees(self.0)
    }

    fn radians(self) -> F {
        self.0
    }
}

impl<F: Float> From<Radians<F>> for Degrees<F> {
    fn from(rad: Radians<F>) -> Self {
        Self(to_degrees(rad.0))
    }
}

impl<F: Float> From<Degrees<F>> for Radians<F> {
    fn from(deg: Degrees<F>) -> Self {
        Self(to_radians(deg.0))
    }
}

macro_rules! impl_angle_ops {
    ($angle:ident, $other:ident, $value:ident) => {
        impl<F: Float> Add for $angle<F> {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl<F: Float> Add<$other<F>> for $angle<F> {
            type Output = Self;
            fn add(self, rhs: $other<F>) -> Self {
                Self(self.0 + rhs.$value())
            }
        }

        impl<F: Float> Sub for $angle<F> {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl<F: Float> Sub<$other<F>> for $angle<F> {
            type Output = Self;
            fn sub(self, rhs: $other<F>) -> Self {
                Self(self.0 - rhs.$value())
            }
        }

        impl<F: Float> Mul<F> for $angle<F> {
            type Output = Self;
            fn mul(self, rhs: F) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl<F: Float> Div<F> for $angle<F> {
            type Output = Self;
            fn div(self, rhs: F) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl<F: Float> Neg for $angle<F> {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl<F: Float> AbsDiffEq for $angle<F> {
            type Epsilon = F;

            fn default_epsilon() -> F {
                F::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
                F::abs_diff_eq(&self.0, &other.0, epsilon)
            }
        }

        impl<F: Float> RelativeEq for $angle<F> {
            fn default_max_relative() -> F {
                F::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
                F::relative_eq(&self.0, &other.0, epsilon, max_relative)
            }
        }
    };
}

impl_angle_ops!(Degrees, Radians, degrees);
impl_angle_ops!(Radians, Degrees, radians);

/// Converts an angle in degrees to radians.
#[inline]
pub fn to_radians<F: Float>(degrees: F) -> F {
    degrees * F::DEGREES_TO_RADIANS
}

/// Converts an angle in radians to degrees.
#[inline]
pub fn to_degrees<F: Float>(radians: F) -> F {
    radians * F::RADIANS_TO_DEGREES
}

/// Wraps the given angle into `[-PI, PI]` by adding or subtracting whole
/// turns. Angles already in the range and non-finite angles are returned as
/// is.
pub fn normalize_radians<F: Float>(radians: F) -> F {
    if !radians.is_finite() || (-F::PI..=F::PI).contains(&radians) {
        return radians;
    }
    let mut wrapped = (radians + F::PI) % F::TWO_PI;
    if wrapped < F::ZERO {
        wrapped = wrapped + F::TWO_PI;
    }
    wrapped - F::PI
}
