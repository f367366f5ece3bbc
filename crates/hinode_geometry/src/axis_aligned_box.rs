//! Representation of axis-aligned boxes.

use crate::ContainsPoint;
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use hinode_math::{Float, Scalar, Vector3};

/// An axis-aligned box represented by its center and the half of its extent
/// along each axis.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: Scalar + serde::Serialize",
        deserialize = "T: Scalar + serde::Deserialize<'de>"
    ))
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAlignedBox<T> {
    center: Vector3<T>,
    half_extents: Vector3<T>,
}

impl<T: Scalar> AxisAlignedBox<T> {
    /// Creates a new box with the given center and half extents. The absolute
    /// value of each half extent is stored.
    #[inline]
    pub fn new(center: Vector3<T>, half_extents: Vector3<T>) -> Self {
        Self {
            center,
            half_extents: half_extents.mapped(Scalar::abs_value),
        }
    }

    /// Creates a new box from the components of its center and half extents.
    #[inline]
    pub fn from_components(
        center_x: T,
        center_y: T,
        center_z: T,
        half_extent_x: T,
        half_extent_y: T,
        half_extent_z: T,
    ) -> Self {
        Self::new(
            Vector3::new(center_x, center_y, center_z),
            Vector3::new(half_extent_x, half_extent_y, half_extent_z),
        )
    }

    /// Returns the center of the box.
    #[inline]
    pub fn center(&self) -> &Vector3<T> {
        &self.center
    }

    /// Returns the half extents of the box, all non-negative.
    #[inline]
    pub fn half_extents(&self) -> &Vector3<T> {
        &self.half_extents
    }

    /// Returns the corner with the smallest coordinates.
    #[inline]
    pub fn lower_corner(&self) -> Vector3<T> {
        self.center - self.half_extents
    }

    /// Returns the corner with the largest coordinates.
    #[inline]
    pub fn upper_corner(&self) -> Vector3<T> {
        self.center + self.half_extents
    }

    /// Whether the given point is strictly inside the box. A point exactly
    /// on a face of the box is considered outside.
    pub fn contains_point(&self, point: &Vector3<T>) -> bool {
        (0..3).all(|axis| point[axis].distance_to(self.center[axis]) < self.half_extents[axis])
    }
}

impl<T: Scalar> ContainsPoint<T> for AxisAlignedBox<T> {
    fn contains_point(&self, point: &Vector3<T>) -> bool {
        AxisAlignedBox::contains_point(self, point)
    }
}

impl<F: Float> AbsDiffEq for AxisAlignedBox<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.half_extents.abs_diff_eq(&other.half_extents, epsilon)
    }
}

// SAFETY: Two `Pod` vectors of the same element type, so there is no padding.
unsafe impl<T: Pod> Zeroable for AxisAlignedBox<T> {}
unsafe impl<T: Pod> Pod for AxisAlignedBox<T> {}
