//! Quaternions.

use crate::{
    matrix::{Matrix3x3, Matrix4x4},
    num::Float,
    vector::{Vector3, Vector4, cross, normalize},
};
use std::fmt;

/// A quaternion `x*i + y*j + z*k + w`, stored as a [`Vector4`] with the
/// scalar part last.
///
/// A rotation by `angle` about the unit vector `axis` is represented by
/// `(axis * sin(angle / 2), cos(angle / 2))`. The operations that treat the
/// quaternion as a rotation assume unit length, which is up to the caller.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion<F> {
    components: Vector4<F>,
}

impl<F: Float> Quaternion<F> {
    /// Creates a new quaternion with the given components.
    #[inline]
    pub const fn new(x: F, y: F, z: F, w: F) -> Self {
        Self::from_vector4(Vector4::new(x, y, z, w))
    }

    /// Wraps the given components.
    #[inline]
    pub const fn from_vector4(components: Vector4<F>) -> Self {
        Self { components }
    }

    /// Creates the identity rotation `(0, 0, 0, 1)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO, F::ONE)
    }

    /// Creates a quaternion representing a rotation by `angle` radians about
    /// the given unit axis.
    pub fn from_axis_angle(axis: &Vector3<F>, angle: F) -> Self {
        let half_angle = angle * F::ONE_HALF;
        let (sin, cos) = half_angle.sin_cos();
        Self::from_vector4((*axis * sin).extended(cos))
    }

    /// Creates the shortest-arc rotation taking the direction `base` to the
    /// direction `target`. Neither has to be normalized, but both must be
    /// non-zero.
    ///
    /// Parallel directions give the identity. For opposite directions the
    /// rotation is half a turn about an axis perpendicular to `base`, chosen
    /// with the help of the y-axis, or the x-axis if `base` lies along y.
    pub fn rotation_between(base: &Vector3<F>, target: &Vector3<F>) -> Self {
        let base = normalize(base);
        let target = normalize(target);
        let cosine = base.dot(&target);

        if cosine >= F::ONE - F::EPSILON {
            Self::identity()
        } else if cosine <= F::EPSILON - F::ONE {
            let helper = if base.x().abs() <= F::EPSILON && base.z().abs() <= F::EPSILON {
                Vector3::new(F::ONE, F::ZERO, F::ZERO)
            } else {
                Vector3::new(F::ZERO, F::ONE, F::ZERO)
            };
            let right = cross(&helper, &base);
            let axis = normalize(&cross(&base, &right));
            Self::from_axis_angle(&axis, F::PI)
        } else {
            let axis = normalize(&cross(&base, &target));
            Self::from_axis_angle(&axis, cosine.acos())
        }
    }

    /// Creates the pure quaternion `(position, 0)`.
    #[inline]
    pub fn from_position(position: &Vector3<F>) -> Self {
        Self::from_vector4(position.extended(F::ZERO))
    }

    /// Extracts the rotation represented by the given rotation matrix.
    ///
    /// Of the four components, the one with the largest magnitude is
    /// computed from the diagonal first, and the other three are derived
    /// from sums and differences of the off-diagonal elements divided by it,
    /// which keeps the division well conditioned.
    pub fn from_rotation_matrix(m: &Matrix3x3<F>) -> Self {
        let (m11, m22, m33) = (m.m11(), m.m22(), m.m33());
        let candidates = [
            m11 - m22 - m33 + F::ONE,
            -m11 + m22 - m33 + F::ONE,
            -m11 - m22 + m33 + F::ONE,
            m11 + m22 + m33 + F::ONE,
        ];

        let mut largest = 0;
        for (idx, &candidate) in candidates.iter().enumerate().skip(1) {
            if candidate > candidates[largest] {
                largest = idx;
            }
        }
        let magnitude = candidates[largest];

        if magnitude < F::ZERO {
            return Self::identity();
        }

        let pivot = magnitude.sqrt() * F::ONE_HALF;
        let scale = F::ONE_FOURTH / pivot;

        match largest {
            0 => Self::new(
                pivot,
                (m.m12() + m.m21()) * scale,
                (m.m31() + m.m13()) * scale,
                (m.m23() - m.m32()) * scale,
            ),
            1 => Self::new(
                (m.m12() + m.m21()) * scale,
                pivot,
                (m.m23() + m.m32()) * scale,
                (m.m31() - m.m13()) * scale,
            ),
            2 => Self::new(
                (m.m31() + m.m13()) * scale,
                (m.m23() + m.m32()) * scale,
                pivot,
                (m.m12() - m.m21()) * scale,
            ),
            _ => Self::new(
                (m.m23() - m.m32()) * scale,
                (m.m31() - m.m13()) * scale,
                (m.m12() - m.m21()) * scale,
                pivot,
            ),
        }
    }

    /// Extracts the rotation in the upper left 3x3 block of the given
    /// matrix.
    #[inline]
    pub fn from_homogeneous_matrix(m: &Matrix4x4<F>) -> Self {
        Self::from_rotation_matrix(&m.upper_left())
    }

    /// The x-component.
    #[inline]
    pub fn x(&self) -> F {
        self.components.x()
    }

    /// The y-component.
    #[inline]
    pub fn y(&self) -> F {
        self.components.y()
    }

    /// The z-component.
    #[inline]
    pub fn z(&self) -> F {
        self.components.z()
    }

    /// The scalar part.
    #[inline]
    pub fn w(&self) -> F {
        self.components.w()
    }

    /// The vector part `(x, y, z)`.
    #[inline]
    pub fn vector_part(&self) -> Vector3<F> {
        self.components.xyz()
    }

    /// The components as a 4D vector.
    #[inline]
    pub const fn as_vector4(&self) -> &Vector4<F> {
        &self.components
    }

    /// Computes the 4D dot product with another quaternion.
    #[inline]
    pub fn dot(&self, other: &Self) -> F {
        self.components.dot(&other.components)
    }

    /// Computes the squared length.
    #[inline]
    pub fn length_squared(&self) -> F {
        self.dot(self)
    }

    /// Computes the length.
    #[inline]
    pub fn length(&self) -> F {
        self.length_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit length.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::from_vector4(self.components.normalized())
    }

    /// Computes the conjugate `(-x, -y, -z, w)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Computes the multiplicative inverse, the conjugate divided by the
    /// squared length.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self::from_vector4(self.conjugate().components / self.length_squared())
    }

    /// Returns the quaternion with every component negated. It represents the
    /// same rotation.
    #[inline]
    pub fn negated(&self) -> Self {
        Self::from_vector4(-self.components)
    }

    /// Rotates the given point by this unit quaternion, computing
    /// `q * (p, 0) * conj(q)` without the intermediate products.
    pub fn rotate_point(&self, point: &Vector3<F>) -> Vector3<F> {
        let (qx, qy, qz, qw) = (self.x(), self.y(), self.z(), self.w());
        let (px, py, pz) = (point.x(), point.y(), point.z());

        let x = qy * pz - qz * py + qw * px;
        let y = qz * px - qx * pz + qw * py;
        let z = qx * py - qy * px + qw * pz;
        let w = -qx * px - qy * py - qz * pz;

        Vector3::new(
            -y * qz + z * qy + x * qw - w * qx,
            -z * qx + x * qz + y * qw - w * qy,
            -x * qy + y * qx + z * qw - w * qz,
        )
    }

    /// Interpolates along the shortest great arc from this unit quaternion
    /// (at `t = 0`) to `target` (at `t = 1`).
    ///
    /// If the two are parallel or antiparallel to within rounding, this
    /// quaternion is returned unchanged.
    pub fn slerp(&self, target: &Self, t: F) -> Self {
        let mut cosine = self.dot(target);
        if F::ONE - cosine * cosine <= F::ZERO {
            return *self;
        }

        let mut target = *target;
        if cosine < F::ZERO {
            target = target.negated();
            cosine = -cosine;
        }

        let phase = cosine.max(F::NEG_ONE).min(F::ONE).acos();
        let sin_phase = phase.sin();
        let self_weight = (phase * (F::ONE - t)).sin() / sin_phase;
        let target_weight = (phase * t).sin() / sin_phase;

        Self::from_vector4(self.components * self_weight + target.components * target_weight)
    }

    /// Builds the 3x3 rotation matrix for vectors multiplied from the left,
    /// `v * M`. The quaternion does not have to be normalized.
    pub fn to_rotation_matrix(&self) -> Matrix3x3<F> {
        let (x, y, z, w) = (self.x(), self.y(), self.z(), self.w());
        let s = F::TWO / self.length_squared();

        let (vx, vy, vz) = (x * s, y * s, z * s);
        let (wx, wy, wz) = (vx * w, vy * w, vz * w);
        let (sx, sy, sz) = (x * vx, y * vy, z * vz);
        let (cx, cy, cz) = (y * vz, z * vx, x * vy);

        Matrix3x3::from_rows([
            [F::ONE - sy - sz, cz + wz, cy - wy],
            [cz - wz, F::ONE - sx - sz, cx + wx],
            [cy + wy, cx - wx, F::ONE - sx - sy],
        ])
    }

    /// Builds the 4x4 homogeneous rotation matrix for vectors multiplied
    /// from the left.
    #[inline]
    pub fn to_homogeneous_matrix(&self) -> Matrix4x4<F> {
        self.to_rotation_matrix().extended()
    }
}

impl<F: Float> Default for Quaternion<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> From<Vector4<F>> for Quaternion<F> {
    #[inline]
    fn from(components: Vector4<F>) -> Self {
        Self::from_vector4(components)
    }
}

impl<F: Float> From<Quaternion<F>> for Vector4<F> {
    #[inline]
    fn from(quaternion: Quaternion<F>) -> Self {
        quaternion.components
    }
}

impl_binop!([F: Float] Mul, mul, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(
        a.w() * b.x() + a.x() * b.w() + a.y() * b.z() - a.z() * b.y(),
        a.w() * b.y() - a.x() * b.z() + a.y() * b.w() + a.z() * b.x(),
        a.w() * b.z() + a.x() * b.y() - a.y() * b.x() + a.z() * b.w(),
        a.w() * b.w() - a.x() * b.x() - a.y() * b.y() - a.z() * b.z(),
    )
});

impl_binop_assign!([F: Float] MulAssign, mul_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = *a * *b;
});

impl_unary_op!([F: Float] Neg, neg, Quaternion<F>, Quaternion<F>, |val| {
    val.negated()
});

impl_abs_diff_eq!([F: Float] Quaternion<F>, F, |a, b, epsilon| {
    ::approx::AbsDiffEq::abs_diff_eq(&a.components, &b.components, epsilon)
});

impl_relative_eq!([F: Float] Quaternion<F>, F, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.components, &b.components, epsilon, max_relative)
});

impl<F: Float> fmt::Display for Quaternion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.components, f)
    }
}

// SAFETY: The quaternion is a transparent wrapper around a `Pod` vector.
unsafe impl<F: bytemuck::Pod> bytemuck::Zeroable for Quaternion<F> {}
unsafe impl<F: bytemuck::Pod> bytemuck::Pod for Quaternion<F> {}

#[cfg(feature = "serde")]
impl<F: Float + serde::Serialize> serde::Serialize for Quaternion<F> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.components, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, F: Float + serde::Deserialize<'de>> serde::Deserialize<'de> for Quaternion<F> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vector4<F> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from_vector4)
    }
}
