//! Representation of spheres.

use crate::ContainsPoint;
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use hinode_math::{Float, Scalar, Vector3};

/// A sphere represented by the center point and the radius.
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
pub struct Sphere<T> {
    center: Vector3<T>,
    radius: T,
}

impl<T: Scalar> Sphere<T> {
    /// Creates a new sphere with the given center and radius. The absolute
    /// value of the radius is stored.
    #[inline]
    pub fn new(center: Vector3<T>, radius: T) -> Self {
        Self {
            center,
            radius: radius.abs_value(),
        }
    }

    /// Returns the center point of the sphere.
    #[inline]
    pub fn center(&self) -> &Vector3<T> {
        &self.center
    }

    /// Returns the radius of the sphere.
    #[inline]
    pub fn radius(&self) -> T {
        self.radius
    }

    /// Returns the square of the radius of the sphere.
    #[inline]
    pub fn radius_squared(&self) -> T {
        self.radius * self.radius
    }

    /// Whether the given point is inside this sphere. A point exactly on the
    /// surface of the sphere is considered inside.
    #[inline]
    pub fn contains_point(&self, point: &Vector3<T>) -> bool {
        squared_distance_between(&self.center, point) <= self.radius_squared()
    }
}

impl<T: Scalar> ContainsPoint<T> for Sphere<T> {
    fn contains_point(&self, point: &Vector3<T>) -> bool {
        Sphere::contains_point(self, point)
    }
}

impl<F: Float> AbsDiffEq for Sphere<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.radius.abs_diff_eq(&other.radius, epsilon)
    }
}

// SAFETY: A `Pod` vector followed by one more element of the same type, so
// there is no padding.
unsafe impl<T: Pod> Zeroable for Sphere<T> {}
unsafe impl<T: Pod> Pod for Sphere<T> {}

/// Squared Euclidean distance, computed from per-axis absolute differences so
/// that unsigned coordinates do not wrap.
pub(crate) fn squared_distance_between<T: Scalar>(a: &Vector3<T>, b: &Vector3<T>) -> T {
    (0..3).fold(T::ZERO, |sum, axis| {
        let difference = a[axis].distance_to(b[axis]);
        sum + difference * difference
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn creating_sphere_stores_absolute_radius() {
        let sphere = Sphere::new(Vector3::new(-0.1, 0.0, 123.5), -42.0);
        assert_eq!(sphere.center(), &Vector3::new(-0.1, 0.0, 123.5));
        assert_eq!(sphere.radius(), 42.0);
        assert_eq!(sphere.radius_squared(), 1764.0);
    }

    #[test]
    fn point_on_sphere_surface_is_contained() {
        let sphere = Sphere::new(Vector3::zeros(), 2.0_f32);
        assert!(sphere.contains_point(&Vector3::new(0.0, 2.0, 0.0)));
        assert!(sphere.contains_point(&Vector3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn point_inside_and_outside_sphere_is_classified() {
        let sphere = Sphere::new(Vector3::new(1.0, 1.0, 1.0), 1.0_f64);
        assert!(sphere.contains_point(&Vector3::new(1.5, 1.5, 1.0)));
        assert!(!sphere.contains_point(&Vector3::new(1.8, 1.8, 1.0)));
    }

    #[test]
    fn containment_works_for_integer_coordinates() {
        let sphere = Sphere::new(Vector3::new(3_u32, 3, 3), 2);
        assert!(sphere.contains_point(&Vector3::new(1, 3, 3)));
        assert!(sphere.contains_point(&Vector3::new(4, 4, 3)));
        assert!(!sphere.contains_point(&Vector3::new(1, 1, 3)));

        let sphere = Sphere::new(Vector3::new(0_i32, 0, 0), -3);
        assert!(sphere.contains_point(&Vector3::new(0, -3, 0)));
    }

    #[test]
    fn squared_distance_is_symmetric_for_unsigned_coordinates() {
        let a = Vector3::new(1_u32, 5, 2);
        let b = Vector3::new(4_u32, 1, 2);
        assert_eq!(squared_distance_between(&a, &b), 25);
        assert_eq!(squared_distance_between(&b, &a), 25);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn sphere_serializes_center_and_radius() {
        let sphere = Sphere::new(Vector3::new(1, 2, 3), 4);
        let json = serde_json::to_string(&sphere).unwrap();
        assert_eq!(json, r#"{"center":[1,2,3],"radius":4}"#);
        let parsed: Sphere<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sphere);
    }

    proptest! {
        #[test]
        fn containment_agrees_with_distance_to_center(
            x in -10.0_f64..10.0,
            y in -10.0_f64..10.0,
            z in -10.0_f64..10.0,
            radius in 0.1_f64..10.0,
        ) {
            let sphere = Sphere::new(Vector3::zeros(), radius);
            let point = Vector3::new(x, y, z);
            let distance = (x * x + y * y + z * z).sqrt();
            prop_assume!((distance - radius).abs() > 1e-9);
            prop_assert_eq!(sphere.contains_point(&point), distance < radius);
        }
    }
}
