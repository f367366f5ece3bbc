//! Representation of capsules.

use crate::ContainsPoint;
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use hinode_math::{
    Float, Scalar, Vector3,
    vector::{dot, length, length_squared, normalize},
};

/// A capsule represented by the start and end points of the segment making up
/// the central axis of the cylinder between the caps, as well as a radius.
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
pub struct Capsule<T> {
    segment_start: Vector3<T>,
    segment_end: Vector3<T>,
    radius: T,
}

/// A tapered capsule, whose radius goes from one value at the start cap to
/// another at the end cap.
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
pub struct CapsuleEx<T> {
    segment_start: Vector3<T>,
    segment_end: Vector3<T>,
    start_radius: T,
    end_radius: T,
}

impl<T: Scalar> Capsule<T> {
    /// Creates a new capsule with the given segment end points and radius.
    /// The absolute value of the radius is stored.
    #[inline]
    pub fn new(segment_start: Vector3<T>, segment_end: Vector3<T>, radius: T) -> Self {
        Self {
            segment_start,
            segment_end,
            radius: radius.abs_value(),
        }
    }

    /// Returns the starting point of the line segment making up the central
    /// axis of the cylinder between the caps.
    #[inline]
    pub fn segment_start(&self) -> &Vector3<T> {
        &self.segment_start
    }

    /// Returns the end point of the line segment making up the central axis of
    /// the cylinder between the caps.
    #[inline]
    pub fn segment_end(&self) -> &Vector3<T> {
        &self.segment_end
    }

    /// Returns the radius of the capsule.
    #[inline]
    pub fn radius(&self) -> T {
        self.radius
    }
}

impl<F: Float> Capsule<F> {
    /// Computes the vector from the closest point on the capsule's segment to
    /// the given point, together with the capsule radius at that location.
    #[inline]
    pub fn distance_vector(&self, point: &Vector3<F>) -> (Vector3<F>, F) {
        segment_distance_vector(
            &self.segment_start,
            &self.segment_end,
            self.radius,
            self.radius,
            point,
        )
    }

    /// Whether the given point is inside the capsule. A point exactly on the
    /// capsule boundary is considered inside.
    #[inline]
    pub fn contains_point(&self, point: &Vector3<F>) -> bool {
        let (distance_vector, radius) = self.distance_vector(point);
        length_squared(&distance_vector) <= radius * radius
    }
}

impl<T: Scalar> CapsuleEx<T> {
    /// Creates a new tapered capsule with the given segment end points and the
    /// radii at each end. The absolute values of the radii are stored.
    #[inline]
    pub fn new(
        segment_start: Vector3<T>,
        start_radius: T,
        segment_end: Vector3<T>,
        end_radius: T,
    ) -> Self {
        Self {
            segment_start,
            segment_end,
            start_radius: start_radius.abs_value(),
            end_radius: end_radius.abs_value(),
        }
    }

    /// Returns the starting point of the central segment.
    #[inline]
    pub fn segment_start(&self) -> &Vector3<T> {
        &self.segment_start
    }

    /// Returns the end point of the central segment.
    #[inline]
    pub fn segment_end(&self) -> &Vector3<T> {
        &self.segment_end
    }

    /// Returns the radius of the cap around the segment start.
    #[inline]
    pub fn start_radius(&self) -> T {
        self.start_radius
    }

    /// Returns the radius of the cap around the segment end.
    #[inline]
    pub fn end_radius(&self) -> T {
        self.end_radius
    }
}

impl<F: Float> CapsuleEx<F> {
    /// Computes the vector from the closest point on the capsule's segment to
    /// the given point, together with the capsule radius at that location.
    ///
    /// Between the caps, the radius goes from the start radius to the end
    /// radius with the square of the fraction of the segment length covered.
    #[inline]
    pub fn distance_vector(&self, point: &Vector3<F>) -> (Vector3<F>, F) {
        segment_distance_vector(
            &self.segment_start,
            &self.segment_end,
            self.start_radius,
            self.end_radius,
            point,
        )
    }

    /// Whether the given point is inside the capsule. A point exactly on the
    /// capsule boundary is considered inside.
    #[inline]
    pub fn contains_point(&self, point: &Vector3<F>) -> bool {
        let (distance_vector, radius) = self.distance_vector(point);
        length_squared(&distance_vector) <= radius * radius
    }
}

impl<F: Float> ContainsPoint<F> for Capsule<F> {
    fn contains_point(&self, point: &Vector3<F>) -> bool {
        Capsule::contains_point(self, point)
    }
}

impl<F: Float> ContainsPoint<F> for CapsuleEx<F> {
    fn contains_point(&self, point: &Vector3<F>) -> bool {
        CapsuleEx::contains_point(self, point)
    }
}

impl<F: Float> AbsDiffEq for Capsule<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        Vector3::abs_diff_eq(&self.segment_start, &other.segment_start, epsilon)
            && Vector3::abs_diff_eq(&self.segment_end, &other.segment_end, epsilon)
            && self.radius.abs_diff_eq(&other.radius, epsilon)
    }
}

impl<F: Float> AbsDiffEq for CapsuleEx<F> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        Vector3::abs_diff_eq(&self.segment_start, &other.segment_start, epsilon)
            && Vector3::abs_diff_eq(&self.segment_end, &other.segment_end, epsilon)
            && self.start_radius.abs_diff_eq(&other.start_radius, epsilon)
            && self.end_radius.abs_diff_eq(&other.end_radius, epsilon)
    }
}

// SAFETY: Only `Pod` vectors and elements of the same type, so there is no
// padding.
unsafe impl<T: Pod> Zeroable for Capsule<T> {}
unsafe impl<T: Pod> Pod for Capsule<T> {}
unsafe impl<T: Pod> Zeroable for CapsuleEx<T> {}
unsafe impl<T: Pod> Pod for CapsuleEx<T> {}

fn segment_distance_vector<F: Float>(
    segment_start: &Vector3<F>,
    segment_end: &Vector3<F>,
    start_radius: F,
    end_radius: F,
    point: &Vector3<F>,
) -> (Vector3<F>, F) {
    let segment_vector = *segment_end - *segment_start;
    let direction = normalize(&segment_vector);
    let start_to_point = *point - *segment_start;
    let projection = dot(&start_to_point, &direction);

    if projection < F::ZERO {
        (start_to_point, start_radius)
    } else if length(&segment_vector) <= projection {
        (*point - *segment_end, end_radius)
    } else {
        let squared_fraction = projection * projection / length_squared(&segment_vector);
        (
            start_to_point - direction * projection,
            start_radius + (end_radius - start_radius) * squared_fraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vertical_capsule() -> Capsule<f32> {
        Capsule::new(Vector3::zeros(), Vector3::new(0.0, 10.0, 0.0), 1.0)
    }

    #[test]
    fn creating_capsule_stores_absolute_radius() {
        let capsule = Capsule::new(Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0), -0.5);
        assert_eq!(capsule.radius(), 0.5);
        assert_eq!(capsule.segment_end(), &Vector3::new(1.0, 0.0, 0.0));

        let capsule = CapsuleEx::new(Vector3::zeros(), -1, Vector3::new(0, 0, 4), -2);
        assert_eq!(capsule.start_radius(), 1);
        assert_eq!(capsule.end_radius(), 2);
        assert_eq!(capsule.segment_start(), &Vector3::zeros());
    }

    #[test]
    fn point_on_start_cap_boundary_is_contained() {
        assert!(vertical_capsule().contains_point(&Vector3::new(0.0, -1.0, 0.0)));
        assert!(!vertical_capsule().contains_point(&Vector3::new(0.0, -1.1, 0.0)));
    }

    #[test]
    fn point_on_cylinder_surface_is_contained() {
        assert!(vertical_capsule().contains_point(&Vector3::new(0.0, 5.0, 1.0)));
        assert!(!vertical_capsule().contains_point(&Vector3::new(0.0, 5.0, 2.0)));
    }

    #[test]
    fn point_beyond_end_uses_end_cap() {
        let capsule = vertical_capsule();
        let (distance_vector, radius) = capsule.distance_vector(&Vector3::new(0.5, 10.5, 0.0));
        assert_abs_diff_eq!(distance_vector, Vector3::new(0.5, 0.5, 0.0));
        assert_eq!(radius, 1.0);
        assert!(capsule.contains_point(&Vector3::new(0.5, 10.5, 0.0)));
        assert!(!capsule.contains_point(&Vector3::new(0.0, 11.5, 0.0)));
    }

    #[test]
    fn distance_vector_between_caps_is_perpendicular_to_segment() {
        let point = Vector3::new(3.0, 4.0, -4.0);
        let (distance_vector, radius) = vertical_capsule().distance_vector(&point);
        assert_abs_diff_eq!(distance_vector, Vector3::new(3.0, 0.0, -4.0));
        assert_abs_diff_eq!(radius, 1.0);
    }

    #[test]
    fn tapered_radius_follows_squared_fraction_of_segment() {
        let capsule = CapsuleEx::new(Vector3::zeros(), 1.0_f32, Vector3::new(0.0, 10.0, 0.0), 3.0);

        let (_, radius) = capsule.distance_vector(&Vector3::new(0.0, 5.0, 0.0));
        assert_abs_diff_eq!(radius, 1.5);

        assert!(capsule.contains_point(&Vector3::new(1.4, 5.0, 0.0)));
        assert!(!capsule.contains_point(&Vector3::new(1.6, 5.0, 0.0)));
    }

    #[test]
    fn tapered_caps_use_their_own_radius() {
        let capsule = CapsuleEx::new(Vector3::zeros(), 1.0_f64, Vector3::new(0.0, 10.0, 0.0), 3.0);
        assert!(capsule.contains_point(&Vector3::new(0.0, 12.0, 0.0)));
        assert!(!capsule.contains_point(&Vector3::new(0.0, 13.5, 0.0)));
        assert!(!capsule.contains_point(&Vector3::new(0.0, -1.5, 0.0)));
    }

    #[test]
    fn degenerate_capsule_behaves_like_sphere() {
        let center = Vector3::new(1.0, 1.0, 1.0);
        let capsule = Capsule::new(center, center, 2.0_f32);
        assert!(capsule.contains_point(&Vector3::new(1.0, 3.0, 1.0)));
        assert!(!capsule.contains_point(&Vector3::new(3.0, 3.0, 1.0)));
    }

    #[test]
    fn approximate_equality_compares_segment_and_radii() {
        let start = Vector3::new(0.0, 1e-7, 0.0);
        let shifted = Capsule::new(start, Vector3::new(0.0, 10.0, 0.0), 1.0);
        assert_abs_diff_eq!(vertical_capsule(), shifted, epsilon = 1e-6);
        assert!(!vertical_capsule().abs_diff_eq(&shifted, 1e-8));

        let end = Vector3::new(0.0, 10.0, 0.0);
        let tapered = CapsuleEx::new(Vector3::zeros(), 1.0_f32, end, 2.0);
        let moved_end = CapsuleEx::new(Vector3::zeros(), 1.0_f32, end * 1.01, 2.0);
        let wider_end = CapsuleEx::new(Vector3::zeros(), 1.0_f32, end, 2.5);
        assert_abs_diff_eq!(tapered, tapered, epsilon = 0.0);
        assert!(!tapered.abs_diff_eq(&moved_end, 1e-3));
        assert!(!tapered.abs_diff_eq(&wider_end, 1e-3));
    }
}
