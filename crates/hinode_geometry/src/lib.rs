//! Geometrical objects.

mod axis_aligned_box;
mod capsule;
mod sphere;

pub use axis_aligned_box::AxisAlignedBox;
pub use capsule::{Capsule, CapsuleEx};
pub use sphere::Sphere;

use hinode_math::{Scalar, Vector3};

/// Anything that can tell whether a point lies inside it.
pub trait ContainsPoint<T: Scalar> {
    /// Whether the given point is inside the shape. Each shape documents
    /// whether points on its boundary count as inside.
    fn contains_point(&self, point: &Vector3<T>) -> bool;
}

/// Whether the given point is inside the given shape.
#[inline]
pub fn is_hit<T: Scalar>(point: &Vector3<T>, shape: &impl ContainsPoint<T>) -> bool {
    shape.contains_point(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_inclusion_differs_between_box_and_sphere() {
        let point = Vector3::new(1.0_f32, 0.0, 0.0);
        let aab = AxisAlignedBox::new(Vector3::zeros(), Vector3::same(1.0));
        let sphere = Sphere::new(Vector3::zeros(), 1.0);
        assert!(!is_hit(&point, &aab));
        assert!(is_hit(&point, &sphere));
    }

    #[test]
    fn shapes_can_be_tested_through_trait_objects() {
        let shapes: [&dyn ContainsPoint<f32>; 4] = [
            &AxisAlignedBox::new(Vector3::zeros(), Vector3::same(2.0)),
            &Sphere::new(Vector3::zeros(), 2.0),
            &Capsule::new(Vector3::zeros(), Vector3::new(0.0, 1.0, 0.0), 1.0),
            &CapsuleEx::new(Vector3::zeros(), 1.0, Vector3::new(0.0, 1.0, 0.0), 0.5),
        ];
        let origin = Vector3::zeros();
        assert!(shapes.iter().all(|shape| shape.contains_point(&origin)));
        let far_away = Vector3::same(10.0);
        assert!(shapes.iter().all(|shape| !shape.contains_point(&far_away)));
    }
}
