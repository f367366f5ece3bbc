//! Property tests for the numeric invariants of the math crate.

use approx::{abs_diff_eq, relative_eq};
use hinode::{
    Matrix3x3, Matrix4x4, Quaternion, Vector3,
    math::{
        transform,
        vector::{length, normalize},
    },
};
use proptest::prelude::*;

prop_compose! {
    fn vector3_strategy(max_coord: f64)(
        x in -max_coord..max_coord,
        y in -max_coord..max_coord,
        z in -max_coord..max_coord,
    ) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }
}

prop_compose! {
    fn unit_axis_strategy()(
        axis in vector3_strategy(1.0)
            .prop_filter("axis must not vanish", |axis| length(axis) > 1e-3),
    ) -> Vector3<f64> {
        normalize(&axis)
    }
}

prop_compose! {
    fn rotation_strategy()(
        axis in unit_axis_strategy(),
        angle in -std::f64::consts::PI..std::f64::consts::PI,
    ) -> Quaternion<f64> {
        Quaternion::from_axis_angle(&axis, angle)
    }
}

prop_compose! {
    fn matrix3_strategy()(elements in prop::array::uniform9(-10.0_f64..10.0)) -> Matrix3x3<f64> {
        Matrix3x3::from_rows([
            [elements[0], elements[1], elements[2]],
            [elements[3], elements[4], elements[5]],
            [elements[6], elements[7], elements[8]],
        ])
    }
}

prop_compose! {
    fn matrix4_strategy()(elements in prop::array::uniform16(-10.0_f64..10.0)) -> Matrix4x4<f64> {
        Matrix4x4::from_rows([
            [elements[0], elements[1], elements[2], elements[3]],
            [elements[4], elements[5], elements[6], elements[7]],
            [elements[8], elements[9], elements[10], elements[11]],
            [elements[12], elements[13], elements[14], elements[15]],
        ])
    }
}

prop_compose! {
    /// Strictly diagonally dominant, hence invertible.
    fn invertible_matrix4_strategy()(m in matrix4_strategy()) -> Matrix4x4<f64> {
        m + Matrix4x4::identity() * 50.0
    }
}

proptest! {
    #[test]
    fn normalized_vectors_have_unit_length(
        v in vector3_strategy(1e3).prop_filter("vector must not vanish", |v| length(v) > 1e-3),
    ) {
        prop_assert!(abs_diff_eq!(length(&normalize(&v)), 1.0, epsilon = 1e-12));
    }
}

proptest! {
    #[test]
    fn transposing_twice_gives_original_matrix(m in matrix4_strategy()) {
        prop_assert_eq!(m.transposed().transposed(), m);
        prop_assert_eq!(transform::transpose(&transform::transpose(&m)), m);
    }
}

proptest! {
    #[test]
    fn inverse_times_matrix_is_identity(m in invertible_matrix4_strategy()) {
        let (inverse, success) = m.inverted(1e-9);
        prop_assert!(success);
        prop_assert!(abs_diff_eq!(inverse * m, Matrix4x4::identity(), epsilon = 1e-9));
        prop_assert!(abs_diff_eq!(m * inverse, Matrix4x4::identity(), epsilon = 1e-9));
    }
}

proptest! {
    #[test]
    fn matrix_with_repeated_row_is_not_inverted(
        m in matrix4_strategy(),
        source_row in 0_usize..4,
        target_row in 0_usize..4,
    ) {
        prop_assume!(source_row != target_row);
        let mut singular = m;
        singular[target_row] = m[source_row];

        let (result, success) = singular.inverted(1e-9);
        prop_assert!(!success);
        prop_assert_eq!(result, singular);
    }
}

proptest! {
    #[test]
    fn lu_and_permutation_determinants_agree_for_3x3(m in matrix3_strategy()) {
        let m = m + Matrix3x3::identity() * 40.0;
        let lu_determinant = m.lu_determinant(0.0);
        prop_assert!(lu_determinant.is_some());
        prop_assert!(relative_eq!(
            lu_determinant.unwrap_or_default(),
            m.determinant(),
            epsilon = 1e-9,
            max_relative = 1e-9
        ));
    }
}

proptest! {
    #[test]
    fn lu_and_permutation_determinants_agree_for_4x4(m in invertible_matrix4_strategy()) {
        let lu_determinant = m.lu_determinant(0.0);
        prop_assert!(lu_determinant.is_some());
        prop_assert!(relative_eq!(
            lu_determinant.unwrap_or_default(),
            m.determinant(),
            epsilon = 1e-9,
            max_relative = 1e-9
        ));
    }
}

proptest! {
    #[test]
    fn slerping_quaternion_with_itself_gives_same_quaternion(
        q in rotation_strategy(),
        t in 0.0_f64..=1.0,
    ) {
        prop_assert!(abs_diff_eq!(q.slerp(&q, t), q, epsilon = 1e-9));
    }
}

proptest! {
    #[test]
    fn identity_quaternion_leaves_points_unchanged(p in vector3_strategy(1e3)) {
        prop_assert_eq!(Quaternion::identity().rotate_point(&p), p);
    }
}

proptest! {
    #[test]
    fn rotation_by_zero_angle_is_identity(axis in unit_axis_strategy()) {
        let m: Matrix4x4<f64> = transform::rotation_about_axis(&axis, 0.0);
        prop_assert!(abs_diff_eq!(m, Matrix4x4::identity(), epsilon = 1e-12));
    }
}

proptest! {
    #[test]
    fn quaternion_and_axis_rotation_matrices_agree(
        axis in unit_axis_strategy(),
        angle in -3.0_f64..3.0,
    ) {
        let from_quaternion = Quaternion::from_axis_angle(&axis, angle).to_rotation_matrix();
        let from_axis: Matrix3x3<f64> = transform::rotation_about_axis(&axis, angle);
        prop_assert!(abs_diff_eq!(from_quaternion, from_axis, epsilon = 1e-9));
    }
}

proptest! {
    #[test]
    fn quaternion_survives_conversion_to_matrix_and_back(q in rotation_strategy()) {
        let converted = Quaternion::from_rotation_matrix(&q.to_rotation_matrix());
        prop_assert!(
            abs_diff_eq!(converted, q, epsilon = 1e-9)
                || abs_diff_eq!(converted, q.negated(), epsilon = 1e-9)
        );
    }
}

proptest! {
    #[test]
    fn rotating_point_matches_rotation_matrix(
        q in rotation_strategy(),
        p in vector3_strategy(10.0),
    ) {
        let rotated = q.rotate_point(&p);
        prop_assert!(abs_diff_eq!(rotated, p * q.to_rotation_matrix(), epsilon = 1e-9));
    }
}
