//! Builders for transformation and projection matrices.
//!
//! All matrices act on row vectors multiplied from the left, `v * M`, so a
//! sequence of transforms is composed left to right and translations live in
//! the last row. The projection matrices map view space depth to `[0, 1]`.
//!
//! The rotation and scaling builders are generic over the matrix type and
//! work for both [`Matrix3x3`](crate::Matrix3x3) and
//! [`Matrix4x4`](crate::Matrix4x4), filling the upper left 3x3 block of an
//! identity matrix. Asking for a matrix smaller than 3x3 fails to compile.

use crate::{
    container::{Container, NumericContainer},
    matrix::Matrix4x4,
    num::{Float, Scalar},
    vector::{Vector2, Vector3, cross, normalize},
};

/// Computes the matrix product `left * right`. The column count of `left`
/// must equal the row count of `right`, which the types enforce.
#[inline]
pub fn mul<T: Scalar, const R: usize, const K: usize, const C: usize>(
    left: &Container<T, R, K>,
    right: &Container<T, K, C>,
) -> Container<T, R, C> {
    left.product(right)
}

/// Creates the identity matrix of the requested type.
#[inline]
pub fn identity<T, M, const N: usize>() -> M
where
    T: Scalar,
    M: NumericContainer<T, N, N>,
{
    M::from_container(identity_container())
}

/// Overwrites the given square matrix with the identity matrix.
#[inline]
pub fn set_identity<T, M, const N: usize>(matrix: &mut M)
where
    T: Scalar,
    M: NumericContainer<T, N, N>,
{
    *matrix.as_container_mut() = identity_container();
}

/// Computes the transpose of the given square matrix.
#[inline]
pub fn transpose<T, M, const N: usize>(matrix: &M) -> M
where
    T: Scalar,
    M: NumericContainer<T, N, N>,
{
    M::from_container(matrix.as_container().transposed())
}

/// Transposes the given square matrix in place.
#[inline]
pub fn set_transpose<T, M, const N: usize>(matrix: &mut M)
where
    T: Scalar,
    M: NumericContainer<T, N, N>,
{
    *matrix = transpose(matrix);
}

/// Creates a rotation by `radians` about the x-axis.
pub fn rotation_x<F, M, const N: usize>(radians: F) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    let (sin, cos) = radians.sin_cos();
    upper_left_3x3([
        [F::ONE, F::ZERO, F::ZERO],
        [F::ZERO, cos, sin],
        [F::ZERO, -sin, cos],
    ])
}

/// Creates a rotation by `radians` about the y-axis.
pub fn rotation_y<F, M, const N: usize>(radians: F) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    let (sin, cos) = radians.sin_cos();
    upper_left_3x3([
        [cos, F::ZERO, -sin],
        [F::ZERO, F::ONE, F::ZERO],
        [sin, F::ZERO, cos],
    ])
}

/// Creates a rotation by `radians` about the z-axis.
pub fn rotation_z<F, M, const N: usize>(radians: F) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    let (sin, cos) = radians.sin_cos();
    upper_left_3x3([
        [cos, sin, F::ZERO],
        [-sin, cos, F::ZERO],
        [F::ZERO, F::ZERO, F::ONE],
    ])
}

/// Creates a rotation by `radians` about the given unit axis, using the
/// expanded Rodrigues formula.
pub fn rotation_about_axis<F, M, const N: usize>(axis: &Vector3<F>, radians: F) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (sin, cos) = radians.sin_cos();
    let k = F::ONE - cos;

    upper_left_3x3([
        [x * x * k + cos, x * y * k + z * sin, z * x * k - y * sin],
        [x * y * k - z * sin, y * y * k + cos, y * z * k + x * sin],
        [z * x * k + y * sin, y * z * k - x * sin, z * z * k + cos],
    ])
}

/// Creates the rotation whose rows are the given orthonormal basis vectors,
/// in the order `right`, `up`, `front`. It takes the x-, y- and z-axes to
/// `right`, `up` and `front`.
pub fn rotation_from_axes<F, M, const N: usize>(
    front: &Vector3<F>,
    up: &Vector3<F>,
    right: &Vector3<F>,
) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    upper_left_3x3([*right.as_array(), *up.as_array(), *front.as_array()])
}

/// Creates a scaling by the given factor along each axis.
pub fn scaling<F, M, const N: usize>(scale: &Vector3<F>) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    upper_left_3x3([
        [scale.x(), F::ZERO, F::ZERO],
        [F::ZERO, scale.y(), F::ZERO],
        [F::ZERO, F::ZERO, scale.z()],
    ])
}

/// Creates a homogeneous translation by the given offset.
pub fn translation<F: Float>(offset: &Vector3<F>) -> Matrix4x4<F> {
    let mut m = Matrix4x4::identity();
    m[3] = offset.extended(F::ONE);
    m
}

/// Creates a homogeneous translation within the xy-plane. The z coordinate
/// is left unchanged.
pub fn translation_2d<F: Float>(offset: &Vector2<F>) -> Matrix4x4<F> {
    let mut m = Matrix4x4::identity();
    m[3] = offset.extended_twice(F::ZERO, F::ONE);
    m
}

/// Creates the view matrix of a camera at `eye` looking at `target`.
///
/// The camera basis is built from the viewing direction (`front`, mapped to
/// +z), `right = normalize(up x front)` (mapped to +x) and the
/// re-orthogonalized up direction (mapped to +y). The last row moves the eye
/// to the origin.
pub fn view<F: Float>(eye: &Vector3<F>, target: &Vector3<F>, up: &Vector3<F>) -> Matrix4x4<F> {
    let front = normalize(&(*target - *eye));
    let right = normalize(&cross(up, &front));
    let up = normalize(&cross(&front, &right));

    Matrix4x4::from_rows([
        [right.x(), up.x(), front.x(), F::ZERO],
        [right.y(), up.y(), front.y(), F::ZERO],
        [right.z(), up.z(), front.z(), F::ZERO],
        [-right.dot(eye), -up.dot(eye), -front.dot(eye), F::ONE],
    ])
}

/// Creates a perspective projection with the given vertical field of view
/// in radians and width-to-height aspect ratio.
///
/// After the division by `w`, view space depth `near` maps to zero and `far`
/// maps to one. The view space depth ends up in `w` through the last column.
pub fn perspective<F: Float>(near: F, far: F, vertical_fov: F, aspect: F) -> Matrix4x4<F> {
    let scale_y = F::ONE / (vertical_fov * F::ONE_HALF).tan();
    let scale_x = scale_y / aspect;
    let depth_scale = far / (far - near);

    Matrix4x4::from_rows([
        [scale_x, F::ZERO, F::ZERO, F::ZERO],
        [F::ZERO, scale_y, F::ZERO, F::ZERO],
        [F::ZERO, F::ZERO, depth_scale, F::ONE],
        [F::ZERO, F::ZERO, -near * depth_scale, F::ZERO],
    ])
}

/// Creates an orthographic projection of a `width` by `height` box centered
/// on the view axis. Depth `near` maps to zero and `far` to one.
pub fn orthographic<F: Float>(width: F, height: F, near: F, far: F) -> Matrix4x4<F> {
    let depth_range = far - near;

    Matrix4x4::from_rows([
        [F::TWO / width, F::ZERO, F::ZERO, F::ZERO],
        [F::ZERO, F::TWO / height, F::ZERO, F::ZERO],
        [F::ZERO, F::ZERO, F::ONE / depth_range, F::ZERO],
        [F::ZERO, F::ZERO, -near / depth_range, F::ONE],
    ])
}

/// Creates the matrix taking clip space `x` and `y` in `[-1, 1]` to texture
/// coordinates in `[0, 1]`, with `v` pointing down.
pub fn clip_to_uv<F: Float>() -> Matrix4x4<F> {
    let half = F::ONE_HALF;
    Matrix4x4::from_rows([
        [half, F::ZERO, F::ZERO, F::ZERO],
        [F::ZERO, -half, F::ZERO, F::ZERO],
        [F::ZERO, F::ZERO, F::ONE, F::ZERO],
        [half, half, F::ZERO, F::ONE],
    ])
}

/// Creates the matrix taking normalized device coordinates to pixel offsets
/// from the top-left corner of a `width` by `height` viewport.
///
/// The corner `(-1, 1)` maps to `(0, 0)` and `(1, -1)` to `(width, -height)`,
/// so x lies in `[0, width]` while y is negated and lies in `[-height, 0]`.
/// The center maps to `(width / 2, -height / 2)`. Depth passes through.
pub fn viewport<F: Float>(width: F, height: F) -> Matrix4x4<F> {
    let mut m = Matrix4x4::identity();
    m.set_m11(width * F::ONE_HALF);
    m.set_m22(-height * F::ONE_HALF);
    m.set_m41(m.m11());
    m.set_m42(m.m22());
    m
}

fn identity_container<T: Scalar, const N: usize>() -> Container<T, N, N> {
    Container::from_fn(|row, col| if row == col { T::ONE } else { T::ZERO })
}

fn upper_left_3x3<F, M, const N: usize>(block: [[F; 3]; 3]) -> M
where
    F: Float,
    M: NumericContainer<F, N, N>,
{
    const { assert!(N >= 3, "rotation and scaling matrices must be at least 3x3") };
    M::from_container(Container::from_fn(|row, col| {
        if row < 3 && col < 3 {
            block[row][col]
        } else if row == col {
            F::ONE
        } else {
            F::ZERO
        }
    }))
}
