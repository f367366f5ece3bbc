//! Matrices.

use crate::{
    container::Container,
    lu,
    num::{Float, Scalar},
    vector::{Vector3, Vector4},
};
use std::ops::{Index, IndexMut};

/// A 3x3 matrix, stored row by row.
///
/// Vectors are treated as rows and multiplied from the left, `v * M`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3x3<T> {
    inner: Container<T, 3, 3>,
}

/// A 4x4 matrix, stored row by row.
///
/// Vectors are treated as rows and multiplied from the left, `v * M`, so the
/// translation of an affine transform lives in the last row. The memory
/// layout is sixteen tightly packed numbers in row-major order.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4x4<T> {
    inner: Container<T, 4, 4>,
}

macro_rules! impl_square_matrix {
    ($t:ident, $vector:ident, $n:literal) => {
        impl<T: Scalar> $t<T> {
            /// Creates a matrix with the given rows.
            #[inline]
            pub const fn from_rows(rows: [[T; $n]; $n]) -> Self {
                Self {
                    inner: Container::from_rows(rows),
                }
            }

            /// Creates a matrix with all zeros.
            #[inline]
            pub fn zeros() -> Self {
                Self {
                    inner: Container::zeros(),
                }
            }

            /// Creates the identity matrix.
            #[inline]
            pub fn identity() -> Self {
                let mut m = Self::zeros();
                m.set_identity();
                m
            }

            /// Creates a diagonal matrix with the given vector as the diagonal.
            #[inline]
            pub fn from_diagonal(diagonal: &$vector<T>) -> Self {
                Self {
                    inner: Container::from_fn(|row, col| {
                        if row == col { diagonal[row] } else { T::ZERO }
                    }),
                }
            }

            /// Creates a matrix with the given row vectors.
            #[inline]
            pub fn from_row_vectors(rows: [$vector<T>; $n]) -> Self {
                Self::from_rows(rows.map(|row| *row.as_array()))
            }

            /// Returns the given row as a vector.
            ///
            /// # Panics
            /// If the row is out of bounds.
            #[inline]
            pub fn row_vector(&self, row: usize) -> $vector<T> {
                self[row]
            }

            /// Overwrites the given row.
            ///
            /// # Panics
            /// If the row is out of bounds.
            #[inline]
            pub fn set_row(&mut self, row: usize, values: &$vector<T>) {
                self[row] = *values;
            }

            /// Overwrites this matrix with the identity matrix.
            pub fn set_identity(&mut self) {
                self.inner
                    .map(|_, row, col| if row == col { T::ONE } else { T::ZERO });
            }

            /// Computes the transpose of the matrix.
            #[inline]
            pub fn transposed(&self) -> Self {
                Self {
                    inner: self.inner.transposed(),
                }
            }

            /// Transposes the matrix in place.
            pub fn transpose_in_place(&mut self) {
                for row in 0..$n {
                    for col in (row + 1)..$n {
                        let upper = self.inner.get(row, col);
                        self.inner.set(row, col, self.inner.get(col, row));
                        self.inner.set(col, row, upper);
                    }
                }
            }

            /// Computes the determinant by expanding over every permutation of
            /// the columns. Exact for integer matrices, but unsigned elements
            /// overflow as soon as a negative term exceeds the running sum.
            #[inline]
            pub fn determinant(&self) -> T {
                permutation_determinant(&self.inner)
            }

            #[inline]
            const fn wrap(inner: Container<T, $n, $n>) -> Self {
                Self { inner }
            }
        }

        impl<F: Float> $t<F> {
            /// Computes the inverse through an LU decomposition, or returns
            /// [`None`] if a pivot falls below `tolerance` or the determinant
            /// is zero.
            #[inline]
            pub fn try_inverse(&self, tolerance: F) -> Option<Self> {
                lu::try_inverse(&self.inner, tolerance).map(Self::wrap)
            }

            /// Computes the inverse through an LU decomposition. On failure
            /// the matrix itself is returned, together with `false`.
            #[inline]
            pub fn inverted(&self, tolerance: F) -> (Self, bool) {
                let (inner, success) = lu::inverse(&self.inner, tolerance);
                (Self::wrap(inner), success)
            }

            /// Computes the determinant through an LU decomposition, or
            /// returns [`None`] if a pivot falls below `tolerance`.
            #[inline]
            pub fn lu_determinant(&self, tolerance: F) -> Option<F> {
                lu::lu_decompose(&self.inner, tolerance).map(|decomposition| decomposition.determinant())
            }
        }

        impl<T: Scalar> Default for $t<T> {
            fn default() -> Self {
                Self::zeros()
            }
        }

        impl<T: Scalar> From<[[T; $n]; $n]> for $t<T> {
            #[inline]
            fn from(rows: [[T; $n]; $n]) -> Self {
                Self::from_rows(rows)
            }
        }

        impl<T: Scalar> Index<usize> for $t<T> {
            type Output = $vector<T>;

            #[inline]
            fn index(&self, row: usize) -> &Self::Output {
                bytemuck::cast_ref(self.inner.row(row))
            }
        }

        impl<T: Scalar> IndexMut<usize> for $t<T> {
            #[inline]
            fn index_mut(&mut self, row: usize) -> &mut Self::Output {
                bytemuck::cast_mut(self.inner.row_mut(row))
            }
        }

        impl_container_view!($t, $n, $n);

        impl_binop!([T: Scalar] Mul, mul, $t<T>, $t<T>, $t<T>, |a, b| {
            $t::wrap(a.inner.product(&b.inner))
        });

        impl_binop!([T: Scalar] Mul, mul, $vector<T>, $t<T>, $vector<T>, |a, b| {
            let row: &Container<T, 1, $n> = a;
            $vector::from(row.product(&b.inner))
        });
    };
}

impl_square_matrix!(Matrix3x3, Vector3, 3);
impl_square_matrix!(Matrix4x4, Vector4, 4);

macro_rules! impl_element_accessors {
    ($t:ident; $($name:ident, $set:ident => $row:literal, $col:literal);*) => {
        impl<T: Scalar> $t<T> {
            $(
                #[doc = concat!("The element in row ", stringify!($row), " and column ", stringify!($col), ", counting from zero.")]
                #[inline]
                pub fn $name(&self) -> T {
                    self.inner.get_const::<$row, $col>()
                }

                #[doc = concat!("Sets the element in row ", stringify!($row), " and column ", stringify!($col), ".")]
                #[inline]
                pub fn $set(&mut self, value: T) {
                    *self.inner.get_const_mut::<$row, $col>() = value;
                }
            )*
        }
    };
}

impl_element_accessors!(Matrix3x3;
    m11, set_m11 => 0, 0; m12, set_m12 => 0, 1; m13, set_m13 => 0, 2;
    m21, set_m21 => 1, 0; m22, set_m22 => 1, 1; m23, set_m23 => 1, 2;
    m31, set_m31 => 2, 0; m32, set_m32 => 2, 1; m33, set_m33 => 2, 2
);

impl_element_accessors!(Matrix4x4;
    m11, set_m11 => 0, 0; m12, set_m12 => 0, 1; m13, set_m13 => 0, 2; m14, set_m14 => 0, 3;
    m21, set_m21 => 1, 0; m22, set_m22 => 1, 1; m23, set_m23 => 1, 2; m24, set_m24 => 1, 3;
    m31, set_m31 => 2, 0; m32, set_m32 => 2, 1; m33, set_m33 => 2, 2; m34, set_m34 => 2, 3;
    m41, set_m41 => 3, 0; m42, set_m42 => 3, 1; m43, set_m43 => 3, 2; m44, set_m44 => 3, 3
);

impl<T: Scalar> Matrix3x3<T> {
    /// Embeds this matrix in the upper left block of a 4x4 identity matrix.
    pub fn extended(&self) -> Matrix4x4<T> {
        let mut m = Matrix4x4::identity();
        for row in 0..3 {
            for col in 0..3 {
                m.set(row, col, self.get(row, col));
            }
        }
        m
    }
}

impl<T: Scalar> Matrix4x4<T> {
    /// The upper left 3x3 block.
    pub fn upper_left(&self) -> Matrix3x3<T> {
        Matrix3x3::wrap(Container::from_fn(|row, col| self.get(row, col)))
    }
}

/// Computes the determinant of a square container as the signed sum, over
/// every permutation of the columns, of the product of one element per row.
///
/// Permutations are enumerated with Heap's algorithm, where every step is a
/// single swap and therefore flips the sign. The cost grows as `N!`, so this
/// is meant for the small matrices of this crate and as an independent check
/// of the LU determinant.
pub fn permutation_determinant<T: Scalar, const N: usize>(m: &Container<T, N, N>) -> T {
    let term = |columns: &[usize; N]| {
        columns
            .iter()
            .enumerate()
            .fold(T::ONE, |product, (row, &col)| product * m.get(row, col))
    };

    let mut columns: [usize; N] = std::array::from_fn(|i| i);
    let mut counters = [0_usize; N];
    let mut positive = true;
    let mut determinant = term(&columns);

    let mut i = 1;
    while i < N {
        if counters[i] < i {
            if i % 2 == 0 {
                columns.swap(0, i);
            } else {
                columns.swap(counters[i], i);
            }
            positive = !positive;

            let value = term(&columns);
            determinant = if positive {
                determinant + value
            } else {
                determinant - value
            };

            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    determinant
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-5;

    fn invertible_matrix4() -> Matrix4x4<f32> {
        Matrix4x4::from_rows([
            [4.0, 7.0, 2.0, 3.0],
            [0.0, 5.0, 1.0, 8.0],
            [2.0, 1.0, 6.0, 0.0],
            [1.0, 3.0, 2.0, 9.0],
        ])
    }

    #[test]
    fn identity_has_ones_on_diagonal() {
        let m = Matrix4x4::<i32>::identity();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(m.get(row, col), i32::from(row == col));
            }
        }
    }

    #[test]
    fn rows_are_views_of_the_same_storage() {
        let mut m = Matrix3x3::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(m[1], Vector3::new(4, 5, 6));
        assert_eq!(m[2].z(), m.m33());

        m[0].set_y(20);
        assert_eq!(m.m12(), 20);

        m.set_row(2, &Vector3::same(0));
        assert_eq!(m.row_vector(2), Vector3::zeros());

        m.set_m21(-4);
        assert_eq!(m[1].x(), -4);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn indexing_row_out_of_bounds_panics() {
        let m = Matrix4x4::<f32>::identity();
        let _ = m[4];
    }

    #[test]
    fn transposing_twice_gives_original() {
        let m = invertible_matrix4();
        assert_eq!(m.transposed().transposed(), m);
        assert_eq!(m.transposed().m12(), m.m21());

        let mut n = m;
        n.transpose_in_place();
        assert_eq!(n, m.transposed());
    }

    #[test]
    fn setting_identity_overwrites_everything() {
        let mut m = invertible_matrix4();
        m.set_identity();
        assert_eq!(m, Matrix4x4::identity());
    }

    #[test]
    fn multiplying_with_identity_gives_same_matrix() {
        let m = invertible_matrix4();
        assert_eq!(m * Matrix4x4::identity(), m);
        assert_eq!(&Matrix4x4::identity() * &m, m);
    }

    #[test]
    fn matrix_product_is_row_by_column() {
        let a = Matrix3x3::from_rows([[1, 2, 0], [0, 1, 0], [0, 0, 1]]);
        let b = Matrix3x3::from_rows([[1, 0, 0], [3, 1, 0], [0, 0, 2]]);
        assert_eq!(
            a * b,
            Matrix3x3::from_rows([[7, 2, 0], [3, 1, 0], [0, 0, 2]])
        );
    }

    #[test]
    fn row_vector_times_matrix_works() {
        let translation = Matrix4x4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [5.0, 6.0, 7.0, 1.0],
        ]);
        let point = Vector4::new(1.0_f32, 2.0, 3.0, 1.0);
        assert_eq!(point * translation, Vector4::new(6.0, 8.0, 10.0, 1.0));

        let scale = Matrix3x3::from_diagonal(&Vector3::new(2, 3, 4));
        assert_eq!(Vector3::new(1, 1, 1) * scale, Vector3::new(2, 3, 4));
    }

    #[test]
    fn permutation_determinant_of_known_matrices_is_correct() {
        assert_eq!(Matrix3x3::<i32>::identity().determinant(), 1);
        assert_eq!(
            Matrix3x3::from_rows([[2, 0, 0], [0, 3, 0], [0, 0, 4]]).determinant(),
            24
        );
        assert_eq!(
            Matrix3x3::from_rows([[6, 1, 1], [4, -2, 5], [2, 8, 7]]).determinant(),
            -306
        );
        assert_abs_diff_eq!(invertible_matrix4().determinant(), 625.0, epsilon = EPSILON);
    }

    #[test]
    fn swapping_two_rows_flips_determinant_sign() {
        let m = invertible_matrix4();
        let mut swapped = m;
        swapped.set_row(0, &m[1]);
        swapped.set_row(1, &m[0]);
        assert_abs_diff_eq!(swapped.determinant(), -m.determinant(), epsilon = EPSILON);
    }

    #[test]
    fn determinant_of_singular_matrix_is_zero() {
        let m = Matrix3x3::from_rows([[1.0_f64, 2.0, 3.0], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_abs_diff_eq!(m.determinant(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn inverting_matrix_works() {
        let m = invertible_matrix4();
        let (inverse, success) = m.inverted(0.0);
        assert!(success);
        assert_abs_diff_eq!(inverse * m, Matrix4x4::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.try_inverse(1e-6).unwrap(), inverse, epsilon = EPSILON);
    }

    #[test]
    fn inverting_singular_matrix_returns_it_unchanged() {
        let m = Matrix3x3::from_rows([[1.0_f32, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 0.0]]);
        let (result, success) = m.inverted(1e-6);
        assert!(!success);
        assert_eq!(result, m);
        assert!(m.try_inverse(1e-6).is_none());
    }

    #[test]
    fn lu_and_permutation_determinants_agree() {
        let m = invertible_matrix4();
        assert_abs_diff_eq!(
            m.lu_determinant(0.0).unwrap(),
            m.determinant(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn extending_and_taking_upper_left_block_round_trips() {
        let m = Matrix3x3::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let extended = m.extended();
        assert_eq!(extended.m44(), 1);
        assert_eq!(extended.m14(), 0);
        assert_eq!(extended.upper_left(), m);
    }

    #[test]
    fn matrix_layout_is_row_major() {
        let m = Matrix4x4::from_rows([
            [1.0_f32, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        let flat: [f32; 16] = bytemuck::cast(m);
        assert_eq!(flat[4], 5.0);
        assert_eq!(flat[15], 16.0);
        assert_eq!(std::mem::size_of::<Matrix4x4<f32>>(), 64);
    }
}
