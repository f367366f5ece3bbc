//! LU decomposition with partial pivoting, and the determinant and inverse
//! computed from it.

use crate::{container::Container, num::Float};

/// The LU decomposition `P * A = L * U` of a square matrix `A`.
///
/// `L` (unit lower triangular, diagonal not stored) and `U` (upper triangular)
/// share one container. The rows are stored in pivot order, and
/// `permutation[i]` is the row of `A` that ended up in row `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LuDecomposition<F, const N: usize> {
    lu: Container<F, N, N>,
    permutation: [usize; N],
    swap_count: usize,
}

/// Decomposes the given square matrix with partial pivoting.
///
/// For every column, the row at or below the diagonal with the largest
/// magnitude in that column is swapped into the pivot position. Returns
/// [`None`] if that magnitude is zero or smaller than `tolerance`, in which
/// case the matrix is treated as singular.
pub fn lu_decompose<F: Float, const N: usize>(
    matrix: &Container<F, N, N>,
    tolerance: F,
) -> Option<LuDecomposition<F, N>> {
    let mut lu = *matrix;
    let mut permutation: [usize; N] = std::array::from_fn(|i| i);
    let mut swap_count = 0;

    for col in 0..N {
        let mut pivot_row = col;
        let mut pivot_magnitude = F::NEG_ONE;
        for row in col..N {
            let magnitude = lu.get(row, col).abs();
            if magnitude > pivot_magnitude {
                pivot_row = row;
                pivot_magnitude = magnitude;
            }
        }

        if pivot_magnitude <= F::ZERO || pivot_magnitude < tolerance {
            hinode_log::trace!(
                "Rejected LU decomposition: largest pivot {} in column {} is below tolerance {}",
                pivot_magnitude,
                col,
                tolerance
            );
            return None;
        }

        if pivot_row != col {
            let upper = *lu.row(col);
            *lu.row_mut(col) = *lu.row(pivot_row);
            *lu.row_mut(pivot_row) = upper;
            permutation.swap(col, pivot_row);
            swap_count += 1;
        }

        let pivot = lu.get(col, col);
        for row in (col + 1)..N {
            let factor = lu.get(row, col) / pivot;
            lu.set(row, col, factor);
            for k in (col + 1)..N {
                let value = lu.get(row, k) - factor * lu.get(col, k);
                lu.set(row, k, value);
            }
        }
    }

    Some(LuDecomposition {
        lu,
        permutation,
        swap_count,
    })
}

impl<F: Float, const N: usize> LuDecomposition<F, N> {
    /// The combined `L` and `U` factors, rows in pivot order.
    #[inline]
    pub fn lu(&self) -> &Container<F, N, N> {
        &self.lu
    }

    /// For each row of the factors, the row of the decomposed matrix it came
    /// from.
    #[inline]
    pub fn permutation(&self) -> &[usize; N] {
        &self.permutation
    }

    /// The number of row swaps performed while pivoting.
    #[inline]
    pub fn swap_count(&self) -> usize {
        self.swap_count
    }

    /// Computes the determinant as the product of the diagonal of `U`,
    /// negated when the number of row swaps is odd.
    pub fn determinant(&self) -> F {
        let product = (0..N).fold(F::ONE, |product, i| product * self.lu.get(i, i));
        if self.swap_count % 2 == 1 {
            -product
        } else {
            product
        }
    }

    /// Computes the inverse of the decomposed matrix by forward and back
    /// substitution against each column of the identity.
    pub fn inverse(&self) -> Container<F, N, N> {
        let mut inverse = Container::zeros();

        for col in 0..N {
            let mut x = [F::ZERO; N];

            for row in 0..N {
                let mut value = if self.permutation[row] == col {
                    F::ONE
                } else {
                    F::ZERO
                };
                for (k, &solved) in x.iter().enumerate().take(row) {
                    value = value - self.lu.get(row, k) * solved;
                }
                x[row] = value;
            }

            for row in (0..N).rev() {
                let mut value = x[row];
                for (k, &solved) in x.iter().enumerate().skip(row + 1) {
                    value = value - self.lu.get(row, k) * solved;
                }
                x[row] = value / self.lu.get(row, row);
            }

            for (row, value) in x.into_iter().enumerate() {
                inverse.set(row, col, value);
            }
        }

        inverse
    }
}

/// Inverts the given square matrix, or returns [`None`] if the decomposition
/// is rejected or the determinant is zero.
pub fn try_inverse<F: Float, const N: usize>(
    matrix: &Container<F, N, N>,
    tolerance: F,
) -> Option<Container<F, N, N>> {
    hinode_log::with_trace_logging!("Inverting {}x{} matrix", N, N; {
        let decomposition = lu_decompose(matrix, tolerance)?;
        if decomposition.determinant() == F::ZERO {
            hinode_log::trace!("Rejected inversion of matrix with zero determinant");
            return None;
        }
        Some(decomposition.inverse())
    })
}

/// Inverts the given square matrix. On failure the matrix is returned
/// unchanged together with `false`.
pub fn inverse<F: Float, const N: usize>(
    matrix: &Container<F, N, N>,
    tolerance: F,
) -> (Container<F, N, N>, bool) {
    if let Some(inverse) = try_inverse(matrix, tolerance) {
        (inverse, true)
    } else {
        hinode_log::debug!("Matrix is not invertible, returning it unchanged");
        (*matrix, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::permutation_determinant;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-10;

    fn identity<const N: usize>() -> Container<f64, N, N> {
        Container::from_fn(|row, col| if row == col { 1.0 } else { 0.0 })
    }

    #[test]
    fn decomposing_diagonal_matrix_needs_no_swaps() {
        let m = Container::from_rows([[2.0, 0.0], [0.0, 3.0]]);
        let decomposition = lu_decompose(&m, 0.0).unwrap();
        assert_eq!(decomposition.swap_count(), 0);
        assert_eq!(decomposition.permutation(), &[0, 1]);
        assert_eq!(decomposition.lu(), &m);
        assert_abs_diff_eq!(decomposition.determinant(), 6.0, epsilon = EPSILON);
    }

    #[test]
    fn decomposing_picks_largest_pivot() {
        let m = Container::from_rows([[1.0, 2.0], [4.0, 3.0]]);
        let decomposition = lu_decompose(&m, 0.0).unwrap();
        assert_eq!(decomposition.permutation(), &[1, 0]);
        assert_eq!(decomposition.swap_count(), 1);
        assert_abs_diff_eq!(decomposition.lu().get(0, 0), 4.0, epsilon = EPSILON);
        assert_abs_diff_eq!(decomposition.lu().get(1, 0), 0.25, epsilon = EPSILON);
        assert_abs_diff_eq!(decomposition.lu().get(1, 1), 1.25, epsilon = EPSILON);
        assert_abs_diff_eq!(decomposition.determinant(), -5.0, epsilon = EPSILON);
    }

    #[test]
    fn factors_reproduce_permuted_matrix() {
        let m = Container::from_rows([[0.0, 2.0, 1.0], [3.0, 1.0, 4.0], [6.0, 5.0, 2.0]]);
        let decomposition = lu_decompose(&m, 0.0).unwrap();

        let lower = Container::<f64, 3, 3>::from_fn(|row, col| match row.cmp(&col) {
            std::cmp::Ordering::Greater => decomposition.lu().get(row, col),
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => 0.0,
        });
        let upper = Container::<f64, 3, 3>::from_fn(|row, col| {
            if row <= col {
                decomposition.lu().get(row, col)
            } else {
                0.0
            }
        });
        let permuted = Container::<f64, 3, 3>::from_fn(|row, col| {
            m.get(decomposition.permutation()[row], col)
        });

        assert_abs_diff_eq!(lower.product(&upper), permuted, epsilon = EPSILON);
    }

    #[test]
    fn lu_determinant_matches_permutation_expansion() {
        let m = Container::from_rows([
            [2.0, -1.0, 0.0, 3.0, 1.0],
            [1.0, 4.0, 2.0, 0.0, -2.0],
            [0.0, 3.0, -1.0, 5.0, 2.0],
            [7.0, 0.0, 1.0, 1.0, 0.0],
            [-3.0, 2.0, 4.0, 0.0, 6.0],
        ]);
        let decomposition = lu_decompose(&m, 0.0).unwrap();
        assert_abs_diff_eq!(
            decomposition.determinant(),
            permutation_determinant(&m),
            epsilon = 1e-6
        );
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = Container::from_rows([[0.0, 2.0, 1.0], [3.0, 1.0, 4.0], [6.0, 5.0, 2.0]]);
        let inverse = try_inverse(&m, 1e-9).unwrap();
        assert_abs_diff_eq!(inverse.product(&m), identity::<3>(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.product(&inverse), identity::<3>(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_one_by_one_matrix_is_reciprocal() {
        let m = Container::from_rows([[4.0]]);
        let (inverse, success) = inverse(&m, 0.0);
        assert!(success);
        assert_abs_diff_eq!(inverse.get(0, 0), 0.25, epsilon = EPSILON);
    }

    #[test]
    fn zero_matrix_is_rejected_even_without_tolerance() {
        let m = Container::<f64, 3, 3>::zeros();
        assert!(lu_decompose(&m, 0.0).is_none());
        let (result, success) = inverse(&m, 0.0);
        assert!(!success);
        assert_eq!(result, m);
    }

    #[test]
    fn matrix_with_identical_rows_is_rejected() {
        let m = Container::from_rows([[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 5.0]]);
        let (result, success) = inverse(&m, 1e-9);
        assert!(!success);
        assert_eq!(result, m);
    }

    #[test]
    fn small_pivot_is_rejected_by_tolerance() {
        let m = Container::from_rows([[1e-4, 0.0], [0.0, 1e-4]]);
        assert!(lu_decompose(&m, 1e-3).is_none());
        assert!(lu_decompose(&m, 1e-5).is_some());
    }
}
