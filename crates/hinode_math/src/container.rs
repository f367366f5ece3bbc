//! Dense fixed-shape numeric storage.

use crate::num::{Float, Integer, Scalar};
use anyhow::{Result, bail};
use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
};

/// A dense grid of `R` x `C` numbers, stored row by row.
///
/// The shape is part of the type and never changes. The elementwise
/// operations (`assign_from`, `added`, `subtracted`, `multiplied`, `divided`,
/// `remainder`, `equals`, `nearly_equal` and their in-place variants) take an
/// [`Operand`] on the right, which is either another container-shaped value or
/// a plain scalar:
///
/// - A container operand is only read in the overlapping region
///   `min(R, rows) x min(C, columns)`. Cells outside it keep their value and
///   are ignored by comparisons. A 3-component vector can therefore be added
///   to, or compared with, a 4-component vector by truncation. Callers that
///   need matching shapes must check them, or use the `std::ops`
///   implementations, which only accept the exact same type.
/// - A scalar operand is broadcast to every cell.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container<T, const R: usize, const C: usize> {
    elements: [[T; C]; R],
}

/// The right-hand side of an elementwise [`Container`] operation.
pub trait Operand<T> {
    /// The `(rows, columns)` of the operand, or [`None`] for a scalar that is
    /// broadcast to every cell.
    fn shape(&self) -> Option<(usize, usize)>;

    /// The value the operand contributes to the cell at `row`, `col`. Only
    /// called for cells inside the operand's shape.
    fn value_at(&self, row: usize, col: usize) -> T;
}

/// A typed view over a [`Container`] of a fixed shape. Implemented by the
/// vector and matrix types, which all share the container's memory layout.
pub trait NumericContainer<T: Scalar, const R: usize, const C: usize>: Copy {
    /// Returns a reference to the underlying container.
    fn as_container(&self) -> &Container<T, R, C>;

    /// Returns a mutable reference to the underlying container.
    fn as_container_mut(&mut self) -> &mut Container<T, R, C>;

    /// Wraps the given container.
    fn from_container(container: Container<T, R, C>) -> Self;
}

impl<T: Scalar, const R: usize, const C: usize> Container<T, R, C> {
    /// The number of rows.
    pub const ROWS: usize = R;

    /// The number of columns.
    pub const COLS: usize = C;

    /// Creates a container from the given rows.
    #[inline]
    pub const fn from_rows(elements: [[T; C]; R]) -> Self {
        Self { elements }
    }

    /// Creates a container with every element set to `value`.
    #[inline]
    pub fn filled(value: T) -> Self {
        Self::from_rows([[value; C]; R])
    }

    /// Creates a container with all zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::filled(T::ZERO)
    }

    /// Creates a container whose element at `(row, col)` is `f(row, col)`.
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        Self::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| f(row, col))
        }))
    }

    /// Creates a container from a slice holding the elements row by row.
    ///
    /// # Errors
    /// Returns an error if the slice does not contain exactly `R * C`
    /// elements.
    pub fn from_row_major_slice(values: &[T]) -> Result<Self> {
        if values.len() != R * C {
            bail!(
                "Expected {} values for a {}x{} container, got {}",
                R * C,
                R,
                C,
                values.len()
            );
        }
        Ok(Self::from_fn(|row, col| values[row * C + col]))
    }

    /// The number of rows.
    #[inline]
    pub const fn n_rows(&self) -> usize {
        R
    }

    /// The number of columns.
    #[inline]
    pub const fn n_columns(&self) -> usize {
        C
    }

    /// Returns the element at the given row and column.
    ///
    /// # Panics
    /// If the row or column is out of bounds. Prefer
    /// [`get_const`](Self::get_const) when the indices are known at compile
    /// time.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        Self::check_index(row, col);
        self.elements[row][col]
    }

    /// Returns a mutable reference to the element at the given row and
    /// column.
    ///
    /// # Panics
    /// If the row or column is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        Self::check_index(row, col);
        &mut self.elements[row][col]
    }

    /// Sets the element at the given row and column.
    ///
    /// # Panics
    /// If the row or column is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        *self.get_mut(row, col) = value;
    }

    /// Returns the element at `ROW`, `COL`. Out-of-bounds indices fail to
    /// compile.
    #[inline]
    pub fn get_const<const ROW: usize, const COL: usize>(&self) -> T {
        const { assert!(ROW < R && COL < C, "container index out of bounds") };
        self.elements[ROW][COL]
    }

    /// Returns a mutable reference to the element at `ROW`, `COL`.
    /// Out-of-bounds indices fail to compile.
    #[inline]
    pub fn get_const_mut<const ROW: usize, const COL: usize>(&mut self) -> &mut T {
        const { assert!(ROW < R && COL < C, "container index out of bounds") };
        &mut self.elements[ROW][COL]
    }

    /// Returns a reference to the given row.
    ///
    /// # Panics
    /// If the row is out of bounds.
    #[inline]
    pub fn row(&self, row: usize) -> &[T; C] {
        assert!(row < R, "row {row} out of bounds for {R}x{C} container");
        &self.elements[row]
    }

    /// Returns a reference to row `ROW`. An out-of-bounds row fails to
    /// compile.
    #[inline]
    pub fn row_const<const ROW: usize>(&self) -> &[T; C] {
        const { assert!(ROW < R, "container row out of bounds") };
        &self.elements[ROW]
    }

    /// Returns a mutable reference to the given row.
    ///
    /// # Panics
    /// If the row is out of bounds.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [T; C] {
        assert!(row < R, "row {row} out of bounds for {R}x{C} container");
        &mut self.elements[row]
    }

    /// Returns a reference to the rows.
    #[inline]
    pub const fn as_rows(&self) -> &[[T; C]; R] {
        &self.elements
    }

    /// Returns the elements in row-major order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.elements.iter().flat_map(|row| row.iter().copied())
    }

    /// Returns the raw bytes of the elements in row-major order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Replaces every element with `f(self, row, col)`, visiting the elements
    /// row by row. Elements updated earlier are visible to later calls.
    pub fn map(&mut self, mut f: impl FnMut(&Self, usize, usize) -> T) {
        for row in 0..R {
            for col in 0..C {
                let value = f(self, row, col);
                self.elements[row][col] = value;
            }
        }
    }

    /// Calls `f(self, row, col)` for every element, row by row.
    pub fn each(&self, mut f: impl FnMut(&Self, usize, usize)) {
        for row in 0..R {
            for col in 0..C {
                f(self, row, col);
            }
        }
    }

    /// Returns a container with the given closure applied to each element.
    #[inline]
    pub fn mapped(&self, mut f: impl FnMut(T) -> T) -> Self {
        Self::from_fn(|row, col| f(self.elements[row][col]))
    }

    /// Returns the transpose of this container.
    #[inline]
    pub fn transposed(&self) -> Container<T, C, R> {
        Container::from_fn(|row, col| self.elements[col][row])
    }

    /// Computes the matrix product of this container with a container whose
    /// row count matches this container's column count.
    pub fn product<const K: usize>(&self, right: &Container<T, C, K>) -> Container<T, R, K> {
        Container::from_fn(|row, col| {
            (0..C).fold(T::ZERO, |sum, i| {
                sum + self.elements[row][i] * right.elements[i][col]
            })
        })
    }

    /// The number of rows and columns visited when combining with `rhs`.
    #[inline]
    pub fn overlap_with(rhs: &(impl Operand<T> + ?Sized)) -> (usize, usize) {
        match rhs.shape() {
            Some((rows, cols)) => (R.min(rows), C.min(cols)),
            None => (R, C),
        }
    }

    /// Replaces every visited element `a` with `op(a, b)`, where `b` is the
    /// corresponding value of `rhs`.
    pub fn zip_apply(&mut self, rhs: &(impl Operand<T> + ?Sized), mut op: impl FnMut(T, T) -> T) {
        let (rows, cols) = Self::overlap_with(rhs);
        for row in 0..rows {
            for col in 0..cols {
                let element = &mut self.elements[row][col];
                *element = op(*element, rhs.value_at(row, col));
            }
        }
    }

    /// Whether `predicate(a, b)` holds for every visited pair of elements.
    pub fn zip_all(
        &self,
        rhs: &(impl Operand<T> + ?Sized),
        mut predicate: impl FnMut(T, T) -> bool,
    ) -> bool {
        let (rows, cols) = Self::overlap_with(rhs);
        (0..rows).all(|row| {
            (0..cols).all(|col| predicate(self.elements[row][col], rhs.value_at(row, col)))
        })
    }

    /// Overwrites the visited elements with the values of `rhs`.
    #[inline]
    pub fn assign_from(&mut self, rhs: &(impl Operand<T> + ?Sized)) {
        self.zip_apply(rhs, |_, b| b);
    }

    /// Adds `rhs` to the visited elements.
    #[inline]
    pub fn add_in_place(&mut self, rhs: &(impl Operand<T> + ?Sized)) {
        self.zip_apply(rhs, |a, b| a + b);
    }

    /// Subtracts `rhs` from the visited elements.
    #[inline]
    pub fn subtract_in_place(&mut self, rhs: &(impl Operand<T> + ?Sized)) {
        self.zip_apply(rhs, |a, b| a - b);
    }

    /// Multiplies the visited elements by `rhs`.
    #[inline]
    pub fn multiply_in_place(&mut self, rhs: &(impl Operand<T> + ?Sized)) {
        self.zip_apply(rhs, |a, b| a * b);
    }

    /// Divides the visited elements by `rhs`.
    #[inline]
    pub fn divide_in_place(&mut self, rhs: &(impl Operand<T> + ?Sized)) {
        self.zip_apply(rhs, |a, b| a / b);
    }

    /// Returns a copy with `rhs` added to the visited elements.
    #[inline]
    pub fn added(&self, rhs: &(impl Operand<T> + ?Sized)) -> Self {
        let mut result = *self;
        result.add_in_place(rhs);
        result
    }

    /// Returns a copy with `rhs` subtracted from the visited elements.
    #[inline]
    pub fn subtracted(&self, rhs: &(impl Operand<T> + ?Sized)) -> Self {
        let mut result = *self;
        result.subtract_in_place(rhs);
        result
    }

    /// Returns a copy with the visited elements multiplied by `rhs`.
    #[inline]
    pub fn multiplied(&self, rhs: &(impl Operand<T> + ?Sized)) -> Self {
        let mut result = *self;
        result.multiply_in_place(rhs);
        result
    }

    /// Returns a copy with the visited elements divided by `rhs`.
    #[inline]
    pub fn divided(&self, rhs: &(impl Operand<T> + ?Sized)) -> Self {
        let mut result = *self;
        result.divide_in_place(rhs);
        result
    }

    /// Whether the visited elements equal those of `rhs`, exactly for
    /// integers and within machine epsilon for floating point types.
    #[inline]
    pub fn equals(&self, rhs: &(impl Operand<T> + ?Sized)) -> bool {
        self.zip_all(rhs, |a, b| a.equals(b))
    }

    /// Whether the visited elements differ from those of `rhs` by at most
    /// `epsilon`.
    #[inline]
    pub fn nearly_equal(&self, rhs: &(impl Operand<T> + ?Sized), epsilon: T) -> bool {
        self.zip_all(rhs, |a, b| a.nearly_equal(b, epsilon))
    }

    /// Returns a copy with every element negated.
    #[inline]
    pub fn negated(&self) -> Self
    where
        T: Neg<Output = T>,
    {
        self.mapped(|value| -value)
    }

    #[inline]
    fn check_index(row: usize, col: usize) {
        assert!(
            row < R && col < C,
            "index ({row}, {col}) out of bounds for {R}x{C} container"
        );
    }
}

impl<T: Integer, const R: usize, const C: usize> Container<T, R, C> {
    /// Replaces the visited elements with their remainder after division by
    /// `rhs`.
    #[inline]
    pub fn remainder_in_place(&mut self, rhs: &(impl Operand<T> + ?Sized)) {
        self.zip_apply(rhs, |a, b| a % b);
    }

    /// Returns a copy with the visited elements replaced by their remainder
    /// after division by `rhs`.
    #[inline]
    pub fn remainder(&self, rhs: &(impl Operand<T> + ?Sized)) -> Self {
        let mut result = *self;
        result.remainder_in_place(rhs);
        result
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Container<T, R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Scalar, const R: usize, const C: usize> Operand<T> for Container<T, R, C> {
    #[inline]
    fn shape(&self) -> Option<(usize, usize)> {
        Some((R, C))
    }

    #[inline]
    fn value_at(&self, row: usize, col: usize) -> T {
        self.get(row, col)
    }
}

impl<T: Scalar, const R: usize, const C: usize> NumericContainer<T, R, C> for Container<T, R, C> {
    #[inline]
    fn as_container(&self) -> &Container<T, R, C> {
        self
    }

    #[inline]
    fn as_container_mut(&mut self) -> &mut Container<T, R, C> {
        self
    }

    #[inline]
    fn from_container(container: Container<T, R, C>) -> Self {
        container
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<[[T; C]; R]> for Container<T, R, C> {
    #[inline]
    fn from(elements: [[T; C]; R]) -> Self {
        Self::from_rows(elements)
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<Container<T, R, C>> for [[T; C]; R] {
    #[inline]
    fn from(container: Container<T, R, C>) -> Self {
        container.elements
    }
}

macro_rules! impl_scalar_operand {
    ($($t:ty),*) => {$(
        impl Operand<$t> for $t {
            #[inline]
            fn shape(&self) -> Option<(usize, usize)> {
                None
            }

            #[inline]
            fn value_at(&self, _row: usize, _col: usize) -> $t {
                *self
            }
        }
    )*};
}

impl_scalar_operand!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

// SAFETY: The container is a transparent wrapper around a nested array of
// `Pod` elements, which has no padding and is valid for any bit pattern.
unsafe impl<T: Pod, const R: usize, const C: usize> Zeroable for Container<T, R, C> {}
unsafe impl<T: Pod, const R: usize, const C: usize> Pod for Container<T, R, C> {}

impl<T: Scalar, const R: usize, const C: usize> Add for Container<T, R, C> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.added(&rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Sub for Container<T, R, C> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.subtracted(&rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for Container<T, R, C> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        self.multiplied(&ScalarOperand(rhs))
    }
}

impl<T: Scalar, const R: usize, const C: usize> Div<T> for Container<T, R, C> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        self.divided(&ScalarOperand(rhs))
    }
}

impl<T: Integer, const R: usize, const C: usize> Rem<T> for Container<T, R, C> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: T) -> Self {
        self.remainder(&ScalarOperand(rhs))
    }
}

impl<T: Scalar + Neg<Output = T>, const R: usize, const C: usize> Neg for Container<T, R, C> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negated()
    }
}

impl<T: Scalar, const R: usize, const C: usize> AddAssign for Container<T, R, C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.add_in_place(&rhs);
    }
}

impl<T: Scalar, const R: usize, const C: usize> SubAssign for Container<T, R, C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract_in_place(&rhs);
    }
}

impl<T: Scalar, const R: usize, const C: usize> MulAssign<T> for Container<T, R, C> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.multiply_in_place(&ScalarOperand(rhs));
    }
}

impl<T: Scalar, const R: usize, const C: usize> DivAssign<T> for Container<T, R, C> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        self.divide_in_place(&ScalarOperand(rhs));
    }
}

impl<T: Integer, const R: usize, const C: usize> RemAssign<T> for Container<T, R, C> {
    #[inline]
    fn rem_assign(&mut self, rhs: T) {
        self.remainder_in_place(&ScalarOperand(rhs));
    }
}

macro_rules! impl_scalar_mul_container {
    ($($t:ty),*) => {$(
        impl<const R: usize, const C: usize> Mul<Container<$t, R, C>> for $t {
            type Output = Container<$t, R, C>;

            #[inline]
            fn mul(self, rhs: Container<$t, R, C>) -> Self::Output {
                rhs * self
            }
        }
    )*};
}

impl_scalar_mul_container!(i32, u32, f32, f64);

/// Broadcasts a generic scalar. The concrete scalar types implement
/// [`Operand`] directly, but generic code only knows `T: Scalar`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScalarOperand<T>(pub(crate) T);

impl<T: Scalar> Operand<T> for ScalarOperand<T> {
    #[inline]
    fn shape(&self) -> Option<(usize, usize)> {
        None
    }

    #[inline]
    fn value_at(&self, _row: usize, _col: usize) -> T {
        self.0
    }
}

/// Formats every row in parentheses with comma-separated columns, e.g.
/// `(1,2)(3,4)`.
impl<T: Scalar, const R: usize, const C: usize> fmt::Display for Container<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.elements {
            write!(f, "(")?;
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{value}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl<F: Float, const R: usize, const C: usize> AbsDiffEq for Container<F, R, C> {
    type Epsilon = F;

    fn default_epsilon() -> F {
        F::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: F) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}

impl<F: Float, const R: usize, const C: usize> RelativeEq for Container<F, R, C> {
    fn default_max_relative() -> F {
        F::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: F, max_relative: F) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.relative_eq(&b, epsilon, max_relative))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Container;
    use crate::num::Scalar;
    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{self, SeqAccess, Visitor},
        ser::SerializeTuple,
    };
    use std::{fmt, marker::PhantomData};

    impl<T: Scalar + Serialize, const R: usize, const C: usize> Serialize for Container<T, R, C> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(R * C)?;
            for value in self.iter() {
                tuple.serialize_element(&value)?;
            }
            tuple.end()
        }
    }

    impl<'de, T, const R: usize, const C: usize> Deserialize<'de> for Container<T, R, C>
    where
        T: Scalar + Deserialize<'de>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_tuple(R * C, ContainerVisitor(PhantomData))
        }
    }

    struct ContainerVisitor<T, const R: usize, const C: usize>(PhantomData<T>);

    impl<'de, T, const R: usize, const C: usize> Visitor<'de> for ContainerVisitor<T, R, C>
    where
        T: Scalar + Deserialize<'de>,
    {
        type Value = Container<T, R, C>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a sequence of {} numbers", R * C)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut container = Container::zeros();
            for idx in 0..R * C {
                let value = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(idx, &self))?;
                container.set(idx / C, idx % C, value);
            }
            Ok(container)
        }
    }
}
