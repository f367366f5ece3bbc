//! Vectors.

use crate::{
    container::{Container, NumericContainer, ScalarOperand},
    num::{Float, Scalar},
};
use std::ops::{Index, IndexMut};

/// A 2-dimensional vector, stored as a single row.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2<T> {
    inner: Container<T, 1, 2>,
}

/// A 3-dimensional vector, stored as a single row.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector3<T> {
    inner: Container<T, 1, 3>,
}

/// A 4-dimensional vector, stored as a single row.
///
/// Also used for colours, where `r`, `g`, `b` and `a` name the same slots as
/// `x`, `y`, `z` and `w`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector4<T> {
    inner: Container<T, 1, 4>,
}

macro_rules! impl_component_accessors {
    ($t:ident; $($idx:literal => $name:ident, $name_mut:ident, $set:ident, $color:ident, $color_mut:ident, $set_color:ident);*) => {
        impl<T: Scalar> $t<T> {
            $(
                #[doc = concat!("The `", stringify!($name), "`-component.")]
                #[inline]
                pub fn $name(&self) -> T {
                    self.inner.get_const::<0, $idx>()
                }

                #[doc = concat!("A mutable reference to the `", stringify!($name), "`-component.")]
                #[inline]
                pub fn $name_mut(&mut self) -> &mut T {
                    self.inner.get_const_mut::<0, $idx>()
                }

                #[doc = concat!("Sets the `", stringify!($name), "`-component.")]
                #[inline]
                pub fn $set(&mut self, value: T) {
                    *self.$name_mut() = value;
                }

                #[doc = concat!("The `", stringify!($color), "` channel, aliasing the `", stringify!($name), "`-component.")]
                #[inline]
                pub fn $color(&self) -> T {
                    self.$name()
                }

                #[doc = concat!("A mutable reference to the `", stringify!($color), "` channel.")]
                #[inline]
                pub fn $color_mut(&mut self) -> &mut T {
                    self.$name_mut()
                }

                #[doc = concat!("Sets the `", stringify!($color), "` channel.")]
                #[inline]
                pub fn $set_color(&mut self, value: T) {
                    self.$set(value);
                }
            )*
        }
    };
}

impl_component_accessors!(Vector2;
    0 => x, x_mut, set_x, r, r_mut, set_r;
    1 => y, y_mut, set_y, g, g_mut, set_g
);

impl_component_accessors!(Vector3;
    0 => x, x_mut, set_x, r, r_mut, set_r;
    1 => y, y_mut, set_y, g, g_mut, set_g;
    2 => z, z_mut, set_z, b, b_mut, set_b
);

impl_component_accessors!(Vector4;
    0 => x, x_mut, set_x, r, r_mut, set_r;
    1 => y, y_mut, set_y, g, g_mut, set_g;
    2 => z, z_mut, set_z, b, b_mut, set_b;
    3 => w, w_mut, set_w, a, a_mut, set_a
);

impl<T: Scalar> Vector2<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self::from_array([x, y])
    }

    /// Creates a new vector from the given array of components.
    #[inline]
    pub const fn from_array(components: [T; 2]) -> Self {
        Self {
            inner: Container::from_rows([components]),
        }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::same(T::ZERO)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub fn same(value: T) -> Self {
        Self::new(value, value)
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: T, y: T) {
        *self = Self::new(x, y);
    }

    /// The components as an array.
    #[inline]
    pub fn as_array(&self) -> &[T; 2] {
        self.inner.row_const::<0>()
    }

    /// Converts the vector to 3D by appending the given z-component.
    #[inline]
    pub fn extended(&self, z: T) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), z)
    }

    /// Converts the vector to 4D by appending the given z- and w-components.
    #[inline]
    pub fn extended_twice(&self, z: T, w: T) -> Vector4<T> {
        Vector4::new(self.x(), self.y(), z, w)
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        dot(self, other)
    }

    /// Computes the z-component of the cross product of the two vectors
    /// extended to 3D.
    #[inline]
    pub fn cross_2d(&self, other: &Self) -> T {
        cross_2d(self, other)
    }
}

impl<T: Scalar> Vector3<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self::from_array([x, y, z])
    }

    /// Creates a new vector from the given array of components.
    #[inline]
    pub const fn from_array(components: [T; 3]) -> Self {
        Self {
            inner: Container::from_rows([components]),
        }
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub fn zeros() -> Self {
        Self::same(T::ZERO)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub fn same(value: T) -> Self {
        Self::new(value, value, value)
    }

    /// Creates a 3D vector from a 2D vector and a z-component.
    #[inline]
    pub fn from_vector2(xy: &Vector2<T>, z: T) -> Self {
        xy.extended(z)
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: T, y: T, z: T) {
        *self = Self::new(x, y, z);
    }

    /// The components as an array.
    #[inline]
    pub fn as_array(&self) -> &[T; 3] {
        self.inner.row_const::<0>()
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub fn extended(&self, w: T) -> Vector4<T> {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    /// The x- and y-components.
    #[inline]
    pub fn xy(&self) -> Vector2<T> {
        Vector2::new(self.x(), self.y())
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        dot(self, other)
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        cross(self, other)
    }
}

impl<T: Scalar> Vector4<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self::from_array([x, y, z, w])
    }

    /// Creates a new vector from the given array of components.
    #[inline]
    pub const fn from_array(components: [T; 4]) -> Self {
        Self {
            inner: Container::from_rows([components]),
        }
    }

    /// Creates a new vector with all zeros. Note that this differs from
    /// [`Default`], which sets `w` to one.
    #[inline]
    pub fn zeros() -> Self {
        Self::same(T::ZERO)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub fn same(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates a 4D vector from a 3D vector and a w-component.
    #[inline]
    pub fn from_vector3(xyz: &Vector3<T>, w: T) -> Self {
        xyz.extended(w)
    }

    /// Creates a 4D vector from a 2D vector and z- and w-components.
    #[inline]
    pub fn from_vector2(xy: &Vector2<T>, z: T, w: T) -> Self {
        xy.extended_twice(z, w)
    }

    /// Overwrites all components.
    #[inline]
    pub fn set(&mut self, x: T, y: T, z: T, w: T) {
        *self = Self::new(x, y, z, w);
    }

    /// The components as an array.
    #[inline]
    pub fn as_array(&self) -> &[T; 4] {
        self.inner.row_const::<0>()
    }

    /// The x-, y- and z-components.
    #[inline]
    pub fn xyz(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Computes the dot product of this vector with another.
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        dot(self, other)
    }
}

impl<T: Scalar> Default for Vector2<T> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Scalar> Default for Vector3<T> {
    fn default() -> Self {
        Self::zeros()
    }
}

/// A homogeneous point at the origin, `(0, 0, 0, 1)`.
impl<T: Scalar> Default for Vector4<T> {
    fn default() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }
}

macro_rules! impl_array_conversion_and_indexing {
    ($t:ident, $n:literal) => {
        impl<T: Scalar> From<[T; $n]> for $t<T> {
            #[inline]
            fn from(components: [T; $n]) -> Self {
                Self::from_array(components)
            }
        }

        impl<T: Scalar> From<$t<T>> for [T; $n] {
            #[inline]
            fn from(vector: $t<T>) -> Self {
                *vector.as_array()
            }
        }

        impl<T: Scalar> Index<usize> for $t<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.inner.row_const::<0>()[index]
            }
        }

        impl<T: Scalar> IndexMut<usize> for $t<T> {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.inner.row_mut(0)[index]
            }
        }
    };
}

impl_array_conversion_and_indexing!(Vector2, 2);
impl_array_conversion_and_indexing!(Vector3, 3);
impl_array_conversion_and_indexing!(Vector4, 4);

impl_container_view!(Vector2, 1, 2);
impl_container_view!(Vector3, 1, 3);
impl_container_view!(Vector4, 1, 4);

impl<F: Float> Vector2<F> {
    /// Computes the length of the vector.
    #[inline]
    pub fn length(&self) -> F {
        length(self)
    }

    /// Computes the normalized version of the vector. The zero vector stays
    /// zero.
    #[inline]
    pub fn normalized(&self) -> Self {
        normalize(self)
    }
}

impl<F: Float> Vector3<F> {
    /// Computes the length of the vector.
    #[inline]
    pub fn length(&self) -> F {
        length(self)
    }

    /// Computes the normalized version of the vector. The zero vector stays
    /// zero.
    #[inline]
    pub fn normalized(&self) -> Self {
        normalize(self)
    }
}

impl<F: Float> Vector4<F> {
    /// Computes the length of the vector.
    #[inline]
    pub fn length(&self) -> F {
        length(self)
    }

    /// Computes the normalized version of the vector. The zero vector stays
    /// zero.
    #[inline]
    pub fn normalized(&self) -> Self {
        normalize(self)
    }
}

/// Computes the sum of the products of corresponding elements. Both operands
/// must have the same type, so the shapes always match.
pub fn dot<T, V, const R: usize, const C: usize>(a: &V, b: &V) -> T
where
    T: Scalar,
    V: NumericContainer<T, R, C>,
{
    a.as_container()
        .iter()
        .zip(b.as_container().iter())
        .fold(T::ZERO, |sum, (a, b)| sum + a * b)
}

/// Computes the cross product of two 3D vectors.
#[inline]
pub fn cross<T: Scalar>(a: &Vector3<T>, b: &Vector3<T>) -> Vector3<T> {
    Vector3::new(
        a.y() * b.z() - a.z() * b.y(),
        a.z() * b.x() - a.x() * b.z(),
        a.x() * b.y() - a.y() * b.x(),
    )
}

/// Computes `a.x * b.y - a.y * b.x`, the z-component of the cross product of
/// two 2D vectors lying in the xy-plane.
#[inline]
pub fn cross_2d<T: Scalar>(a: &Vector2<T>, b: &Vector2<T>) -> T {
    a.x() * b.y() - a.y() * b.x()
}

/// Computes the squared length, i.e. the dot product with itself.
#[inline]
pub fn length_squared<T, V, const R: usize, const C: usize>(v: &V) -> T
where
    T: Scalar,
    V: NumericContainer<T, R, C>,
{
    dot(v, v)
}

/// Computes the length.
#[inline]
pub fn length<F, V, const R: usize, const C: usize>(v: &V) -> F
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    length_squared(v).sqrt()
}

/// Returns `v` divided by its length. The divisor is bounded below by
/// [`Float::MIN_NORMALIZATION_LENGTH`], so a zero vector stays zero instead of
/// becoming NaN.
pub fn normalize<F, V, const R: usize, const C: usize>(v: &V) -> V
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    let divisor = length(v).max(F::MIN_NORMALIZATION_LENGTH);
    V::from_container(v.as_container().divided(&ScalarOperand(divisor)))
}

/// Normalizes `v` in place, with the same zero handling as [`normalize`].
#[inline]
pub fn normalize_in_place<F, V, const R: usize, const C: usize>(v: &mut V)
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    *v = normalize(v);
}

/// Clamps every element to `[min, max]`.
pub fn clamp<T, V, const R: usize, const C: usize>(v: &V, min: T, max: T) -> V
where
    T: Scalar,
    V: NumericContainer<T, R, C>,
{
    V::from_container(
        v.as_container()
            .mapped(|value| value.max_with(min).min_with(max)),
    )
}

/// Clamps every element to `[0, 1]`.
#[inline]
pub fn saturate<F, V, const R: usize, const C: usize>(v: &V) -> V
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    clamp(v, F::ZERO, F::ONE)
}

/// Linearly interpolates between `a` (at `t = 0`) and `b` (at `t = 1`).
pub fn lerp<F, V, const R: usize, const C: usize>(a: &V, b: &V, t: F) -> V
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    let (a, b) = (a.as_container(), b.as_container());
    V::from_container(*a + (*b - *a) * t)
}

/// Computes the angle in radians between two vectors, in `[0, PI]`.
///
/// The cosine is clamped to `[-1, 1]` before taking the arccosine, so
/// rounding never produces NaN for parallel vectors. Zero vectors give NaN.
pub fn angle_between<F, V, const R: usize, const C: usize>(a: &V, b: &V) -> F
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    let cosine = dot(a, b) / (length(a) * length(b));
    cosine.max(F::NEG_ONE).min(F::ONE).acos()
}

/// Projects `v` onto the line spanned by `onto`.
pub fn project<F, V, const R: usize, const C: usize>(v: &V, onto: &V) -> V
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    let scale = dot(v, onto) / length_squared(onto);
    V::from_container(*onto.as_container() * scale)
}

/// Reflects `v` about the plane with the given unit normal.
pub fn reflect<F, V, const R: usize, const C: usize>(v: &V, normal: &V) -> V
where
    F: Float,
    V: NumericContainer<F, R, C>,
{
    let scale = F::TWO * dot(v, normal);
    V::from_container(*v.as_container() - *normal.as_container() * scale)
}
