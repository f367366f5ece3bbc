//! Utility macros.

macro_rules! impl_binop {
    ([$($generics:tt)*] $op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for &'a $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for &$tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                ::std::ops::$op::$method(self, &rhs)
            }
        }

        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                ::std::ops::$op::$method(&self, rhs)
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                ::std::ops::$op::$method(&self, &rhs)
            }
        }
    };
}

macro_rules! impl_unary_op {
    ([$($generics:tt)*] $op:ident, $method:ident, $t:ty, $to:ty, |$this:ident| $body:block) => {
        impl<$($generics)*> ::std::ops::$op for &$t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                let $this = self;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op for $t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                ::std::ops::$op::$method(&self)
            }
        }
    };
}

macro_rules! impl_binop_assign {
    ([$($generics:tt)*] $op:ident, $method:ident, $tl:ty, $tr:ty, |$lhs:ident, $rhs:ident| $body:block) => {
        impl<$($generics)*> ::std::ops::$op<&$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: &$tr) {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl {
            #[inline]
            fn $method(&mut self, rhs: $tr) {
                ::std::ops::$op::$method(self, &rhs);
            }
        }
    };
}

macro_rules! impl_abs_diff_eq {
    ([$($generics:tt)*] $t:ty, $eps:ty, |$arg1:ident, $arg2:ident, $arg3:ident| $body:block) => {
        impl<$($generics)*> ::approx::AbsDiffEq for $t {
            type Epsilon = $eps;

            fn default_epsilon() -> Self::Epsilon {
                <$eps as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                $body
            }
        }
    };
}

macro_rules! impl_relative_eq {
    ([$($generics:tt)*] $t:ty, $eps:ty, |$arg1:ident, $arg2:ident, $arg3:ident, $arg4:ident| $body:block) => {
        impl<$($generics)*> ::approx::RelativeEq for $t {
            fn default_max_relative() -> Self::Epsilon {
                <$eps as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                let $arg4 = max_relative;
                $body
            }
        }
    };
}

/// Implements everything a typed view over a
/// [`Container`](crate::container::Container) shares with the other views:
/// the [`NumericContainer`](crate::container::NumericContainer) and
/// [`Operand`](crate::container::Operand) traits, dereferencing to the
/// container, the elementwise operations with typed return values, the
/// arithmetic operators, approximate comparison, formatting and byte
/// casting. The type must be a `#[repr(transparent)]` struct with a single
/// field named `inner` holding the container.
macro_rules! impl_container_view {
    ($t:ident, $rows:literal, $cols:literal) => {
        impl<T: $crate::num::Scalar> $crate::container::NumericContainer<T, $rows, $cols> for $t<T> {
            #[inline]
            fn as_container(&self) -> &$crate::container::Container<T, $rows, $cols> {
                &self.inner
            }

            #[inline]
            fn as_container_mut(&mut self) -> &mut $crate::container::Container<T, $rows, $cols> {
                &mut self.inner
            }

            #[inline]
            fn from_container(inner: $crate::container::Container<T, $rows, $cols>) -> Self {
                Self { inner }
            }
        }

        impl<T: $crate::num::Scalar> $crate::container::Operand<T> for $t<T> {
            #[inline]
            fn shape(&self) -> Option<(usize, usize)> {
                Some(($rows, $cols))
            }

            #[inline]
            fn value_at(&self, row: usize, col: usize) -> T {
                self.inner.get(row, col)
            }
        }

        impl<T> ::std::ops::Deref for $t<T> {
            type Target = $crate::container::Container<T, $rows, $cols>;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl<T> ::std::ops::DerefMut for $t<T> {
            #[inline]
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.inner
            }
        }

        impl<T: $crate::num::Scalar> From<$crate::container::Container<T, $rows, $cols>> for $t<T> {
            #[inline]
            fn from(inner: $crate::container::Container<T, $rows, $cols>) -> Self {
                Self { inner }
            }
        }

        impl<T: $crate::num::Scalar> From<$t<T>> for $crate::container::Container<T, $rows, $cols> {
            #[inline]
            fn from(view: $t<T>) -> Self {
                view.inner
            }
        }

        impl<T: $crate::num::Scalar> $t<T> {
            /// Returns a copy with `rhs` added to the elements it overlaps.
            #[inline]
            pub fn added(&self, rhs: &(impl $crate::container::Operand<T> + ?Sized)) -> Self {
                Self { inner: self.inner.added(rhs) }
            }

            /// Returns a copy with `rhs` subtracted from the elements it
            /// overlaps.
            #[inline]
            pub fn subtracted(&self, rhs: &(impl $crate::container::Operand<T> + ?Sized)) -> Self {
                Self { inner: self.inner.subtracted(rhs) }
            }

            /// Returns a copy with the elements overlapped by `rhs` multiplied
            /// by it.
            #[inline]
            pub fn multiplied(&self, rhs: &(impl $crate::container::Operand<T> + ?Sized)) -> Self {
                Self { inner: self.inner.multiplied(rhs) }
            }

            /// Returns a copy with the elements overlapped by `rhs` divided by
            /// it.
            #[inline]
            pub fn divided(&self, rhs: &(impl $crate::container::Operand<T> + ?Sized)) -> Self {
                Self { inner: self.inner.divided(rhs) }
            }

            /// Returns a copy with the given closure applied to each element.
            #[inline]
            pub fn mapped(&self, f: impl FnMut(T) -> T) -> Self {
                Self { inner: self.inner.mapped(f) }
            }

            /// Returns a copy with every element negated.
            #[inline]
            pub fn negated(&self) -> Self
            where
                T: ::std::ops::Neg<Output = T>,
            {
                Self { inner: self.inner.negated() }
            }
        }

        impl<T: $crate::num::Integer> $t<T> {
            /// Returns a copy with the elements overlapped by `rhs` replaced
            /// by their remainder after division by it.
            #[inline]
            pub fn remainder(&self, rhs: &(impl $crate::container::Operand<T> + ?Sized)) -> Self {
                Self { inner: self.inner.remainder(rhs) }
            }
        }

        impl_binop!([T: $crate::num::Scalar] Add, add, $t<T>, $t<T>, $t<T>, |a, b| {
            a.added(b)
        });

        impl_binop!([T: $crate::num::Scalar] Sub, sub, $t<T>, $t<T>, $t<T>, |a, b| {
            a.subtracted(b)
        });

        impl_binop!([T: $crate::num::Scalar] Mul, mul, $t<T>, T, $t<T>, |a, b| {
            a.multiplied(&$crate::container::ScalarOperand(*b))
        });

        impl_binop!([T: $crate::num::Scalar] Div, div, $t<T>, T, $t<T>, |a, b| {
            a.divided(&$crate::container::ScalarOperand(*b))
        });

        impl_binop!([T: $crate::num::Integer] Rem, rem, $t<T>, T, $t<T>, |a, b| {
            a.remainder(&$crate::container::ScalarOperand(*b))
        });

        impl_binop!([] Mul, mul, f32, $t<f32>, $t<f32>, |a, b| { ::std::ops::Mul::mul(b, *a) });
        impl_binop!([] Mul, mul, f64, $t<f64>, $t<f64>, |a, b| { ::std::ops::Mul::mul(b, *a) });
        impl_binop!([] Mul, mul, i32, $t<i32>, $t<i32>, |a, b| { ::std::ops::Mul::mul(b, *a) });
        impl_binop!([] Mul, mul, u32, $t<u32>, $t<u32>, |a, b| { ::std::ops::Mul::mul(b, *a) });

        impl_binop_assign!([T: $crate::num::Scalar] AddAssign, add_assign, $t<T>, $t<T>, |a, b| {
            a.inner.add_in_place(b);
        });

        impl_binop_assign!([T: $crate::num::Scalar] SubAssign, sub_assign, $t<T>, $t<T>, |a, b| {
            a.inner.subtract_in_place(b);
        });

        impl_binop_assign!([T: $crate::num::Scalar] MulAssign, mul_assign, $t<T>, T, |a, b| {
            a.inner.multiply_in_place(&$crate::container::ScalarOperand(*b));
        });

        impl_binop_assign!([T: $crate::num::Scalar] DivAssign, div_assign, $t<T>, T, |a, b| {
            a.inner.divide_in_place(&$crate::container::ScalarOperand(*b));
        });

        impl_binop_assign!([T: $crate::num::Integer] RemAssign, rem_assign, $t<T>, T, |a, b| {
            a.inner.remainder_in_place(&$crate::container::ScalarOperand(*b));
        });

        impl_unary_op!([T: $crate::num::Scalar + ::std::ops::Neg<Output = T>] Neg, neg, $t<T>, $t<T>, |val| {
            val.negated()
        });

        impl_abs_diff_eq!([F: $crate::num::Float] $t<F>, F, |a, b, epsilon| {
            ::approx::AbsDiffEq::abs_diff_eq(&a.inner, &b.inner, epsilon)
        });

        impl_relative_eq!([F: $crate::num::Float] $t<F>, F, |a, b, epsilon, max_relative| {
            ::approx::RelativeEq::relative_eq(&a.inner, &b.inner, epsilon, max_relative)
        });

        impl<T: $crate::num::Scalar> ::std::fmt::Display for $t<T> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.inner, f)
            }
        }

        // SAFETY: The view is a transparent wrapper around a `Pod` container.
        unsafe impl<T: ::bytemuck::Pod> ::bytemuck::Zeroable for $t<T> {}
        unsafe impl<T: ::bytemuck::Pod> ::bytemuck::Pod for $t<T> {}

        #[cfg(feature = "serde")]
        impl<T: $crate::num::Scalar + ::serde::Serialize> ::serde::Serialize for $t<T> {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.inner, serializer)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de, T: $crate::num::Scalar + ::serde::Deserialize<'de>> ::serde::Deserialize<'de> for $t<T> {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$crate::container::Container<T, $rows, $cols> as ::serde::Deserialize<'de>>::deserialize(deserializer)
                    .map(|inner| Self { inner })
            }
        }
    };
}
