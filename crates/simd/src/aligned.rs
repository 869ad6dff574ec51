//! Over-aligned storage for aligned loads and stores
//!
//! [`Aligned`] guarantees 32-byte alignment, which satisfies the natural
//! alignment of every register kind. [`Vector::load`](crate::Vector::load)
//! and [`Vector::store`](crate::Vector::store) take it by reference so the
//! aligned instructions can be used without `unsafe`.

use core::ops::{Deref, DerefMut};

/// A value stored at a 32-byte boundary
///
/// ```rust
/// use solid_simd::{Aligned, Float256, Vector};
///
/// let buf = Aligned([1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
/// let v = Vector::<Float256>::load(&buf);
/// assert_eq!(v.horizontal_sum(), 36.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(C, align(32))]
pub struct Aligned<T>(pub T);

impl<T> Aligned<T> {
    /// Wrap a value
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Unwrap the value
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Aligned<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Aligned<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Aligned<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}
