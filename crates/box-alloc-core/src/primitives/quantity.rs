// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
};

pub trait MarkerName {
    const NAME: &'static str;
}

/// A non-negative amount of some unit, tagged by a marker type so that
/// volumes and hours cannot be mixed up.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity<T, U>(T, core::marker::PhantomData<U>);

impl<T, U> Quantity<T, U> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Quantity(value, core::marker::PhantomData)
    }

    #[inline]
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Quantity::new(T::zero())
    }

    #[inline]
    pub const fn value(&self) -> T
    where
        T: Copy,
    {
        self.0
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool
    where
        T: Zero,
    {
        self.0.is_zero()
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self>
    where
        T: CheckedAdd,
    {
        self.0.checked_add(&rhs.0).map(Quantity::new)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self>
    where
        T: CheckedSub,
    {
        self.0.checked_sub(&rhs.0).map(Quantity::new)
    }

    #[inline]
    pub fn checked_scale(self, factor: T) -> Option<Self>
    where
        T: CheckedMul,
    {
        self.0.checked_mul(&factor).map(Quantity::new)
    }

    /// Converts the quantity into a table index, if it fits.
    #[inline]
    pub fn to_usize(&self) -> Option<usize>
    where
        T: ToPrimitive,
    {
        self.0.to_usize()
    }
}

impl<T: std::fmt::Display, U: MarkerName> std::fmt::Display for Quantity<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

impl<T: Zero, U> Default for Quantity<T, U> {
    #[inline]
    fn default() -> Self {
        Quantity::new(T::zero())
    }
}

impl<T, U> From<T> for Quantity<T, U> {
    #[inline]
    fn from(value: T) -> Self {
        Quantity::new(value)
    }
}

impl<T: CheckedAdd, U> Add for Quantity<T, U> {
    type Output = Quantity<T, U>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Quantity::new(
            self.0
                .checked_add(&rhs.0)
                .expect("overflow in Quantity + Quantity"),
        )
    }
}

impl<T: CheckedAdd, U> AddAssign for Quantity<T, U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_add(&rhs.0)
            .expect("overflow in Quantity += Quantity");
    }
}

impl<T: CheckedSub, U> Sub for Quantity<T, U> {
    type Output = Quantity<T, U>;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Quantity::new(
            self.0
                .checked_sub(&rhs.0)
                .expect("underflow in Quantity - Quantity"),
        )
    }
}

impl<T: CheckedMul, U> Mul<T> for Quantity<T, U> {
    type Output = Quantity<T, U>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        Quantity::new(
            self.0
                .checked_mul(&rhs)
                .expect("overflow in Quantity * scalar"),
        )
    }
}

impl<T: CheckedAdd + Zero, U> Sum for Quantity<T, U> {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

impl<T: Serialize, U> Serialize for Quantity<T, U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, U> Deserialize<'de> for Quantity<T, U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Quantity::new)
    }
}
