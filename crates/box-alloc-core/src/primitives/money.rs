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

//! Hourly rates and accumulated costs.
//!
//! Prices in real price lists are fractional (`77.4` per hour), so both
//! [`Rate`] and [`Cost`] wrap an `f64`. A [`Rate`] is always positive and
//! finite; a [`Cost`] is always finite and non-negative when built from rates.

use crate::primitives::Hours;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

/// Largest magnitude below which every integer is exactly representable in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    /// Returns `None` unless `per_hour` is positive and finite.
    #[inline]
    pub fn new(per_hour: f64) -> Option<Self> {
        (per_hour.is_finite() && per_hour > 0.0).then_some(Self(per_hour))
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Cost of renting one container at this rate for `hours`.
    #[inline]
    pub fn for_duration(self, hours: Hours) -> Cost {
        Cost::new(self.0 * hours.value() as f64)
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rate({}/h)", self.0)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Rate::new(raw).ok_or_else(|| {
            de::Error::custom(format!("hourly rate must be positive and finite, got {raw}"))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Cost(f64);

impl Cost {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn times(self, count: u64) -> Self {
        Self(self.0 * count as f64)
    }

    #[inline]
    pub fn is_integral(&self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER
    }

    /// Compares two costs with a relative tolerance, falling back to an
    /// absolute one near zero.
    #[inline]
    pub fn approx_eq(&self, other: Cost, rel_tol: f64) -> bool {
        let diff = (self.0 - other.0).abs();
        let scale = self.0.abs().max(other.0.abs()).max(1.0);
        diff <= rel_tol * scale
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    #[inline]
    fn add_assign(&mut self, rhs: Cost) {
        self.0 += rhs.0;
    }
}

impl Zero for Cost {
    #[inline]
    fn zero() -> Self {
        Cost(0.0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Sum for Cost {
    #[inline]
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::zero(), |acc, c| acc + c)
    }
}

/// Integral costs are written as JSON integers (`1015`), everything else as a float.
impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_integral() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}
