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

use crate::problem::err::InvalidArgumentError;
use box_alloc_core::prelude::{Hours, Volume};

/// How long the containers are rented for and how much volume they must add up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolveRequest {
    duration: Hours,
    capacity: Volume,
}

impl SolveRequest {
    #[inline]
    pub fn new(duration: Hours, capacity: Volume) -> Self {
        Self { duration, capacity }
    }

    /// Validates raw caller input. The duration is checked before the capacity.
    pub fn from_signed(duration: i64, capacity: i64) -> Result<Self, InvalidArgumentError> {
        if duration < 0 {
            return Err(InvalidArgumentError::NegativeDuration(duration));
        }
        if capacity < 0 {
            return Err(InvalidArgumentError::NegativeCapacity(capacity));
        }
        Ok(Self::new(
            Hours::new(duration as u64),
            Volume::new(capacity as u64),
        ))
    }

    #[inline]
    pub fn duration(&self) -> Hours {
        self.duration
    }

    #[inline]
    pub fn capacity(&self) -> Volume {
        self.capacity
    }
}

impl std::fmt::Display for SolveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolveRequest({}, {})", self.duration, self.capacity)
    }
}

impl TryFrom<(i64, i64)> for SolveRequest {
    type Error = InvalidArgumentError;

    #[inline]
    fn try_from((duration, capacity): (i64, i64)) -> Result<Self, Self::Error> {
        Self::from_signed(duration, capacity)
    }
}
