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

//! Dynamic-programming table over the sub-capacities `0..=capacity`.
//!
//! `best[j]` holds the cheapest known way to fill exactly `j` units and
//! `back[j]` the last container added on that way together with the
//! sub-capacity it was added to. Only the back-pointers are stored; the
//! actual combination is replayed once by [`crate::trace`].

use crate::model::Candidate;
use box_alloc_core::prelude::Cost;
use num_traits::Zero;
use std::alloc::Layout;

/// The table for a capacity cannot be represented in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSizeError {
    capacity: usize,
}

impl TableSizeError {
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Display for TableSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot allocate a cost table for capacity {}", self.capacity)
    }
}

impl std::error::Error for TableSizeError {}

/// The last step on the cheapest known way to a sub-capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackStep {
    candidate: usize,
    predecessor: usize,
}

impl BackStep {
    #[inline]
    pub fn new(candidate: usize, predecessor: usize) -> Self {
        Self {
            candidate,
            predecessor,
        }
    }

    /// Index into the region's candidate list.
    #[inline]
    pub fn candidate(&self) -> usize {
        self.candidate
    }

    #[inline]
    pub fn predecessor(&self) -> usize {
        self.predecessor
    }
}

#[derive(Debug, Clone)]
pub struct CostTable {
    best: Vec<Option<Cost>>,
    back: Vec<Option<BackStep>>,
}

impl CostTable {
    /// Number of entries a table for `capacity` needs, provided the layout
    /// of such a table is representable at all.
    pub fn entries_for(capacity: usize) -> Result<usize, TableSizeError> {
        let err = TableSizeError::new(capacity);
        let len = capacity.checked_add(1).ok_or(err)?;
        Layout::array::<Option<Cost>>(len)
            .and(Layout::array::<Option<BackStep>>(len))
            .map_err(|_| err)?;
        Ok(len)
    }

    /// Fills the table for `capacity` using unbounded copies of `candidates`.
    ///
    /// Sub-capacities are visited in increasing order and candidates in
    /// their given order. An entry is only replaced by a strictly cheaper
    /// one, so among equal-cost combinations the first one found is kept.
    ///
    /// Fails instead of aborting when the table cannot be allocated.
    pub fn try_build(capacity: usize, candidates: &[Candidate]) -> Result<Self, TableSizeError> {
        let len = Self::entries_for(capacity)?;
        let err = TableSizeError::new(capacity);

        let mut best: Vec<Option<Cost>> = Vec::new();
        best.try_reserve_exact(len).map_err(|_| err)?;
        best.resize(len, None);
        let mut back: Vec<Option<BackStep>> = Vec::new();
        back.try_reserve_exact(len).map_err(|_| err)?;
        back.resize(len, None);
        best[0] = Some(Cost::zero());

        for j in 0..=capacity {
            let Some(base) = best[j] else {
                continue;
            };
            for (i, cand) in candidates.iter().enumerate() {
                let Some(next) = j.checked_add(cand.volume()) else {
                    continue;
                };
                if next > capacity {
                    continue;
                }
                let cost = base + cand.unit_cost();
                if best[next].is_none_or(|known| cost < known) {
                    best[next] = Some(cost);
                    back[next] = Some(BackStep::new(i, j));
                }
            }
        }

        Ok(Self { best, back })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.best.len() - 1
    }

    #[inline]
    pub fn best(&self, j: usize) -> Option<Cost> {
        self.best.get(j).copied().flatten()
    }

    #[inline]
    pub fn back_step(&self, j: usize) -> Option<BackStep> {
        self.back.get(j).copied().flatten()
    }

    #[inline]
    pub fn is_reachable(&self, j: usize) -> bool {
        self.best(j).is_some()
    }

    /// Cost of filling the full capacity, if it can be filled at all.
    #[inline]
    pub fn optimum(&self) -> Option<Cost> {
        self.best(self.capacity())
    }

    #[inline]
    pub fn reachable_len(&self) -> usize {
        self.best.iter().filter(|b| b.is_some()).count()
    }
}
