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

use crate::problem::{ContainerName, RegionName, container::ContainerCatalog};
use box_alloc_core::prelude::{Cost, Volume};
use serde::{Serialize, Serializer, ser::SerializeMap};

/// Written in place of a cost when no combination reaches the capacity.
pub const NO_SOLUTION: &str = "No solution";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TotalCost {
    Cost(Cost),
    Unsatisfiable,
}

impl TotalCost {
    #[inline]
    pub fn cost(&self) -> Option<Cost> {
        match self {
            TotalCost::Cost(c) => Some(*c),
            TotalCost::Unsatisfiable => None,
        }
    }

    #[inline]
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, TotalCost::Cost(_))
    }
}

impl std::fmt::Display for TotalCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TotalCost::Cost(c) => write!(f, "{}", c),
            TotalCost::Unsatisfiable => f.write_str(NO_SOLUTION),
        }
    }
}

impl Serialize for TotalCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TotalCost::Cost(c) => c.serialize(serializer),
            TotalCost::Unsatisfiable => serializer.serialize_str(NO_SOLUTION),
        }
    }
}

/// How many containers of each kind were chosen.
///
/// Entries keep the order in which they were added and zero counts are never
/// stored, so an empty value means "nothing chosen".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerCounts(Vec<(ContainerName, u64)>);

impl ContainerCounts {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` containers of `name`, merging with an existing entry.
    pub fn add(&mut self, name: impl Into<ContainerName>, count: u64) {
        if count == 0 {
            return;
        }
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, c)) => *c += count,
            None => self.0.push((name, count)),
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> u64 {
        self.0
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map_or(0, |(_, c)| *c)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ContainerName, u64)> {
        self.0.iter().map(|(n, c)| (n, *c))
    }

    #[inline]
    pub fn total_containers(&self) -> u64 {
        self.0.iter().map(|(_, c)| *c).sum()
    }

    /// Sum of `count * volume`; `None` if a name is missing from `catalog`
    /// or the sum overflows.
    pub fn total_volume(&self, catalog: &ContainerCatalog) -> Option<Volume> {
        self.0.iter().try_fold(Volume::zero(), |acc, (name, count)| {
            let v = catalog.find(name.as_str())?.volume().checked_scale(*count)?;
            acc.checked_add(v)
        })
    }
}

impl<N: Into<ContainerName>> FromIterator<(N, u64)> for ContainerCounts {
    fn from_iter<I: IntoIterator<Item = (N, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (n, c) in iter {
            counts.add(n, c);
        }
        counts
    }
}

impl Serialize for ContainerCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAllocation {
    region: RegionName,
    total_cost: TotalCost,
    boxes: ContainerCounts,
}

impl RegionAllocation {
    #[inline]
    pub fn satisfied(region: RegionName, cost: Cost, boxes: ContainerCounts) -> Self {
        Self {
            region,
            total_cost: TotalCost::Cost(cost),
            boxes,
        }
    }

    #[inline]
    pub fn unsatisfiable(region: RegionName) -> Self {
        Self {
            region,
            total_cost: TotalCost::Unsatisfiable,
            boxes: ContainerCounts::new(),
        }
    }

    #[inline]
    pub fn region(&self) -> &RegionName {
        &self.region
    }

    #[inline]
    pub fn total_cost(&self) -> TotalCost {
        self.total_cost
    }

    #[inline]
    pub fn cost(&self) -> Option<Cost> {
        self.total_cost.cost()
    }

    #[inline]
    pub fn is_satisfiable(&self) -> bool {
        self.total_cost.is_satisfiable()
    }

    #[inline]
    pub fn boxes(&self) -> &ContainerCounts {
        &self.boxes
    }
}

/// One allocation per region, in price-table order.
///
/// Serialises as `{"Output": [{"region": ..., "total_cost": ..., "boxes": {...}}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationReport {
    #[serde(rename = "Output")]
    regions: Vec<RegionAllocation>,
}

impl AllocationReport {
    #[inline]
    pub fn new(regions: Vec<RegionAllocation>) -> Self {
        Self { regions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RegionAllocation> {
        self.regions.iter()
    }

    #[inline]
    pub fn get(&self, region: &str) -> Option<&RegionAllocation> {
        self.regions.iter().find(|a| a.region().as_str() == region)
    }

    #[inline]
    pub fn as_slice(&self) -> &[RegionAllocation] {
        &self.regions
    }

    #[inline]
    pub fn into_vec(self) -> Vec<RegionAllocation> {
        self.regions
    }
}

impl FromIterator<RegionAllocation> for AllocationReport {
    fn from_iter<I: IntoIterator<Item = RegionAllocation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AllocationReport {
    type Item = &'a RegionAllocation;
    type IntoIter = std::slice::Iter<'a, RegionAllocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
