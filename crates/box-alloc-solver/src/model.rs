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

use box_alloc_core::prelude::{Cost, Hours};
use box_alloc_model::prelude::{ContainerCatalog, RegionName, RegionPrices};

/// A container that can be used in the region being solved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    catalog_index: usize,
    volume: usize,
    unit_cost: Cost,
}

impl Candidate {
    #[inline]
    pub fn new(catalog_index: usize, volume: usize, unit_cost: Cost) -> Self {
        Self {
            catalog_index,
            volume,
            unit_cost,
        }
    }

    #[inline]
    pub fn catalog_index(&self) -> usize {
        self.catalog_index
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.volume
    }

    /// Cost of one container for the whole rental duration.
    #[inline]
    pub fn unit_cost(&self) -> Cost {
        self.unit_cost
    }
}

/// The usable part of the catalog for one region, in catalog order.
#[derive(Debug, Clone)]
pub struct RegionModel<'p> {
    region: &'p RegionName,
    candidates: Vec<Candidate>,
}

impl<'p> RegionModel<'p> {
    pub fn new(
        region: &'p RegionName,
        catalog: &ContainerCatalog,
        prices: &RegionPrices,
        duration: Hours,
    ) -> Self {
        let candidates = catalog
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let rate = prices.rate_of(c.name().as_str())?;
                // A volume beyond usize can never fit under an addressable capacity.
                let volume = c.volume().to_usize()?;
                Some(Candidate::new(i, volume, rate.for_duration(duration)))
            })
            .collect();

        Self { region, candidates }
    }

    #[inline]
    pub fn region(&self) -> &'p RegionName {
        self.region
    }

    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_alloc_core::prelude::Volume;
    use box_alloc_model::prelude::{Container, Price};

    fn catalog() -> ContainerCatalog {
        ContainerCatalog::from_containers([
            Container::new("XXL", Volume::new(320)),
            Container::new("XL", Volume::new(160)),
            Container::new("M", Volume::new(40)),
            Container::new("XS", Volume::new(10)),
        ])
        .unwrap()
    }

    #[test]
    fn test_filters_absent_and_unavailable_in_catalog_order() {
        let region = RegionName::from("Kolkata");
        let prices = RegionPrices::new()
            .with("XS", Price::per_hour(11.0))
            .with("XL", Price::per_hour(118.0))
            .with("XXL", Price::Unavailable);
        let model = RegionModel::new(&region, &catalog(), &prices, Hours::new(1));

        let idx: Vec<_> = model.candidates().iter().map(|c| c.catalog_index()).collect();
        assert_eq!(idx, vec![1, 3]);
        assert_eq!(model.candidates()[0].volume(), 160);
        assert_eq!(model.candidates()[0].unit_cost(), Cost::new(118.0));
        assert_eq!(model.region().as_str(), "Kolkata");
    }

    #[test]
    fn test_unit_cost_includes_duration() {
        let region = RegionName::from("Delhi");
        let prices = RegionPrices::new().with("M", Price::per_hour(45.0));
        let model = RegionModel::new(&region, &catalog(), &prices, Hours::new(3));
        assert_eq!(model.len(), 1);
        assert_eq!(model.candidates()[0].unit_cost(), Cost::new(135.0));
    }

    #[test]
    fn test_empty_prices_yield_empty_model() {
        let region = RegionName::from("Nowhere");
        let model = RegionModel::new(&region, &catalog(), &RegionPrices::new(), Hours::new(1));
        assert!(model.is_empty());
    }
}
