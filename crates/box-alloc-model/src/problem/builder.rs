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

use crate::problem::{
    ContainerName, RegionName,
    container::{Container, ContainerCatalog},
    err::ProblemError,
    price::{Price, PriceTable, RegionPrices},
    prob::Problem,
};
use box_alloc_core::prelude::Volume;

#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    containers: Vec<Container>,
    regions: Vec<(RegionName, RegionPrices)>,
}

impl ProblemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_containers<I>(mut self, containers: I) -> Self
    where
        I: IntoIterator<Item = Container>,
    {
        self.containers.clear();
        self.containers.extend(containers);
        self
    }

    #[inline]
    pub fn add_container(&mut self, name: impl Into<ContainerName>, volume: u64) -> &mut Self {
        self.containers.push(Container::new(name, Volume::new(volume)));
        self
    }

    /// Adds a whole price row. A later row for the same region is reported
    /// as a duplicate by [`ProblemBuilder::build`].
    #[inline]
    pub fn add_region(&mut self, region: impl Into<RegionName>, prices: RegionPrices) -> &mut Self {
        self.regions.push((region.into(), prices));
        self
    }

    /// Sets a single price, creating the region at the end of the table if needed.
    pub fn set_price(
        &mut self,
        region: impl Into<RegionName>,
        container: impl Into<ContainerName>,
        price: Price,
    ) -> &mut Self {
        let region = region.into();
        match self.regions.iter_mut().find(|(r, _)| *r == region) {
            Some((_, prices)) => {
                prices.insert(container, price);
            }
            None => {
                self.regions
                    .push((region, RegionPrices::new().with(container, price)));
            }
        }
        self
    }

    pub fn build(&self) -> Result<Problem, ProblemError> {
        let catalog = ContainerCatalog::from_containers(self.containers.iter().cloned())?;
        let mut table = PriceTable::new();
        for (region, prices) in &self.regions {
            table.insert(region.clone(), prices.clone())?;
        }
        Problem::new(catalog, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_keeps_region_order() {
        let mut b = ProblemBuilder::new();
        b.add_container("XL", 160).add_container("XS", 10);
        b.set_price("Mumbai", "XL", Price::per_hour(130.0))
            .set_price("Delhi", "XL", Price::per_hour(140.0))
            .set_price("Mumbai", "XS", Price::per_hour(14.0));
        let p = b.build().unwrap();

        let order: Vec<_> = p.prices().regions().map(|r| r.as_str()).collect();
        assert_eq!(order, vec!["Mumbai", "Delhi"]);
        let mumbai = p.prices().get("Mumbai").unwrap();
        assert_eq!(mumbai.len(), 2);
    }

    #[test]
    fn test_build_reports_duplicate_regions() {
        let mut b = ProblemBuilder::new();
        b.add_container("XS", 10)
            .add_region("Delhi", RegionPrices::new())
            .add_region("Delhi", RegionPrices::new());
        assert!(matches!(b.build(), Err(ProblemError::DuplicateRegion(_))));
    }

    #[test]
    fn test_build_reports_catalog_errors() {
        let mut b = ProblemBuilder::new();
        b.add_container("XS", 10).add_container("XS", 20);
        assert!(matches!(b.build(), Err(ProblemError::Catalog(_))));
    }

    #[test]
    fn test_with_containers_replaces_previous() {
        let b = ProblemBuilder::new()
            .with_containers([Container::new("S", Volume::new(20))])
            .with_containers([Container::new("M", Volume::new(40))]);
        let p = b.build().unwrap();
        assert_eq!(p.containers_len(), 1);
        assert!(p.catalog().contains("M"));
    }
}
