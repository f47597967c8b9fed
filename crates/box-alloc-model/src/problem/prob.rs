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
    container::ContainerCatalog,
    err::{ProblemError, UnknownContainerError},
    price::PriceTable,
};
use serde::Serialize;

/// A catalog together with the price table that refers to it.
///
/// Every container named in a price row must exist in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Problem {
    containers: ContainerCatalog,
    regions: PriceTable,
}

impl Problem {
    pub fn new(containers: ContainerCatalog, regions: PriceTable) -> Result<Self, ProblemError> {
        for (region, prices) in regions.iter() {
            for (name, _) in prices.iter() {
                if !containers.contains(name.as_str()) {
                    return Err(ProblemError::from(UnknownContainerError::new(
                        region.clone(),
                        name.clone(),
                    )));
                }
            }
        }

        Ok(Self {
            containers,
            regions,
        })
    }

    #[inline]
    pub fn catalog(&self) -> &ContainerCatalog {
        &self.containers
    }

    #[inline]
    pub fn prices(&self) -> &PriceTable {
        &self.regions
    }

    #[inline]
    pub fn regions_len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn containers_len(&self) -> usize {
        self.containers.len()
    }

    #[inline]
    pub fn into_parts(self) -> (ContainerCatalog, PriceTable) {
        (self.containers, self.regions)
    }
}
