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

pub mod err;

use crate::{
    problem::{
        container::ContainerCatalog,
        price::{PriceTable, RegionPrices},
        req::SolveRequest,
    },
    solution::{AllocationReport, RegionAllocation, TotalCost},
    validation::err::{
        AllocationValidationError, CostMismatchError, UnusableContainerError, VolumeMismatchError,
    },
};
use box_alloc_core::prelude::Cost;

/// Checks allocations against the catalog, prices and request they were
/// produced for.
///
/// The validator cannot prove optimality; it checks that a reported
/// allocation is consistent: the chosen containers exist and are offered in
/// the region, their volumes add up to exactly the requested capacity, and the
/// reported cost matches `count * rate * duration` within a relative tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationValidator {
    rel_tol: f64,
}

impl Default for AllocationValidator {
    fn default() -> Self {
        Self { rel_tol: 1e-9 }
    }
}

impl AllocationValidator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_tolerance(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    pub fn validate_region(
        &self,
        request: &SolveRequest,
        catalog: &ContainerCatalog,
        prices: &RegionPrices,
        allocation: &RegionAllocation,
    ) -> Result<(), AllocationValidationError> {
        let region = allocation.region();
        let boxes = allocation.boxes();

        let reported = match allocation.total_cost() {
            TotalCost::Unsatisfiable => {
                if !boxes.is_empty() {
                    return Err(AllocationValidationError::BoxesWithoutSolution(
                        region.clone(),
                    ));
                }
                if request.capacity().is_zero() {
                    return Err(AllocationValidationError::ZeroCapacityUnsatisfiable(
                        region.clone(),
                    ));
                }
                return Ok(());
            }
            TotalCost::Cost(c) => c,
        };

        let mut expected = Cost::new(0.0);
        for (name, count) in boxes.iter() {
            if !catalog.contains(name.as_str()) {
                return Err(AllocationValidationError::UnknownContainer(
                    region.clone(),
                    name.clone(),
                ));
            }
            let rate = prices.rate_of(name.as_str()).ok_or_else(|| {
                UnusableContainerError::new(region.clone(), name.clone())
            })?;
            expected += rate.for_duration(request.duration()).times(count);
        }

        let actual = boxes.total_volume(catalog);
        if actual != Some(request.capacity()) {
            return Err(VolumeMismatchError::new(region.clone(), request.capacity(), actual).into());
        }

        if !expected.approx_eq(reported, self.rel_tol) {
            return Err(CostMismatchError::new(region.clone(), expected, reported).into());
        }

        Ok(())
    }

    /// Validates every region and checks that the report follows the price
    /// table's region order exactly.
    pub fn validate_report(
        &self,
        request: &SolveRequest,
        catalog: &ContainerCatalog,
        table: &PriceTable,
        report: &AllocationReport,
    ) -> Result<(), AllocationValidationError> {
        let mut allocations = report.iter();
        for (region, prices) in table.iter() {
            let allocation = match allocations.next() {
                Some(a) if a.region() == region => a,
                Some(a) => {
                    return Err(AllocationValidationError::UnexpectedRegion(
                        a.region().clone(),
                    ));
                }
                None => return Err(AllocationValidationError::MissingRegion(region.clone())),
            };
            self.validate_region(request, catalog, prices, allocation)?;
        }

        if let Some(extra) = allocations.next() {
            return Err(AllocationValidationError::UnexpectedRegion(
                extra.region().clone(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::{RegionName, builder::ProblemBuilder, price::Price, prob::Problem},
        solution::ContainerCounts,
    };

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.add_container("XL", 160)
            .add_container("S", 20)
            .add_container("XS", 10);
        b.set_price("Delhi", "XL", Price::per_hour(140.0))
            .set_price("Delhi", "S", Price::per_hour(23.0))
            .set_price("Delhi", "XS", Price::per_hour(12.0))
            .set_price("Mumbai", "XL", Price::per_hour(130.0))
            .set_price("Mumbai", "S", Price::Unavailable)
            .set_price("Mumbai", "XS", Price::per_hour(14.0));
        b.build().unwrap()
    }

    fn req(duration: i64, capacity: i64) -> SolveRequest {
        SolveRequest::from_signed(duration, capacity).unwrap()
    }

    fn counts(items: &[(&str, u64)]) -> ContainerCounts {
        items.iter().copied().collect()
    }

    fn delhi(cost: f64, items: &[(&str, u64)]) -> RegionAllocation {
        RegionAllocation::satisfied(RegionName::from("Delhi"), Cost::new(cost), counts(items))
    }

    #[test]
    fn test_consistent_allocation_passes() {
        let p = problem();
        let prices = p.prices().get("Delhi").unwrap();
        let a = delhi(1015.0, &[("XL", 7), ("S", 1), ("XS", 1)]);
        AllocationValidator::new()
            .validate_region(&req(1, 1150), p.catalog(), prices, &a)
            .unwrap();

        let a = delhi(2030.0, &[("XL", 7), ("S", 1), ("XS", 1)]);
        AllocationValidator::new()
            .validate_region(&req(2, 1150), p.catalog(), prices, &a)
            .unwrap();
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let p = problem();
        let prices = p.prices().get("Delhi").unwrap();
        let a = delhi(1015.5, &[("XL", 7), ("S", 1), ("XS", 1)]);
        assert!(
            AllocationValidator::new()
                .validate_region(&req(1, 1150), p.catalog(), prices, &a)
                .is_err()
        );
        AllocationValidator::new()
            .with_tolerance(1e-3)
            .validate_region(&req(1, 1150), p.catalog(), prices, &a)
            .unwrap();
    }

    #[test]
    fn test_volume_mismatch_is_detected() {
        let p = problem();
        let prices = p.prices().get("Delhi").unwrap();
        let a = delhi(992.0, &[("XL", 7), ("XS", 1)]);
        let err = AllocationValidator::new()
            .validate_region(&req(1, 1150), p.catalog(), prices, &a)
            .unwrap_err();
        assert!(matches!(err, AllocationValidationError::VolumeMismatch(_)));
    }

    #[test]
    fn test_cost_mismatch_is_detected() {
        let p = problem();
        let prices = p.prices().get("Delhi").unwrap();
        let a = delhi(1000.0, &[("XL", 7), ("S", 1), ("XS", 1)]);
        let err = AllocationValidator::new()
            .validate_region(&req(1, 1150), p.catalog(), prices, &a)
            .unwrap_err();
        assert!(matches!(err, AllocationValidationError::CostMismatch(_)));
    }

    #[test]
    fn test_unavailable_container_is_detected() {
        let p = problem();
        let prices = p.prices().get("Mumbai").unwrap();
        let a = RegionAllocation::satisfied(
            RegionName::from("Mumbai"),
            Cost::new(153.0),
            counts(&[("XL", 1), ("S", 1)]),
        );
        let err = AllocationValidator::new()
            .validate_region(&req(1, 180), p.catalog(), prices, &a)
            .unwrap_err();
        assert!(matches!(err, AllocationValidationError::Unusable(_)));
    }

    #[test]
    fn test_unknown_container_is_detected() {
        let p = problem();
        let prices = p.prices().get("Delhi").unwrap();
        let a = delhi(1.0, &[("XXXL", 1)]);
        let err = AllocationValidator::new()
            .validate_region(&req(1, 10), p.catalog(), prices, &a)
            .unwrap_err();
        assert!(matches!(err, AllocationValidationError::UnknownContainer(..)));
    }

    #[test]
    fn test_unsatisfiable_rules() {
        let p = problem();
        let prices = p.prices().get("Delhi").unwrap();
        let none = RegionAllocation::unsatisfiable(RegionName::from("Delhi"));
        let v = AllocationValidator::new();
        assert!(v.validate_region(&req(1, 5), p.catalog(), prices, &none).is_ok());
        assert!(matches!(
            v.validate_region(&req(1, 0), p.catalog(), prices, &none),
            Err(AllocationValidationError::ZeroCapacityUnsatisfiable(_))
        ));
    }

    #[test]
    fn test_report_order_must_follow_price_table() {
        let p = problem();
        let r = req(1, 0);
        let empty = |name: &str| {
            RegionAllocation::satisfied(RegionName::from(name), Cost::new(0.0), counts(&[]))
        };
        let v = AllocationValidator::new();

        let ok = AllocationReport::new(vec![empty("Delhi"), empty("Mumbai")]);
        v.validate_report(&r, p.catalog(), p.prices(), &ok).unwrap();

        let swapped = AllocationReport::new(vec![empty("Mumbai"), empty("Delhi")]);
        assert!(matches!(
            v.validate_report(&r, p.catalog(), p.prices(), &swapped),
            Err(AllocationValidationError::UnexpectedRegion(_))
        ));

        let short = AllocationReport::new(vec![empty("Delhi")]);
        assert!(matches!(
            v.validate_report(&r, p.catalog(), p.prices(), &short),
            Err(AllocationValidationError::MissingRegion(_))
        ));

        let long = AllocationReport::new(vec![empty("Delhi"), empty("Mumbai"), empty("Pune")]);
        assert!(matches!(
            v.validate_report(&r, p.catalog(), p.prices(), &long),
            Err(AllocationValidationError::UnexpectedRegion(_))
        ));
    }
}
