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

use crate::{
    model::RegionModel,
    table::{CostTable, TableSizeError},
    trace::trace_counts,
};
use box_alloc_model::prelude::{
    AllocationReport, ContainerCatalog, ContainerCounts, InvalidArgumentError, PriceTable,
    Problem, RegionAllocation, RegionName, RegionPrices, SolveRequest,
};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverOptions {
    parallel: bool,
}

impl SolverOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve regions on the rayon pool. The report is identical either way.
    #[inline]
    pub fn parallel(mut self, yes: bool) -> Self {
        self.parallel = yes;
        self
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

/// Minimum-cost exact-capacity allocation, solved independently per region.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationSolver {
    options: SolverOptions,
}

impl AllocationSolver {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_options(options: SolverOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Solves every region of `prices`, in table order.
    ///
    /// Fails before touching any region if the capacity cannot be used as a
    /// table size.
    #[tracing::instrument(
        level = "debug",
        name = "Allocation Solve",
        skip_all,
        fields(
            duration = request.duration().value(),
            capacity = request.capacity().value(),
            regions = prices.len()
        )
    )]
    pub fn solve(
        &self,
        request: &SolveRequest,
        catalog: &ContainerCatalog,
        prices: &PriceTable,
    ) -> Result<AllocationReport, InvalidArgumentError> {
        let out_of_range = InvalidArgumentError::CapacityOutOfRange(request.capacity().value());
        let capacity = request.capacity().to_usize().ok_or(out_of_range)?;
        CostTable::entries_for(capacity).map_err(|_| out_of_range)?;

        let solve_one = |(region, region_prices): &(RegionName, RegionPrices)| {
            self.solve_region(request, capacity, catalog, region, region_prices)
                .map_err(|_| out_of_range)
        };

        let regions: Vec<RegionAllocation> = if self.options.parallel {
            prices
                .as_slice()
                .par_iter()
                .map(solve_one)
                .collect::<Result<_, _>>()?
        } else {
            prices
                .as_slice()
                .iter()
                .map(solve_one)
                .collect::<Result<_, _>>()?
        };

        let satisfied = regions.iter().filter(|r| r.is_satisfiable()).count();
        tracing::debug!("Solved {} regions, {} satisfiable", regions.len(), satisfied);

        Ok(AllocationReport::new(regions))
    }

    #[inline]
    pub fn solve_problem(
        &self,
        request: &SolveRequest,
        problem: &Problem,
    ) -> Result<AllocationReport, InvalidArgumentError> {
        self.solve(request, problem.catalog(), problem.prices())
    }

    fn solve_region(
        &self,
        request: &SolveRequest,
        capacity: usize,
        catalog: &ContainerCatalog,
        region: &RegionName,
        prices: &RegionPrices,
    ) -> Result<RegionAllocation, TableSizeError> {
        let model = RegionModel::new(region, catalog, prices, request.duration());
        tracing::debug!(
            "{}: {} of {} containers usable",
            region,
            model.len(),
            catalog.len()
        );

        let table = CostTable::try_build(capacity, model.candidates())?;
        tracing::trace!(
            "{}: {} of {} sub-capacities reachable",
            region,
            table.reachable_len(),
            capacity + 1
        );

        let (Some(cost), Some(counts)) =
            (table.optimum(), trace_counts(&table, model.len()))
        else {
            tracing::debug!("{}: capacity {} cannot be filled exactly", region, capacity);
            return Ok(RegionAllocation::unsatisfiable(region.clone()));
        };

        let boxes: ContainerCounts = model
            .candidates()
            .iter()
            .zip(counts)
            .filter_map(|(cand, n)| {
                catalog
                    .get(cand.catalog_index())
                    .map(|c| (c.name().clone(), n))
            })
            .collect();

        tracing::debug!(
            "{}: optimum {} using {} containers",
            region,
            cost,
            boxes.total_containers()
        );
        Ok(RegionAllocation::satisfied(region.clone(), cost, boxes))
    }
}

/// Validates raw caller input and solves every region with default options.
///
/// ```
/// use box_alloc_core::prelude::Volume;
/// use box_alloc_model::prelude::{Container, ContainerCatalog, Price, PriceTable, RegionPrices};
///
/// let catalog = ContainerCatalog::from_containers([
///     Container::new("XL", Volume::new(160)),
///     Container::new("XS", Volume::new(10)),
/// ])
/// .unwrap();
/// let mut prices = PriceTable::new();
/// prices
///     .insert(
///         "Mumbai",
///         RegionPrices::new()
///             .with("XL", Price::per_hour(130.0))
///             .with("XS", Price::per_hour(14.0)),
///     )
///     .unwrap();
///
/// let report = box_alloc_solver::solve(1, 1150, &catalog, &prices).unwrap();
/// let mumbai = report.get("Mumbai").unwrap();
/// assert_eq!(mumbai.cost().map(|c| c.value()), Some(952.0));
/// assert_eq!(mumbai.boxes().get("XL"), 7);
/// assert_eq!(mumbai.boxes().get("XS"), 3);
///
/// assert!(box_alloc_solver::solve(1, -10, &catalog, &prices).is_err());
/// ```
pub fn solve(
    duration: i64,
    capacity: i64,
    catalog: &ContainerCatalog,
    prices: &PriceTable,
) -> Result<AllocationReport, InvalidArgumentError> {
    let request = SolveRequest::from_signed(duration, capacity)?;
    AllocationSolver::new().solve(&request, catalog, prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use box_alloc_core::prelude::{Cost, Hours, Volume};
    use box_alloc_model::prelude::{AllocationValidator, Container, Price, TotalCost};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[inline]
    fn req(duration: u64, capacity: u64) -> SolveRequest {
        SolveRequest::new(Hours::new(duration), Volume::new(capacity))
    }

    fn reference_catalog() -> ContainerCatalog {
        ContainerCatalog::from_containers(
            [
                ("XXL", 320),
                ("XL", 160),
                ("L", 80),
                ("M", 40),
                ("S", 20),
                ("XS", 10),
            ]
            .into_iter()
            .map(|(n, v)| Container::new(n, Volume::new(v))),
        )
        .unwrap()
    }

    fn delhi_only() -> PriceTable {
        let mut t = PriceTable::new();
        t.insert(
            "Delhi",
            [
                ("XS", 12.0),
                ("S", 23.0),
                ("M", 45.0),
                ("L", 77.4),
                ("XL", 140.0),
                ("XXL", 282.0),
            ]
            .into_iter()
            .map(|(n, r)| (n, Price::per_hour(r)))
            .collect(),
        )
        .unwrap();
        t
    }

    #[test]
    fn test_delhi_reference_allocation() {
        let report = AllocationSolver::new()
            .solve(&req(1, 1150), &reference_catalog(), &delhi_only())
            .unwrap();
        let delhi = report.get("Delhi").unwrap();
        assert_eq!(delhi.cost(), Some(Cost::new(1015.0)));
        assert_eq!(delhi.boxes().get("XL"), 7);
        assert_eq!(delhi.boxes().get("S"), 1);
        assert_eq!(delhi.boxes().get("XS"), 1);
        assert_eq!(delhi.boxes().len(), 3);
    }

    #[test]
    fn test_exact_single_container_match() {
        let report = AllocationSolver::new()
            .solve(&req(1, 160), &reference_catalog(), &delhi_only())
            .unwrap();
        let delhi = report.get("Delhi").unwrap();
        assert_eq!(delhi.cost(), Some(Cost::new(140.0)));
        let boxes: Vec<_> = delhi.boxes().iter().map(|(n, c)| (n.as_str(), c)).collect();
        assert_eq!(boxes, vec![("XL", 1)]);
    }

    #[test]
    fn test_boxes_follow_catalog_order() {
        let report = AllocationSolver::new()
            .solve(&req(1, 1150), &reference_catalog(), &delhi_only())
            .unwrap();
        let names: Vec<_> = report.as_slice()[0]
            .boxes()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["XL", "S", "XS"]);
    }

    #[test]
    fn test_zero_capacity_is_free_everywhere() {
        let mut prices = delhi_only();
        prices.insert("Empty", RegionPrices::new()).unwrap();
        let report = AllocationSolver::new()
            .solve(&req(5, 0), &reference_catalog(), &prices)
            .unwrap();
        for a in report.iter() {
            assert_eq!(a.total_cost(), TotalCost::Cost(Cost::new(0.0)));
            assert!(a.boxes().is_empty());
        }
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_region_without_usable_containers_is_unsatisfiable() {
        let mut prices = PriceTable::new();
        prices
            .insert(
                "EmptyCity",
                reference_catalog()
                    .iter()
                    .map(|c| (c.name().clone(), Price::Unavailable))
                    .collect(),
            )
            .unwrap();
        let report = AllocationSolver::new()
            .solve(&req(1, 100), &reference_catalog(), &prices)
            .unwrap();
        let a = report.get("EmptyCity").unwrap();
        assert_eq!(a.total_cost(), TotalCost::Unsatisfiable);
        assert!(a.boxes().is_empty());
    }

    #[test]
    fn test_unreachable_capacity_is_unsatisfiable() {
        let report = AllocationSolver::new()
            .solve(&req(1, 5), &reference_catalog(), &delhi_only())
            .unwrap();
        assert!(!report.get("Delhi").unwrap().is_satisfiable());
    }

    #[test]
    fn test_tie_break_prefers_earlier_catalog_entry() {
        let twins = |first: &str, second: &str| {
            ContainerCatalog::from_containers([
                Container::new(first, Volume::new(10)),
                Container::new(second, Volume::new(10)),
            ])
            .unwrap()
        };
        let mut prices = PriceTable::new();
        prices
            .insert(
                "Twin",
                RegionPrices::new()
                    .with("P", Price::per_hour(5.0))
                    .with("Q", Price::per_hour(5.0)),
            )
            .unwrap();

        let solver = AllocationSolver::new();
        let pq = solver.solve(&req(1, 20), &twins("P", "Q"), &prices).unwrap();
        assert_eq!(pq.as_slice()[0].boxes().get("P"), 2);
        let qp = solver.solve(&req(1, 20), &twins("Q", "P"), &prices).unwrap();
        assert_eq!(qp.as_slice()[0].boxes().get("Q"), 2);
    }

    #[test]
    fn test_zero_duration_costs_nothing_but_still_fills_capacity() {
        let catalog = reference_catalog();
        let prices = delhi_only();
        let r = req(0, 1150);
        let report = AllocationSolver::new().solve(&r, &catalog, &prices).unwrap();
        let delhi = report.get("Delhi").unwrap();
        assert_eq!(delhi.cost(), Some(Cost::new(0.0)));
        assert_eq!(delhi.boxes().total_volume(&catalog), Some(Volume::new(1150)));
    }

    #[test]
    fn test_free_function_rejects_negative_input() {
        let catalog = reference_catalog();
        let prices = delhi_only();
        assert_eq!(
            solve(1, -10, &catalog, &prices),
            Err(InvalidArgumentError::NegativeCapacity(-10))
        );
        assert_eq!(
            solve(-1, 10, &catalog, &prices),
            Err(InvalidArgumentError::NegativeDuration(-1))
        );
    }

    #[test]
    fn test_unrepresentable_capacity_is_rejected() {
        let catalog = reference_catalog();
        let prices = delhi_only();
        assert_eq!(
            solve(1, i64::MAX, &catalog, &prices),
            Err(InvalidArgumentError::CapacityOutOfRange(i64::MAX as u64))
        );

        for parallel in [false, true] {
            let solver = AllocationSolver::with_options(SolverOptions::new().parallel(parallel));
            assert_eq!(
                solver.solve(&req(1, u64::MAX), &catalog, &prices),
                Err(InvalidArgumentError::CapacityOutOfRange(u64::MAX))
            );
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = reference_catalog();
        let mut prices = PriceTable::new();
        for k in 0..16u32 {
            let row: RegionPrices = catalog
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let price = if (i as u32 + k) % 5 == 0 {
                        Price::Unavailable
                    } else {
                        Price::per_hour(f64::from(10 + k) * (i as f64 + 1.0))
                    };
                    (c.name().clone(), price)
                })
                .collect();
            prices.insert(format!("Region{k}"), row).unwrap();
        }

        let r = req(3, 970);
        let seq = AllocationSolver::new().solve(&r, &catalog, &prices).unwrap();
        let par = AllocationSolver::with_options(SolverOptions::new().parallel(true))
            .solve(&r, &catalog, &prices)
            .unwrap();
        assert_eq!(seq, par);
    }

    /// Cheapest exact fill by exhaustive enumeration; `None` if unreachable.
    fn brute_force(volumes: &[u64], costs: &[f64], capacity: u64) -> Option<f64> {
        fn go(i: usize, left: u64, volumes: &[u64], costs: &[f64]) -> Option<f64> {
            if left == 0 {
                return Some(0.0);
            }
            if i == volumes.len() {
                return None;
            }
            let mut best: Option<f64> = None;
            for n in 0..=left / volumes[i] {
                if let Some(rest) = go(i + 1, left - n * volumes[i], volumes, costs) {
                    let total = rest + n as f64 * costs[i];
                    best = Some(best.map_or(total, |b| b.min(total)));
                }
            }
            best
        }
        go(0, capacity, volumes, costs)
    }

    #[test]
    fn test_randomized_optimality_against_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let validator = AllocationValidator::new();

        for round in 0..200 {
            let n = rng.random_range(1..=4usize);
            let mut containers = Vec::with_capacity(n);
            let mut row = RegionPrices::new();
            for i in 0..n {
                let name = format!("C{i}");
                let volume = Volume::new(rng.random_range(3..=40));
                containers.push(Container::new(name.as_str(), volume));
                // Integer rates keep every sum exact.
                let price = if rng.random_bool(0.2) {
                    Price::Unavailable
                } else {
                    Price::per_hour(f64::from(rng.random_range(1..=60u32)))
                };
                row.insert(name.as_str(), price);
            }
            let catalog = ContainerCatalog::from_containers(containers).unwrap();
            let mut prices = PriceTable::new();
            prices.insert("R", row.clone()).unwrap();

            let duration = rng.random_range(1..=3u64);
            let capacity = rng.random_range(0..=120u64);
            let r = req(duration, capacity);

            let report = AllocationSolver::new().solve(&r, &catalog, &prices).unwrap();
            validator
                .validate_report(&r, &catalog, &prices, &report)
                .unwrap_or_else(|e| panic!("round {round}: {e}"));

            let (volumes, costs): (Vec<u64>, Vec<f64>) = catalog
                .iter()
                .filter_map(|c| {
                    let rate = row.rate_of(c.name().as_str())?;
                    Some((c.volume().value(), rate.value() * duration as f64))
                })
                .unzip();
            let expected = brute_force(&volumes, &costs, capacity);
            let actual = report.as_slice()[0].cost().map(|c| c.value());
            assert_eq!(actual, expected, "round {round}: capacity {capacity}");
        }
    }

    #[test]
    fn test_randomized_cost_scales_with_duration() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let catalog = reference_catalog();

        for round in 0..50 {
            let row: RegionPrices = catalog
                .iter()
                .map(|c| {
                    let price = if rng.random_bool(0.25) {
                        Price::Unavailable
                    } else {
                        Price::per_hour(f64::from(rng.random_range(1..=300u32)))
                    };
                    (c.name().clone(), price)
                })
                .collect();
            let mut prices = PriceTable::new();
            prices.insert("R", row).unwrap();

            let capacity = 10 * rng.random_range(0..=150u64);
            let k = rng.random_range(2..=9u64);
            let solver = AllocationSolver::new();
            let base = solver.solve(&req(1, capacity), &catalog, &prices).unwrap();
            let scaled = solver.solve(&req(k, capacity), &catalog, &prices).unwrap();

            let (a, b) = (&base.as_slice()[0], &scaled.as_slice()[0]);
            assert_eq!(a.boxes(), b.boxes(), "round {round}");
            match (a.cost(), b.cost()) {
                (Some(x), Some(y)) => assert_eq!(x.value() * k as f64, y.value(), "round {round}"),
                (None, None) => {}
                other => panic!("round {round}: satisfiability differs: {other:?}"),
            }
        }
    }
}
