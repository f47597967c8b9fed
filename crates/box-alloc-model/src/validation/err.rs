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

use crate::problem::{ContainerName, RegionName};
use box_alloc_core::prelude::{Cost, Volume};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeMismatchError {
    region: RegionName,
    expected: Volume,
    actual: Option<Volume>,
}

impl VolumeMismatchError {
    pub fn new(region: RegionName, expected: Volume, actual: Option<Volume>) -> Self {
        Self {
            region,
            expected,
            actual,
        }
    }

    pub fn region(&self) -> &RegionName {
        &self.region
    }

    pub fn expected(&self) -> Volume {
        self.expected
    }

    pub fn actual(&self) -> Option<Volume> {
        self.actual
    }
}

impl std::fmt::Display for VolumeMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.actual {
            Some(actual) => write!(
                f,
                "Containers in {} add up to {} instead of {}",
                self.region, actual, self.expected
            ),
            None => write!(
                f,
                "Container volumes in {} overflow instead of adding up to {}",
                self.region, self.expected
            ),
        }
    }
}

impl std::error::Error for VolumeMismatchError {}

#[derive(Debug, Clone, PartialEq)]
pub struct CostMismatchError {
    region: RegionName,
    expected: Cost,
    reported: Cost,
}

impl CostMismatchError {
    pub fn new(region: RegionName, expected: Cost, reported: Cost) -> Self {
        Self {
            region,
            expected,
            reported,
        }
    }

    pub fn region(&self) -> &RegionName {
        &self.region
    }

    pub fn expected(&self) -> Cost {
        self.expected
    }

    pub fn reported(&self) -> Cost {
        self.reported
    }
}

impl std::fmt::Display for CostMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} reports {} but its containers cost {}",
            self.region, self.reported, self.expected
        )
    }
}

impl std::error::Error for CostMismatchError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnusableContainerError {
    region: RegionName,
    container: ContainerName,
}

impl UnusableContainerError {
    pub fn new(region: RegionName, container: ContainerName) -> Self {
        Self { region, container }
    }

    pub fn region(&self) -> &RegionName {
        &self.region
    }

    pub fn container(&self) -> &ContainerName {
        &self.container
    }
}

impl std::fmt::Display for UnusableContainerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} uses {}, which is not available there",
            self.region, self.container
        )
    }
}

impl std::error::Error for UnusableContainerError {}

#[derive(Debug, Clone, PartialEq)]
pub enum AllocationValidationError {
    MissingRegion(RegionName),
    UnexpectedRegion(RegionName),
    UnknownContainer(RegionName, ContainerName),
    Unusable(UnusableContainerError),
    VolumeMismatch(VolumeMismatchError),
    CostMismatch(CostMismatchError),
    BoxesWithoutSolution(RegionName),
    ZeroCapacityUnsatisfiable(RegionName),
}

impl std::fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationValidationError::MissingRegion(r) => {
                write!(f, "Missing allocation for {}", r)
            }
            AllocationValidationError::UnexpectedRegion(r) => {
                write!(f, "Unexpected or out-of-order allocation for {}", r)
            }
            AllocationValidationError::UnknownContainer(r, c) => {
                write!(f, "{} uses {}, which is not in the catalog", r, c)
            }
            AllocationValidationError::Unusable(e) => write!(f, "{}", e),
            AllocationValidationError::VolumeMismatch(e) => write!(f, "{}", e),
            AllocationValidationError::CostMismatch(e) => write!(f, "{}", e),
            AllocationValidationError::BoxesWithoutSolution(r) => {
                write!(f, "{} has no solution but lists containers", r)
            }
            AllocationValidationError::ZeroCapacityUnsatisfiable(r) => {
                write!(f, "{} reports no solution for zero capacity", r)
            }
        }
    }
}

impl std::error::Error for AllocationValidationError {}

impl From<UnusableContainerError> for AllocationValidationError {
    fn from(err: UnusableContainerError) -> Self {
        AllocationValidationError::Unusable(err)
    }
}

impl From<VolumeMismatchError> for AllocationValidationError {
    fn from(err: VolumeMismatchError) -> Self {
        AllocationValidationError::VolumeMismatch(err)
    }
}

impl From<CostMismatchError> for AllocationValidationError {
    fn from(err: CostMismatchError) -> Self {
        AllocationValidationError::CostMismatch(err)
    }
}
