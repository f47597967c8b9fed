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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidArgumentError {
    NegativeDuration(i64),
    NegativeCapacity(i64),
    CapacityOutOfRange(u64),
}

impl std::fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidArgumentError::NegativeDuration(v) => {
                write!(f, "Duration must be a non-negative integer, got {}", v)
            }
            InvalidArgumentError::NegativeCapacity(v) => {
                write!(f, "Capacity must be a non-negative integer, got {}", v)
            }
            InvalidArgumentError::CapacityOutOfRange(v) => {
                write!(f, "Capacity {} does not fit into addressable memory", v)
            }
        }
    }
}

impl std::error::Error for InvalidArgumentError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateContainerError {
    name: ContainerName,
}

impl DuplicateContainerError {
    pub fn new(name: ContainerName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &ContainerName {
        &self.name
    }
}

impl std::fmt::Display for DuplicateContainerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is listed more than once in the catalog", self.name)
    }
}

impl std::error::Error for DuplicateContainerError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonPositiveVolumeError {
    name: ContainerName,
}

impl NonPositiveVolumeError {
    pub fn new(name: ContainerName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &ContainerName {
        &self.name
    }
}

impl std::fmt::Display for NonPositiveVolumeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must have a positive volume", self.name)
    }
}

impl std::error::Error for NonPositiveVolumeError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogError {
    DuplicateContainer(DuplicateContainerError),
    NonPositiveVolume(NonPositiveVolumeError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateContainer(e) => write!(f, "{}", e),
            CatalogError::NonPositiveVolume(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<DuplicateContainerError> for CatalogError {
    fn from(err: DuplicateContainerError) -> Self {
        CatalogError::DuplicateContainer(err)
    }
}

impl From<NonPositiveVolumeError> for CatalogError {
    fn from(err: NonPositiveVolumeError) -> Self {
        CatalogError::NonPositiveVolume(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateRegionError {
    region: RegionName,
}

impl DuplicateRegionError {
    pub fn new(region: RegionName) -> Self {
        Self { region }
    }

    pub fn region(&self) -> &RegionName {
        &self.region
    }
}

impl std::fmt::Display for DuplicateRegionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} appears more than once in the price table", self.region)
    }
}

impl std::error::Error for DuplicateRegionError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownContainerError {
    region: RegionName,
    container: ContainerName,
}

impl UnknownContainerError {
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

impl std::fmt::Display for UnknownContainerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} prices {}, which is not in the catalog",
            self.region, self.container
        )
    }
}

impl std::error::Error for UnknownContainerError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProblemError {
    Catalog(CatalogError),
    DuplicateRegion(DuplicateRegionError),
    UnknownContainer(UnknownContainerError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::Catalog(e) => write!(f, "{}", e),
            ProblemError::DuplicateRegion(e) => write!(f, "{}", e),
            ProblemError::UnknownContainer(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<CatalogError> for ProblemError {
    fn from(err: CatalogError) -> Self {
        ProblemError::Catalog(err)
    }
}

impl From<DuplicateContainerError> for ProblemError {
    fn from(err: DuplicateContainerError) -> Self {
        ProblemError::Catalog(CatalogError::from(err))
    }
}

impl From<NonPositiveVolumeError> for ProblemError {
    fn from(err: NonPositiveVolumeError) -> Self {
        ProblemError::Catalog(CatalogError::from(err))
    }
}

impl From<DuplicateRegionError> for ProblemError {
    fn from(err: DuplicateRegionError) -> Self {
        ProblemError::DuplicateRegion(err)
    }
}

impl From<UnknownContainerError> for ProblemError {
    fn from(err: UnknownContainerError) -> Self {
        ProblemError::UnknownContainer(err)
    }
}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Problem(ProblemError),
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemLoaderError::Io(e) => write!(f, "I/O error: {}", e),
            ProblemLoaderError::Json(e) => write!(f, "Malformed configuration: {}", e),
            ProblemLoaderError::Problem(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProblemLoaderError::Io(e) => Some(e),
            ProblemLoaderError::Json(e) => Some(e),
            ProblemLoaderError::Problem(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(err: std::io::Error) -> Self {
        ProblemLoaderError::Io(err)
    }
}

impl From<serde_json::Error> for ProblemLoaderError {
    fn from(err: serde_json::Error) -> Self {
        ProblemLoaderError::Json(err)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(err: ProblemError) -> Self {
        ProblemLoaderError::Problem(err)
    }
}

impl From<CatalogError> for ProblemLoaderError {
    fn from(err: CatalogError) -> Self {
        ProblemLoaderError::Problem(ProblemError::from(err))
    }
}
