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
    ContainerName,
    err::{CatalogError, DuplicateContainerError, NonPositiveVolumeError},
};
use box_alloc_core::prelude::Volume;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Container {
    name: ContainerName,
    volume: Volume,
}

impl Container {
    #[inline]
    pub fn new(name: impl Into<ContainerName>, volume: Volume) -> Self {
        Self {
            name: name.into(),
            volume,
        }
    }

    #[inline]
    pub fn name(&self) -> &ContainerName {
        &self.name
    }

    #[inline]
    pub fn volume(&self) -> Volume {
        self.volume
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with {}", self.name, self.volume)
    }
}

/// The ordered list of container sizes on offer.
///
/// Names are unique and every volume is positive. The insertion order is kept
/// because the solver breaks cost ties in favour of earlier entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerCatalog {
    containers: Vec<Container>,
    index: HashMap<ContainerName, usize>,
}

impl ContainerCatalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_containers<I>(containers: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Container>,
    {
        let mut catalog = Self::new();
        for c in containers {
            catalog.push(c)?;
        }
        Ok(catalog)
    }

    pub fn push(&mut self, container: Container) -> Result<(), CatalogError> {
        if container.volume().is_zero() {
            return Err(NonPositiveVolumeError::new(container.name().clone()).into());
        }
        if self.index.contains_key(container.name()) {
            return Err(DuplicateContainerError::new(container.name().clone()).into());
        }
        self.index
            .insert(container.name().clone(), self.containers.len());
        self.containers.push(container);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn find(&self, name: &str) -> Option<&Container> {
        self.index_of(name).map(|i| &self.containers[i])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Container> {
        self.containers.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Container] {
        &self.containers
    }
}

impl<'a> IntoIterator for &'a ContainerCatalog {
    type Item = &'a Container;
    type IntoIter = std::slice::Iter<'a, Container>;

    fn into_iter(self) -> Self::IntoIter {
        self.containers.iter()
    }
}

impl Serialize for ContainerCatalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.containers.serialize(serializer)
    }
}
