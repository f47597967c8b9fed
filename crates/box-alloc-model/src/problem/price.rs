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

use crate::problem::{ContainerName, RegionName, err::DuplicateRegionError};
use box_alloc_core::prelude::Rate;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};
use std::collections::BTreeMap;

/// The hourly price of a container in one region.
///
/// `null` in a price list means the container is not offered there. A price
/// list that does not mention a container at all means the same thing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Available(Rate),
    Unavailable,
}

impl Price {
    /// Shorthand for tests and builders; non-positive or non-finite values
    /// turn into [`Price::Unavailable`].
    #[inline]
    pub fn per_hour(value: f64) -> Self {
        Rate::new(value).map_or(Price::Unavailable, Price::Available)
    }

    #[inline]
    pub fn rate(&self) -> Option<Rate> {
        match self {
            Price::Available(r) => Some(*r),
            Price::Unavailable => None,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Price::Available(_))
    }
}

impl From<Option<Rate>> for Price {
    #[inline]
    fn from(rate: Option<Rate>) -> Self {
        rate.map_or(Price::Unavailable, Price::Available)
    }
}

impl From<Rate> for Price {
    #[inline]
    fn from(rate: Rate) -> Self {
        Price::Available(rate)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rate().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Rate>::deserialize(deserializer).map(Price::from)
    }
}

/// Container prices for a single region.
#[repr(transparent)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionPrices(BTreeMap<ContainerName, Price>);

impl RegionPrices {
    #[inline]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[inline]
    pub fn insert(&mut self, container: impl Into<ContainerName>, price: Price) -> Option<Price> {
        self.0.insert(container.into(), price)
    }

    #[inline]
    pub fn with(mut self, container: impl Into<ContainerName>, price: Price) -> Self {
        self.insert(container, price);
        self
    }

    #[inline]
    pub fn price_of(&self, container: &str) -> Option<Price> {
        self.0.get(container).copied()
    }

    /// The usable rate of `container`; absent and unavailable entries are both `None`.
    #[inline]
    pub fn rate_of(&self, container: &str) -> Option<Rate> {
        self.price_of(container).and_then(|p| p.rate())
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
    pub fn iter(&self) -> impl Iterator<Item = (&ContainerName, &Price)> {
        self.0.iter()
    }

    #[inline]
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ContainerName, &Price) -> bool,
    {
        self.0.retain(|k, v| keep(k, v));
    }
}

impl<N: Into<ContainerName>> FromIterator<(N, Price)> for RegionPrices {
    fn from_iter<I: IntoIterator<Item = (N, Price)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(n, p)| (n.into(), p)).collect())
    }
}

/// Per-region price lists, in the order the regions were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    regions: Vec<(RegionName, RegionPrices)>,
}

impl PriceTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        region: impl Into<RegionName>,
        prices: RegionPrices,
    ) -> Result<(), DuplicateRegionError> {
        let region = region.into();
        if self.contains(region.as_str()) {
            return Err(DuplicateRegionError::new(region));
        }
        self.regions.push((region, prices));
        Ok(())
    }

    #[inline]
    pub fn get(&self, region: &str) -> Option<&RegionPrices> {
        self.regions
            .iter()
            .find(|(r, _)| r.as_str() == region)
            .map(|(_, p)| p)
    }

    #[inline]
    pub fn contains(&self, region: &str) -> bool {
        self.get(region).is_some()
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
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&RegionName, &RegionPrices)> {
        self.regions.iter().map(|(r, p)| (r, p))
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (&RegionName, &mut RegionPrices)> {
        self.regions.iter_mut().map(|(r, p)| (&*r, p))
    }

    #[inline]
    pub fn regions(&self) -> impl ExactSizeIterator<Item = &RegionName> {
        self.regions.iter().map(|(r, _)| r)
    }

    #[inline]
    pub fn as_slice(&self) -> &[(RegionName, RegionPrices)] {
        &self.regions
    }
}

impl Serialize for PriceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.regions.len()))?;
        for (region, prices) in &self.regions {
            map.serialize_entry(region, prices)?;
        }
        map.end()
    }
}

struct PriceTableVisitor;

impl<'de> Visitor<'de> for PriceTableVisitor {
    type Value = PriceTable;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map from region name to container prices")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PriceTable, A::Error> {
        let mut table = PriceTable::new();
        while let Some((region, prices)) = access.next_entry::<RegionName, RegionPrices>()? {
            table
                .insert(region, prices)
                .map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(table)
    }
}

/// Regions keep the order in which they appear in the document.
impl<'de> Deserialize<'de> for PriceTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PriceTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_null_prices_are_both_unusable() {
        let prices: RegionPrices = serde_json::from_str(r#"{"XS": 14, "S": null}"#).unwrap();
        assert_eq!(prices.rate_of("XS").map(|r| r.value()), Some(14.0));
        assert_eq!(prices.price_of("S"), Some(Price::Unavailable));
        assert_eq!(prices.rate_of("S"), None);
        assert_eq!(prices.price_of("M"), None);
        assert_eq!(prices.rate_of("M"), None);
    }

    #[test]
    fn test_non_positive_rate_is_rejected_while_parsing() {
        assert!(serde_json::from_str::<RegionPrices>(r#"{"XS": 0}"#).is_err());
        assert!(serde_json::from_str::<RegionPrices>(r#"{"XS": -2.5}"#).is_err());
    }

    #[test]
    fn test_price_per_hour_shorthand() {
        assert!(Price::per_hour(77.4).is_available());
        assert_eq!(Price::per_hour(0.0), Price::Unavailable);
    }

    #[test]
    fn test_table_preserves_document_order() {
        let table: PriceTable = serde_json::from_str(
            r#"{"Mumbai": {"XS": 14}, "Delhi": {"XS": 12}, "Kolkata": {"XS": 11}}"#,
        )
        .unwrap();
        let order: Vec<_> = table.regions().map(|r| r.as_str()).collect();
        assert_eq!(order, vec!["Mumbai", "Delhi", "Kolkata"]);
    }

    #[test]
    fn test_table_rejects_duplicate_regions() {
        let mut table = PriceTable::new();
        table.insert("Delhi", RegionPrices::new()).unwrap();
        let err = table.insert("Delhi", RegionPrices::new()).unwrap_err();
        assert_eq!(err.region().as_str(), "Delhi");
        assert_eq!(table.len(), 1);

        let parsed = serde_json::from_str::<PriceTable>(r#"{"Delhi": {}, "Delhi": {}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_table_serializes_in_insertion_order() {
        let mut table = PriceTable::new();
        table
            .insert("Kolkata", RegionPrices::new().with("M", Price::Unavailable))
            .unwrap();
        table
            .insert("Delhi", RegionPrices::new().with("XS", Price::per_hour(12.0)))
            .unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"Kolkata":{"M":null},"Delhi":{"XS":12.0}}"#);
    }
}
