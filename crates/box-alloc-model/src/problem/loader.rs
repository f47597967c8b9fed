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
    container::{Container, ContainerCatalog},
    err::ProblemLoaderError,
    price::PriceTable,
    prob::Problem,
};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// On-disk shape of a problem configuration.
///
/// ```json
/// {
///   "containers": [{"name": "XL", "volume": 160}, {"name": "XS", "volume": 10}],
///   "regions": {"Delhi": {"XL": 140, "XS": 12}, "Mumbai": {"XL": 130, "XS": null}}
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemDocument {
    containers: Vec<Container>,
    regions: PriceTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLoader {
    strict_prices: bool,
}

impl Default for ProblemLoader {
    fn default() -> Self {
        Self {
            strict_prices: true,
        }
    }
}

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// When disabled, price entries for containers missing from the catalog
    /// are dropped with a warning instead of failing the load.
    #[inline]
    pub fn strict_prices(mut self, yes: bool) -> Self {
        self.strict_prices = yes;
        self
    }

    pub fn from_reader<R: Read>(&self, r: R) -> Result<Problem, ProblemLoaderError> {
        let doc: ProblemDocument = serde_json::from_reader(BufReader::new(r))?;
        self.from_document(doc)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Problem, ProblemLoaderError> {
        let file = File::open(path).map_err(ProblemLoaderError::Io)?;
        self.from_reader(file)
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Problem, ProblemLoaderError> {
        let doc: ProblemDocument = serde_json::from_str(s)?;
        self.from_document(doc)
    }

    fn from_document(&self, doc: ProblemDocument) -> Result<Problem, ProblemLoaderError> {
        let catalog = ContainerCatalog::from_containers(doc.containers)?;
        let mut regions = doc.regions;

        if !self.strict_prices {
            for (region, prices) in regions.iter_mut() {
                prices.retain(|name, _| {
                    let known = catalog.contains(name.as_str());
                    if !known {
                        tracing::warn!("Ignoring price of unknown {} in {}", name, region);
                    }
                    known
                });
            }
        }

        if regions.is_empty() {
            tracing::warn!("Configuration defines no regions; every report will be empty");
        }

        Ok(Problem::new(catalog, regions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::err::ProblemError;

    const SMALL_OK: &str = r#"
        {
            "containers": [
                {"name": "XL", "volume": 160},
                {"name": "S", "volume": 20},
                {"name": "XS", "volume": 10}
            ],
            "regions": {
                "Mumbai": {"XL": 130, "S": null, "XS": 14},
                "Delhi": {"XL": 140, "S": 23, "XS": 12}
            }
        }
    "#;

    const UNKNOWN_CONTAINER: &str = r#"
        {
            "containers": [{"name": "XS", "volume": 10}],
            "regions": {"Delhi": {"XS": 12, "XXXL": 999}}
        }
    "#;

    #[test]
    fn test_loads_minimal_document() {
        let p = ProblemLoader::new().from_str(SMALL_OK).unwrap();
        assert_eq!(p.containers_len(), 3);
        let order: Vec<_> = p.prices().regions().map(|r| r.as_str()).collect();
        assert_eq!(order, vec!["Mumbai", "Delhi"]);
        let mumbai = p.prices().get("Mumbai").unwrap();
        assert_eq!(mumbai.rate_of("S"), None);
        assert_eq!(mumbai.rate_of("XS").map(|r| r.value()), Some(14.0));
    }

    #[test]
    fn test_from_reader_matches_from_str() {
        let a = ProblemLoader::new().from_str(SMALL_OK).unwrap();
        let b = ProblemLoader::new()
            .from_reader(SMALL_OK.as_bytes())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_strict_mode_rejects_unknown_container() {
        let err = ProblemLoader::new()
            .from_str(UNKNOWN_CONTAINER)
            .unwrap_err();
        assert!(matches!(
            err,
            ProblemLoaderError::Problem(ProblemError::UnknownContainer(_))
        ));
    }

    #[test]
    fn test_lenient_mode_drops_unknown_container() {
        let p = ProblemLoader::new()
            .strict_prices(false)
            .from_str(UNKNOWN_CONTAINER)
            .unwrap();
        let delhi = p.prices().get("Delhi").unwrap();
        assert_eq!(delhi.len(), 1);
        assert!(delhi.price_of("XXXL").is_none());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = ProblemLoader::new().from_str("{ not json").unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Json(_)));
    }

    #[test]
    fn test_invalid_rate_is_reported() {
        let doc = r#"{"containers": [{"name": "XS", "volume": 10}], "regions": {"Delhi": {"XS": -1}}}"#;
        let err = ProblemLoader::new().from_str(doc).unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ProblemLoader::new()
            .from_path("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Io(_)));
    }
}
