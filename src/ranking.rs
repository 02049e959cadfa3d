//! Nearest-lighthouse ranking

use crate::catalog::Catalog;
use crate::geo::{distance, Coordinates};
use serde::{Deserialize, Serialize};

/// How many lighthouses a search returns at most
pub const MAX_RESULTS: usize = 5;

/// A lighthouse with its distance from the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres from the user's location
    pub distance: f64,
}

impl RankedResult {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Rank the lighthouses of one country/state by distance from `origin`.
///
/// Returns at most [`MAX_RESULTS`] entries, nearest first. Equal distances
/// keep catalog order. An empty list means nothing matched the filter.
pub fn rank(catalog: &Catalog, country: &str, state: &str, origin: Coordinates) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = catalog
        .lighthouses()
        .iter()
        .filter(|lh| lh.is_in(country, state))
        .map(|lh| RankedResult {
            name: lh.name.clone(),
            latitude: lh.latitude,
            longitude: lh.longitude,
            distance: distance(lh.coordinates(), origin),
        })
        .collect();

    // sort_by is stable, so ties stay in catalog order
    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    results.truncate(MAX_RESULTS);
    results
}
