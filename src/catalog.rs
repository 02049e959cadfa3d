//! Reference data: countries, their states, and the lighthouse records
//!
//! Loaded once at startup and shared read-only for the process lifetime.

use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COUNTRIES_FILE: &str = "countries.json";
pub const LIGHTHOUSES_FILE: &str = "lighthouses.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Country not found: {0}")]
    CountryNotFound(String),
    #[error("State not found in {country}: {state}")]
    StateNotFound { country: String, state: String },
}

/// A state (or province) within a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub states: Vec<State>,
}

impl Country {
    /// Find the first state whose name matches exactly
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    /// State names in catalog order
    pub fn state_names(&self) -> Vec<String> {
        self.states.iter().map(|s| s.name.clone()).collect()
    }
}

/// A lighthouse record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lighthouse {
    pub name: String,
    pub country: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Lighthouse {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn is_in(&self, country: &str, state: &str) -> bool {
        self.country == country && self.state == state
    }
}

/// Immutable reference catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: Vec<Country>,
    lighthouses: Vec<Lighthouse>,
}

impl Catalog {
    pub fn new(countries: Vec<Country>, lighthouses: Vec<Lighthouse>) -> Self {
        Self {
            countries,
            lighthouses,
        }
    }

    /// Load `countries.json` and `lighthouses.json` from a data directory
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let countries: Vec<Country> = read_json(&dir.join(COUNTRIES_FILE))?;
        let lighthouses: Vec<Lighthouse> = read_json(&dir.join(LIGHTHOUSES_FILE))?;

        tracing::info!(
            dir = %dir.display(),
            countries = countries.len(),
            lighthouses = lighthouses.len(),
            "Catalog loaded"
        );

        Ok(Self::new(countries, lighthouses))
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn lighthouses(&self) -> &[Lighthouse] {
        &self.lighthouses
    }

    /// Country names in catalog order
    pub fn country_names(&self) -> Vec<String> {
        self.countries.iter().map(|c| c.name.clone()).collect()
    }

    /// Resolve a country by exact (case-sensitive) name; first match wins
    pub fn country(&self, name: &str) -> Result<&Country, CatalogError> {
        self.countries
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CatalogError::CountryNotFound(name.to_string()))
    }

    /// Resolve a state within a country by exact name; first match wins
    pub fn state(&self, country: &str, name: &str) -> Result<&State, CatalogError> {
        self.country(country)?
            .state(name)
            .ok_or_else(|| CatalogError::StateNotFound {
                country: country.to_string(),
                state: name.to_string(),
            })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
