//! Read-only destination catalog, loaded once at startup and shared by
//! reference across requests.

pub mod seasons;

use crate::models::Destination;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub use seasons::{month_name, season_calendar, season_for, Season, SeasonKind};

const EMBEDDED_DESTINATIONS: &str = include_str!("../../data/destinations.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no destinations")]
    Empty,

    #[error("Duplicate destination id '{0}'")]
    DuplicateId(String),

    #[error("Invalid catalog entry: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, enforcing the per-entry invariants and id uniqueness.
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        if destinations.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(destinations.len());
        for (i, destination) in destinations.iter().enumerate() {
            destination.validate().map_err(CatalogError::Invalid)?;
            if index.insert(destination.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(destination.id.clone()));
            }
        }

        Ok(Catalog {
            destinations,
            index,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let destinations: Vec<Destination> = serde_json::from_str(json)?;
        Self::new(destinations)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_DESTINATIONS)
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.index.get(id).map(|&i| &self.destinations[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
