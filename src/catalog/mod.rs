//! Criteria and location catalogs.
//!
//! Both catalogs are read-only after startup. A [`Catalog`] can only be
//! built through [`Catalog::from_parts`] (or the loaders that wrap it), which
//! enforces the integrity rules in [`validation`].

pub mod loader;
pub mod validation;

use crate::models::{Criterion, LocationArchetype};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use loader::{load_catalog, BUILTIN_CATALOG};

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported catalog format '{0}', expected .json or .toml")]
    UnsupportedFormat(String),

    #[error("Catalog must define at least one criterion and one location")]
    Empty,

    #[error("Blank id in {0} catalog")]
    BlankId(&'static str),

    #[error("Duplicate criterion id: {0}")]
    DuplicateCriterion(String),

    #[error("Duplicate location id: {0}")]
    DuplicateLocation(String),

    #[error("Location {location} has no criteria")]
    NoCriteria { location: String },

    #[error("Location {location} lists criterion {criterion} more than once")]
    RepeatedCriterion { location: String, criterion: String },

    #[error("Location {location} references unknown criterion {criterion}")]
    UnknownCriterion { location: String, criterion: String },

    #[error("Location {location} has base potential score {score}, expected 0-100")]
    ScoreOutOfRange { location: String, score: u8 },
}

/// On-disk shape of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub criteria: Vec<Criterion>,
    pub locations: Vec<LocationArchetype>,
}

/// Validated criteria and location catalogs
#[derive(Debug, Clone)]
pub struct Catalog {
    criteria: Vec<Criterion>,
    locations: Vec<LocationArchetype>,
    criterion_index: HashMap<String, usize>,
    location_index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate and index the given catalogs
    pub fn from_parts(
        criteria: Vec<Criterion>,
        locations: Vec<LocationArchetype>,
    ) -> Result<Self, CatalogError> {
        validation::validate(&criteria, &locations)?;

        let criterion_index = criteria
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let location_index = locations
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.clone(), i))
            .collect();

        Ok(Self {
            criteria,
            locations,
            criterion_index,
            location_index,
        })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Location archetypes in catalog order
    pub fn locations(&self) -> &[LocationArchetype] {
        &self.locations
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criterion_index.get(id).map(|&i| &self.criteria[i])
    }

    pub fn location(&self, id: &str) -> Option<&LocationArchetype> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }

    pub fn contains_criterion(&self, id: &str) -> bool {
        self.criterion_index.contains_key(id)
    }

    /// Ids from `ids` that are not in the criteria catalog, in input order
    pub fn unknown_criteria<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .filter(|id| !self.contains_criterion(id))
            .cloned()
            .collect()
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Catalog::from_parts(file.criteria, file.locations)
    }
}
