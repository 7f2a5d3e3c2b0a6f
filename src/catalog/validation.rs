use super::CatalogError;
use crate::models::{Criterion, LocationArchetype};
use std::collections::HashSet;

pub const MAX_BASE_POTENTIAL_SCORE: u8 = 100;

/// Check catalog integrity, failing on the first defect found
pub fn validate(
    criteria: &[Criterion],
    locations: &[LocationArchetype],
) -> Result<(), CatalogError> {
    if criteria.is_empty() || locations.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut criterion_ids = HashSet::with_capacity(criteria.len());
    for criterion in criteria {
        if criterion.id.trim().is_empty() {
            return Err(CatalogError::BlankId("criteria"));
        }
        if !criterion_ids.insert(criterion.id.as_str()) {
            return Err(CatalogError::DuplicateCriterion(criterion.id.clone()));
        }
    }

    let mut location_ids = HashSet::with_capacity(locations.len());
    for location in locations {
        if location.id.trim().is_empty() {
            return Err(CatalogError::BlankId("location"));
        }
        if !location_ids.insert(location.id.as_str()) {
            return Err(CatalogError::DuplicateLocation(location.id.clone()));
        }
        validate_location(location, &criterion_ids)?;
    }

    Ok(())
}

fn validate_location(
    location: &LocationArchetype,
    criterion_ids: &HashSet<&str>,
) -> Result<(), CatalogError> {
    if location.base_potential_score > MAX_BASE_POTENTIAL_SCORE {
        return Err(CatalogError::ScoreOutOfRange {
            location: location.id.clone(),
            score: location.base_potential_score,
        });
    }

    if location.criteria.is_empty() {
        return Err(CatalogError::NoCriteria {
            location: location.id.clone(),
        });
    }

    let mut seen = HashSet::with_capacity(location.criteria.len());
    for criterion in &location.criteria {
        if !criterion_ids.contains(criterion.as_str()) {
            return Err(CatalogError::UnknownCriterion {
                location: location.id.clone(),
                criterion: criterion.clone(),
            });
        }
        if !seen.insert(criterion.as_str()) {
            return Err(CatalogError::RepeatedCriterion {
                location: location.id.clone(),
                criterion: criterion.clone(),
            });
        }
    }

    Ok(())
}
