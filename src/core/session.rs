use crate::catalog::Catalog;
use crate::core::finder::LocationFinder;
use crate::models::{ScoredArchetype, SelectionState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),
}

/// Where a session is in the selection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinderPhase {
    Selecting,
    Results,
}

/// One visitor's selection and the results derived from it
///
/// Results only exist in the `Results` phase. Any change to the selection
/// discards them and moves back to `Selecting`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinderSession {
    pub id: Uuid,
    pub phase: FinderPhase,
    #[serde(flatten)]
    pub selection: SelectionState,
    pub results: Vec<ScoredArchetype>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FinderSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phase: FinderPhase::Selecting,
            selection: SelectionState::new(),
            results: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Toggle a criterion known to `catalog`. Returns whether it is now selected.
    pub fn toggle(&mut self, catalog: &Catalog, criterion_id: &str) -> Result<bool, SessionError> {
        if !catalog.contains_criterion(criterion_id) {
            return Err(SessionError::UnknownCriterion(criterion_id.to_string()));
        }

        let selected = self.selection.toggle(criterion_id);
        self.discard_results();
        Ok(selected)
    }

    /// Rank the catalog for the current selection
    ///
    /// An empty selection leaves the session in `Selecting` with no results.
    pub fn find(&mut self, finder: &LocationFinder, catalog: &Catalog) -> &[ScoredArchetype] {
        self.results = finder.rank(catalog.locations(), &self.selection);
        self.phase = if self.selection.is_empty() {
            FinderPhase::Selecting
        } else {
            FinderPhase::Results
        };
        self.touch();
        &self.results
    }

    pub fn reset(&mut self) {
        self.selection.clear();
        self.discard_results();
    }

    fn discard_results(&mut self) {
        self.results.clear();
        self.phase = FinderPhase::Selecting;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for FinderSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog is valid")
    }

    #[test]
    fn starts_selecting_and_empty() {
        let session = FinderSession::new();
        assert_eq!(session.phase, FinderPhase::Selecting);
        assert!(session.selection.is_empty());
        assert!(session.results.is_empty());
    }

    #[test]
    fn find_with_selection_moves_to_results() {
        let catalog = catalog();
        let finder = LocationFinder::with_default_weights();
        let mut session = FinderSession::new();

        session.toggle(&catalog, "high-traffic").unwrap();
        let found = session.find(&finder, &catalog).len();

        assert!(found > 0);
        assert_eq!(session.phase, FinderPhase::Results);
    }

    #[test]
    fn find_without_selection_stays_selecting() {
        let catalog = catalog();
        let finder = LocationFinder::with_default_weights();
        let mut session = FinderSession::new();

        assert!(session.find(&finder, &catalog).is_empty());
        assert_eq!(session.phase, FinderPhase::Selecting);
    }

    #[test]
    fn toggle_discards_results() {
        let catalog = catalog();
        let finder = LocationFinder::with_default_weights();
        let mut session = FinderSession::new();

        session.toggle(&catalog, "waiting-areas").unwrap();
        session.find(&finder, &catalog);
        assert_eq!(session.phase, FinderPhase::Results);

        assert!(session.toggle(&catalog, "extended-hours").unwrap());
        assert_eq!(session.phase, FinderPhase::Selecting);
        assert!(session.results.is_empty());
        assert_eq!(session.selection.len(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let catalog = catalog();
        let finder = LocationFinder::with_default_weights();
        let mut session = FinderSession::new();

        session.toggle(&catalog, "secure-indoor").unwrap();
        session.find(&finder, &catalog);
        session.reset();

        assert_eq!(session.phase, FinderPhase::Selecting);
        assert!(session.selection.is_empty());
        assert!(session.results.is_empty());
    }

    #[test]
    fn unknown_criterion_is_rejected() {
        let mut session = FinderSession::new();
        let err = session.toggle(&catalog(), "drive-thru").unwrap_err();

        assert_eq!(err, SessionError::UnknownCriterion("drive-thru".to_string()));
        assert!(session.selection.is_empty());
    }

    #[test]
    fn serializes_selection_inline() {
        let catalog = catalog();
        let mut session = FinderSession::new();
        session.toggle(&catalog, "high-traffic").unwrap();

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["phase"], "selecting");
        assert_eq!(json["selectedCriteria"][0], "high-traffic");
    }
}
