use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A selectable site attribute, e.g. "high foot traffic"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    pub description: String,
}

/// A category of physical location pre-tagged with typical criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArchetype {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "basePotentialScore", alias = "base_potential_score")]
    pub base_potential_score: u8,
    pub criteria: Vec<String>,
}

/// Criteria chosen by a visitor during one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(rename = "selectedCriteria")]
    pub selected_criteria: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it otherwise. Returns true when the id
    /// is selected after the call.
    pub fn toggle(&mut self, criterion_id: &str) -> bool {
        if self.selected_criteria.remove(criterion_id) {
            false
        } else {
            self.selected_criteria.insert(criterion_id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected_criteria.clear();
    }

    pub fn contains(&self, criterion_id: &str) -> bool {
        self.selected_criteria.contains(criterion_id)
    }

    pub fn len(&self) -> usize {
        self.selected_criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_criteria.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            selected_criteria: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Archetype with its computed match score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredArchetype {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "basePotentialScore")]
    pub base_potential_score: u8,
    pub criteria: Vec<String>,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "matchedCriteria")]
    pub matched_criteria: Vec<String>,
}

impl ScoredArchetype {
    pub fn from_archetype(
        archetype: &LocationArchetype,
        match_score: u8,
        matched_criteria: Vec<String>,
    ) -> Self {
        Self {
            id: archetype.id.clone(),
            name: archetype.name.clone(),
            description: archetype.description.clone(),
            base_potential_score: archetype.base_potential_score,
            criteria: archetype.criteria.clone(),
            match_score,
            matched_criteria,
        }
    }
}

/// Scoring weights
///
/// The three weights are expected to sum to 1.0 so a weighted sum of
/// percentages stays within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(rename = "archetypeCoverage")]
    pub archetype_coverage: f64,
    #[serde(rename = "selectionCoverage")]
    pub selection_coverage: f64,
    #[serde(rename = "basePotential")]
    pub base_potential: f64,
}

impl ScoringWeights {
    pub const SUM_TOLERANCE: f64 = 1e-6;

    pub fn sum(&self) -> f64 {
        self.archetype_coverage + self.selection_coverage + self.base_potential
    }

    /// True when every weight is finite, non-negative and they sum to 1.0
    pub fn is_normalized(&self) -> bool {
        let parts = [
            self.archetype_coverage,
            self.selection_coverage,
            self.base_potential,
        ];
        parts.iter().all(|w| w.is_finite() && *w >= 0.0)
            && (self.sum() - 1.0).abs() <= Self::SUM_TOLERANCE
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            archetype_coverage: 0.4,
            selection_coverage: 0.4,
            base_potential: 0.2,
        }
    }
}

/// Audit event for tracking visitor interactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: uuid::Uuid,
    pub kind: AuditEventKind,
    #[serde(rename = "sessionId")]
    pub session_id: Option<uuid::Uuid>,
    #[serde(rename = "clientIp")]
    pub client_ip: Option<std::net::IpAddr>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub detail: serde_json::Value,
    #[serde(rename = "occurredAt")]
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    SessionStarted,
    CriterionToggled,
    SearchPerformed,
    SelectionReset,
    ResultSelected,
    LeadLinkFollowed,
}

impl AuditEventKind {
    pub const ALL: [AuditEventKind; 6] = [
        AuditEventKind::SessionStarted,
        AuditEventKind::CriterionToggled,
        AuditEventKind::SearchPerformed,
        AuditEventKind::SelectionReset,
        AuditEventKind::ResultSelected,
        AuditEventKind::LeadLinkFollowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventKind::SessionStarted => "session_started",
            AuditEventKind::CriterionToggled => "criterion_toggled",
            AuditEventKind::SearchPerformed => "search_performed",
            AuditEventKind::SelectionReset => "selection_reset",
            AuditEventKind::ResultSelected => "result_selected",
            AuditEventKind::LeadLinkFollowed => "lead_link_followed",
        }
    }

    /// Parse a wire name, case-insensitively
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
    }
}

impl std::fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
