use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredArchetype;

/// Response for rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub results: Vec<ScoredArchetype>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "selectedCriteria")]
    pub selected_criteria: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub criteria: usize,
    pub locations: usize,
    #[serde(rename = "activeSessions")]
    pub active_sessions: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Record audit event response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEventResponse {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
}
