use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Request to rank location archetypes for a set of criteria
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(max = 64))]
    #[serde(default)]
    pub criteria: Vec<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to toggle one criterion within a session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToggleCriterionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "criterion_id", rename = "criterionId")]
    pub criterion_id: String,
}

/// Request to record an audit event from the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordAuditEventRequest {
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default, alias = "session_id", rename = "sessionId")]
    pub session_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl RecordAuditEventRequest {
    /// `detail`, when present, must be a JSON object
    pub fn validate_detail(&self) -> Result<(), ValidationErrors> {
        match &self.detail {
            Some(detail) if !detail.is_object() => {
                let mut errors = ValidationErrors::new();
                let mut error = ValidationError::new("object");
                error.message = Some("detail must be a JSON object".into());
                errors.add("detail", error);
                Err(errors)
            }
            _ => Ok(()),
        }
    }
}

/// Query parameters for listing audit events
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuditQuery {
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_audit_limit")]
    pub limit: usize,
}

fn default_audit_limit() -> usize {
    50
}
