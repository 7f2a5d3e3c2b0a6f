// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AuditEvent, AuditEventKind, Criterion, LocationArchetype, ScoredArchetype, ScoringWeights, SelectionState};
pub use requests::{AuditQuery, RankRequest, RecordAuditEventRequest, ToggleCriterionRequest};
pub use responses::{ErrorResponse, HealthResponse, RankResponse, RecordEventResponse};
