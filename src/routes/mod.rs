// Route exports
pub mod audit;
pub mod finder;

use crate::catalog::Catalog;
use crate::core::{LocationFinder, SessionError};
use crate::models::ErrorResponse;
use crate::services::{AuditLog, SessionStore};
use actix_web::http::StatusCode;
use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use std::sync::Arc;
use thiserror::Error;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub finder: LocationFinder,
    pub sessions: Arc<SessionStore>,
    pub audit: Arc<AuditLog>,
}

/// Errors returned by handlers, rendered as JSON error bodies
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown criteria: {}", .0.join(", "))]
    UnknownCriteria(Vec<String>),

    #[error("Unknown audit event kind: {0}")]
    UnknownEventKind(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::UnknownCriteria(_) => "unknown_criteria",
            ApiError::UnknownEventKind(_) => "unknown_event_kind",
            ApiError::Session(SessionError::NotFound(_)) => "session_not_found",
            ApiError::Session(SessionError::UnknownCriterion(_)) => "unknown_criteria",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::InvalidQuery(_) => "invalid_query",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    ApiError::InvalidQuery(err.to_string()).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(finder::configure)
            .configure(audit::configure),
    );
}
