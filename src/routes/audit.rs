use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::models::{AuditEventKind, AuditQuery, RecordAuditEventRequest, RecordEventResponse};
use crate::routes::{ApiError, AppState};
use crate::services::ClientContext;

/// Configure audit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/audit/events", web::post().to(record_event))
        .route("/audit/events", web::get().to(list_events));
}

/// Record audit event endpoint
///
/// POST /api/v1/audit/events
///
/// Request body:
/// ```json
/// {
///   "kind": "result_selected",
///   "sessionId": "uuid",
///   "detail": { "locationId": "hospital" }
/// }
/// ```
async fn record_event(
    state: web::Data<AppState>,
    req: web::Json<RecordAuditEventRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    req.validate_detail()?;

    let kind = AuditEventKind::parse(&req.kind)
        .ok_or_else(|| ApiError::UnknownEventKind(req.kind.clone()))?;

    let req = req.into_inner();
    let event = state.audit.record(
        kind,
        req.session_id,
        &ClientContext::from_request(&http_req),
        req.detail.unwrap_or_else(|| serde_json::json!({})),
    );

    Ok(HttpResponse::Created().json(RecordEventResponse {
        success: true,
        event_id: event.id.to_string(),
    }))
}

/// Most recent audit events, newest first
///
/// GET /api/v1/audit/events?limit={n}
async fn list_events(
    state: web::Data<AppState>,
    query: web::Query<AuditQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    Ok(HttpResponse::Ok().json(state.audit.recent(query.limit)))
}
