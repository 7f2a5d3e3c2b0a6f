use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;
use crate::models::{AuditEventKind, HealthResponse, RankRequest, RankResponse, SelectionState, ToggleCriterionRequest};
use crate::routes::{ApiError, AppState};
use crate::services::ClientContext;

/// Configure catalog, ranking and session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/criteria", web::get().to(list_criteria))
        .route("/locations", web::get().to(list_locations))
        .route("/rank", web::post().to(rank))
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/toggle", web::post().to(toggle_criterion))
        .route("/sessions/{id}/find", web::post().to(find_locations))
        .route("/sessions/{id}/reset", web::post().to(reset_session));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        criteria: state.catalog.criteria().len(),
        locations: state.catalog.locations().len(),
        active_sessions: state.sessions.stats().await.active_sessions,
    })
}

async fn list_criteria(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.criteria())
}

async fn list_locations(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.locations())
}

/// Stateless ranking endpoint
///
/// POST /api/v1/rank
///
/// Request body:
/// ```json
/// {
///   "criteria": ["high-traffic", "captive-audience"],
///   "limit": 5
/// }
/// ```
async fn rank(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let unknown = state.catalog.unknown_criteria(&req.criteria);
    if !unknown.is_empty() {
        tracing::info!("Rank request with unknown criteria: {:?}", unknown);
        return Err(ApiError::UnknownCriteria(unknown));
    }

    let selection: SelectionState = req.criteria.iter().cloned().collect();
    // Never return more rows than the catalog holds
    let limit = req.limit.map(|limit| limit.min(state.catalog.locations().len()));

    let result = state
        .finder
        .rank_with_limit(state.catalog.locations(), &selection, limit);

    let response = RankResponse {
        total_results: result.total_scored,
        results: result.results,
        selected_criteria: selection.selected_criteria.into_iter().collect(),
    };

    state.audit.record(
        AuditEventKind::SearchPerformed,
        None,
        &ClientContext::from_request(&http_req),
        json!({
            "criteria": response.selected_criteria,
            "results": response.total_results,
        }),
    );

    tracing::info!(
        "Returning {} ranked locations for {} criteria",
        response.results.len(),
        response.selected_criteria.len()
    );

    Ok(HttpResponse::Ok().json(response))
}

async fn create_session(state: web::Data<AppState>, http_req: HttpRequest) -> HttpResponse {
    let session = state.sessions.create().await;

    state.audit.record(
        AuditEventKind::SessionStarted,
        Some(session.id),
        &ClientContext::from_request(&http_req),
        json!({}),
    );

    HttpResponse::Created().json(session)
}

async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session = state.sessions.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(session))
}

async fn delete_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    state.sessions.remove(path.into_inner()).await;
    HttpResponse::NoContent().finish()
}

/// Toggle one criterion
///
/// POST /api/v1/sessions/{id}/toggle
///
/// Request body:
/// ```json
/// { "criterionId": "high-traffic" }
/// ```
async fn toggle_criterion(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ToggleCriterionRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let id = path.into_inner();
    let catalog = state.catalog.clone();
    let (session, selected) = state
        .sessions
        .update(id, |session| session.toggle(&catalog, &req.criterion_id))
        .await?;

    state.audit.record(
        AuditEventKind::CriterionToggled,
        Some(id),
        &ClientContext::from_request(&http_req),
        json!({
            "criterionId": req.criterion_id,
            "selected": selected,
        }),
    );

    Ok(HttpResponse::Ok().json(session))
}

async fn find_locations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let catalog = state.catalog.clone();
    let finder = state.finder.clone();
    let (session, found) = state
        .sessions
        .update(id, |session| Ok(session.find(&finder, &catalog).len()))
        .await?;

    state.audit.record(
        AuditEventKind::SearchPerformed,
        Some(id),
        &ClientContext::from_request(&http_req),
        json!({
            "criteria": session.selection.selected_criteria,
            "results": found,
        }),
    );

    tracing::info!("Session {} found {} locations", id, found);

    Ok(HttpResponse::Ok().json(session))
}

async fn reset_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let (session, ()) = state
        .sessions
        .update(id, |session| {
            session.reset();
            Ok(())
        })
        .await?;

    state.audit.record(
        AuditEventKind::SelectionReset,
        Some(id),
        &ClientContext::from_request(&http_req),
        json!({}),
    );

    Ok(HttpResponse::Ok().json(session))
}
