//! # Dispute Routes
//!
//! HTTP surface for the dispute side-record: a party reports a disagreement
//! on an in-progress or completed errand, and an admin resolves it into a
//! final done/cancelled outcome. Resolution is gated on the admin role;
//! the lifecycle consequences (settlement or penalty) are applied by
//! `errand_state::Errand::resolve_dispute`.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use errand_rules::Action;
use errand_state::{Dispute, DisputeOutcome, Party};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::errands::{
    errand_to_response, load_errand, parse_role, require_permission, ErrandResponse,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to open a dispute against an errand.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenDisputeRequest {
    /// Display name of the reporting party.
    pub reporter_name: String,
    /// What the disagreement is about.
    pub reason: String,
}

/// Request to resolve the open dispute.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveDisputeRequest {
    /// Display name of the resolving admin.
    pub resolver_name: String,
    /// Role of the caller; must be `admin`.
    pub role: String,
    /// The decided outcome (`done` or `cancelled`).
    pub outcome: String,
}

/// Dispute details in API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DisputeResponse {
    pub dispute_id: String,
    pub status: String,
    pub reporter_name: String,
    pub reason: String,
    pub opened_at: String,
    pub outcome: Option<String>,
    pub resolver_name: Option<String>,
    /// The errand after the dispute operation.
    pub errand: ErrandResponse,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the dispute router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/errands/{id}/dispute", post(open_dispute))
        .route("/v1/errands/{id}/dispute/resolve", post(resolve_dispute))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_outcome(s: &str) -> Result<DisputeOutcome, AppError> {
    match s {
        "done" => Ok(DisputeOutcome::Done),
        "cancelled" => Ok(DisputeOutcome::Cancelled),
        other => Err(AppError::Validation(format!(
            "unknown dispute outcome: '{other}'"
        ))),
    }
}

fn dispute_to_response(d: &Dispute, errand: ErrandResponse) -> DisputeResponse {
    DisputeResponse {
        dispute_id: d.id.as_uuid().to_string(),
        status: d.status.as_str().to_string(),
        reporter_name: d.reporter.name.clone(),
        reason: d.reason.clone(),
        opened_at: d.opened_at.to_iso8601(),
        outcome: d.resolution.as_ref().map(|r| r.outcome.as_str().to_string()),
        resolver_name: d.resolution.as_ref().map(|r| r.resolver.name.clone()),
        errand,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/errands/{id}/dispute — Report a dispute.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/dispute",
    params(("id" = String, Path, description = "Errand UUID")),
    request_body = OpenDisputeRequest,
    responses(
        (status = 201, description = "Dispute opened", body = DisputeResponse),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "Dispute unavailable in this status, or one already exists"),
        (status = 422, description = "Validation error"),
    ),
    tag = "disputes"
)]
pub(crate) async fn open_dispute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OpenDisputeRequest>,
) -> Result<(axum::http::StatusCode, Json<DisputeResponse>), AppError> {
    if req.reporter_name.trim().is_empty() {
        return Err(AppError::Validation(
            "reporter_name must not be empty".to_string(),
        ));
    }
    if req.reason.trim().is_empty() {
        return Err(AppError::Validation("reason must not be empty".to_string()));
    }

    let mut errand = load_errand(&state, id)?;
    let dispute = errand
        .open_dispute(Party::guest(req.reporter_name), req.reason)?
        .clone();
    state.store.save(&errand)?;
    tracing::info!(errand_id = %errand.id, dispute_id = %dispute.id, "dispute opened");

    let response = dispute_to_response(&dispute, errand_to_response(&errand));
    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// POST /v1/errands/{id}/dispute/resolve — Admin decides the outcome.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/dispute/resolve",
    params(("id" = String, Path, description = "Errand UUID")),
    request_body = ResolveDisputeRequest,
    responses(
        (status = 200, description = "Dispute resolved", body = DisputeResponse),
        (status = 403, description = "Resolution is admin-only"),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "No open dispute"),
        (status = 422, description = "Validation error"),
    ),
    tag = "disputes"
)]
pub(crate) async fn resolve_dispute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResolveDisputeRequest>,
) -> Result<Json<DisputeResponse>, AppError> {
    let role = parse_role(&req.role)?;
    require_permission(role, Action::AdminOnly)?;
    let outcome = parse_outcome(&req.outcome)?;

    let mut errand = load_errand(&state, id)?;
    errand.resolve_dispute(Party::guest(req.resolver_name), outcome)?;
    state.store.save(&errand)?;
    tracing::info!(errand_id = %errand.id, outcome = %outcome, "dispute resolved");

    let errand_view = errand_to_response(&errand);
    let dispute = errand.dispute.as_ref().ok_or_else(|| {
        AppError::Internal(format!("errand {id} lost its dispute record"))
    })?;
    Ok(Json(dispute_to_response(dispute, errand_view)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
