//! # Errand Lifecycle Routes
//!
//! HTTP surface for the errand lifecycle. Exposes endpoints to post errands,
//! advance them through the state machine (Open → Matched → InProgress →
//! Done / Cancelled), mark settlements paid, and query errand state.
//!
//! ## Lifecycle Transitions
//!
//! The HTTP layer validates payloads and role permissions, then delegates to
//! `errand_state::Errand` methods which enforce the transition table.
//! Lifecycle rejections surface as 409, role denials as 403.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use errand_core::{ErrandId, Krw};
use errand_rules::{role_may, Action, Role};
use errand_state::{Errand, ErrandCategory, Party};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to post a new errand.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostErrandRequest {
    /// Short title shown in listings.
    pub title: String,
    /// Full task description.
    pub detail: String,
    /// Task category (`convenience`, `delivery`, `bank`, `civic_office`,
    /// `other`).
    pub category: String,
    /// Fixed reward in whole won.
    pub reward_won: u64,
    /// Requester display name.
    pub requester_name: String,
    /// Role of the caller (`requester`, `helper`, `admin`).
    pub role: String,
}

/// Request to match a helper to an open errand.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MatchRequest {
    /// Helper display name.
    pub helper_name: String,
    /// Role of the caller (`requester`, `helper`, `admin`).
    pub role: String,
}

/// Settlement details in API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementView {
    pub platform_fee_won: u64,
    pub helper_payout_won: u64,
    pub paid: bool,
    pub settled_at: String,
}

/// Cancellation details in API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancellationView {
    pub level: String,
    pub requester_penalty_won: u64,
    pub helper_compensation_won: u64,
    pub reason: String,
    pub decided_at: String,
}

/// Errand summary in API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrandResponse {
    pub errand_id: String,
    pub title: String,
    pub detail: String,
    pub category: String,
    pub reward_won: u64,
    pub status: String,
    pub requester_name: String,
    pub helper_name: Option<String>,
    pub settlement: Option<SettlementView>,
    pub cancellation: Option<CancellationView>,
    pub has_dispute: bool,
    pub review_count: usize,
    pub transition_count: usize,
    pub created_at: String,
    pub updated_at: String,
    pub valid_transitions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the errand lifecycle router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/errands", post(post_errand).get(list_errands))
        .route("/v1/errands/{id}", get(get_errand))
        .route("/v1/errands/{id}/match", post(match_helper))
        .route("/v1/errands/{id}/start", post(start_errand))
        .route("/v1/errands/{id}/complete", post(complete_errand))
        .route("/v1/errands/{id}/cancel", post(cancel_errand))
        .route("/v1/errands/{id}/settlement/paid", post(mark_paid))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn parse_role(s: &str) -> Result<Role, AppError> {
    Role::from_str_opt(s).ok_or_else(|| AppError::Validation(format!("unknown role: '{s}'")))
}

pub(crate) fn require_permission(role: Role, action: Action) -> Result<(), AppError> {
    if role_may(role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "role '{role}' may not perform '{action}'"
        )))
    }
}

pub(crate) fn load_errand(state: &AppState, id: Uuid) -> Result<Errand, AppError> {
    state
        .store
        .load(ErrandId::from_uuid(id))?
        .ok_or_else(|| AppError::NotFound(format!("errand {id} not found")))
}

pub(crate) fn errand_to_response(e: &Errand) -> ErrandResponse {
    ErrandResponse {
        errand_id: e.id.as_uuid().to_string(),
        title: e.title.clone(),
        detail: e.detail.clone(),
        category: e.category.as_str().to_string(),
        reward_won: e.reward.won(),
        status: e.status.as_str().to_string(),
        requester_name: e.requester.name.clone(),
        helper_name: e.helper.as_ref().map(|h| h.name.clone()),
        settlement: e.settlement.as_ref().map(|s| SettlementView {
            platform_fee_won: s.platform_fee.won(),
            helper_payout_won: s.helper_payout.won(),
            paid: s.paid,
            settled_at: s.settled_at.to_iso8601(),
        }),
        cancellation: e.cancellation.as_ref().map(|c| CancellationView {
            level: c.level.as_str().to_string(),
            requester_penalty_won: c.requester_penalty.won(),
            helper_compensation_won: c.helper_compensation.won(),
            reason: c.reason.clone(),
            decided_at: c.decided_at.to_iso8601(),
        }),
        has_dispute: e.dispute.is_some(),
        review_count: e.reviews.len(),
        transition_count: e.transitions.len(),
        created_at: e.created_at.to_iso8601(),
        updated_at: e.updated_at.to_iso8601(),
        valid_transitions: e
            .status
            .valid_transitions()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/errands — Post a new errand.
#[utoipa::path(
    post,
    path = "/v1/errands",
    request_body = PostErrandRequest,
    responses(
        (status = 201, description = "Errand posted", body = ErrandResponse),
        (status = 403, description = "Role may not post errands"),
        (status = 422, description = "Validation error"),
    ),
    tag = "errands"
)]
pub(crate) async fn post_errand(
    State(state): State<AppState>,
    Json(req): Json<PostErrandRequest>,
) -> Result<(axum::http::StatusCode, Json<ErrandResponse>), AppError> {
    let role = parse_role(&req.role)?;
    require_permission(role, Action::CreateErrand)?;

    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    if req.requester_name.trim().is_empty() {
        return Err(AppError::Validation(
            "requester_name must not be empty".to_string(),
        ));
    }
    if req.reward_won == 0 {
        return Err(AppError::Validation(
            "reward_won must be positive".to_string(),
        ));
    }
    let category = ErrandCategory::from_str_opt(&req.category)
        .ok_or_else(|| AppError::Validation(format!("unknown category: '{}'", req.category)))?;

    let errand = Errand::post(
        req.title,
        req.detail,
        category,
        Krw(req.reward_won),
        Party::guest(req.requester_name),
    );

    state.store.save(&errand)?;
    tracing::info!(errand_id = %errand.id, reward = %errand.reward, "errand posted");
    Ok((
        axum::http::StatusCode::CREATED,
        Json(errand_to_response(&errand)),
    ))
}

/// GET /v1/errands — List all errands, most recently updated first.
#[utoipa::path(
    get,
    path = "/v1/errands",
    responses(
        (status = 200, description = "List of errands", body = Vec<ErrandResponse>),
    ),
    tag = "errands"
)]
pub(crate) async fn list_errands(
    State(state): State<AppState>,
) -> Result<Json<Vec<ErrandResponse>>, AppError> {
    let all = state.store.list()?;
    let responses: Vec<ErrandResponse> = all.iter().map(errand_to_response).collect();
    Ok(Json(responses))
}

/// GET /v1/errands/{id} — Get errand details.
#[utoipa::path(
    get,
    path = "/v1/errands/{id}",
    params(("id" = String, Path, description = "Errand UUID")),
    responses(
        (status = 200, description = "Errand details", body = ErrandResponse),
        (status = 404, description = "Errand not found"),
    ),
    tag = "errands"
)]
pub(crate) async fn get_errand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrandResponse>, AppError> {
    let errand = load_errand(&state, id)?;
    Ok(Json(errand_to_response(&errand)))
}

/// POST /v1/errands/{id}/match — Open → Matched.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/match",
    params(("id" = String, Path, description = "Errand UUID")),
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Helper matched", body = ErrandResponse),
        (status = 403, description = "Role may not accept matches"),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "Invalid transition"),
    ),
    tag = "errands"
)]
pub(crate) async fn match_helper(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<ErrandResponse>, AppError> {
    let role = parse_role(&req.role)?;
    require_permission(role, Action::AcceptMatch)?;
    if req.helper_name.trim().is_empty() {
        return Err(AppError::Validation(
            "helper_name must not be empty".to_string(),
        ));
    }

    let mut errand = load_errand(&state, id)?;
    errand.assign_helper(Party::guest(req.helper_name))?;
    state.store.save(&errand)?;
    Ok(Json(errand_to_response(&errand)))
}

/// POST /v1/errands/{id}/start — Matched → InProgress.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/start",
    params(("id" = String, Path, description = "Errand UUID")),
    responses(
        (status = 200, description = "Errand started", body = ErrandResponse),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "Invalid transition"),
    ),
    tag = "errands"
)]
pub(crate) async fn start_errand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrandResponse>, AppError> {
    let mut errand = load_errand(&state, id)?;
    errand.start()?;
    state.store.save(&errand)?;
    Ok(Json(errand_to_response(&errand)))
}

/// POST /v1/errands/{id}/complete — InProgress → Done, computing the
/// settlement split.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/complete",
    params(("id" = String, Path, description = "Errand UUID")),
    responses(
        (status = 200, description = "Errand completed with settlement", body = ErrandResponse),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "Invalid transition"),
    ),
    tag = "errands"
)]
pub(crate) async fn complete_errand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrandResponse>, AppError> {
    let mut errand = load_errand(&state, id)?;
    errand.complete()?;
    state.store.save(&errand)?;
    tracing::info!(errand_id = %errand.id, "errand completed");
    Ok(Json(errand_to_response(&errand)))
}

/// POST /v1/errands/{id}/cancel — Any non-terminal status → Cancelled,
/// computing the penalty decision.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/cancel",
    params(("id" = String, Path, description = "Errand UUID")),
    responses(
        (status = 200, description = "Errand cancelled with penalty", body = ErrandResponse),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "Invalid transition"),
    ),
    tag = "errands"
)]
pub(crate) async fn cancel_errand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrandResponse>, AppError> {
    let mut errand = load_errand(&state, id)?;
    errand.cancel()?;
    state.store.save(&errand)?;
    tracing::info!(errand_id = %errand.id, "errand cancelled");
    Ok(Json(errand_to_response(&errand)))
}

/// POST /v1/errands/{id}/settlement/paid — Mark the settlement payout
/// disbursed.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/settlement/paid",
    params(("id" = String, Path, description = "Errand UUID")),
    responses(
        (status = 200, description = "Settlement marked paid", body = ErrandResponse),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "No pending settlement"),
    ),
    tag = "errands"
)]
pub(crate) async fn mark_paid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ErrandResponse>, AppError> {
    let mut errand = load_errand(&state, id)?;
    errand.mark_settlement_paid()?;
    state.store.save(&errand)?;
    Ok(Json(errand_to_response(&errand)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
