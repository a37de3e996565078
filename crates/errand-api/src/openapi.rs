//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
///
/// Registers all utoipa-documented routes, schemas, and tags. Serves as the
/// single source of truth for integrators.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Errand Stack API",
        version = "0.1.0",
        description = "HTTP surface for the errand marketplace lifecycle engine.\n\nProvides:\n- **Errand lifecycle** — posting, helper matching, start/complete/cancel with the fixed transition table\n- **Settlement** — 10% platform fee split computed on completion, payout tracking\n- **Cancellation penalties** — capped percentage penalties mirrored to helper compensation\n- **Disputes** — side-records resolved by admins into done/cancelled outcomes\n- **Reviews** — 1–5 ratings between the parties once an errand is terminal\n- **Verification codes** — one-time contact codes with a 3-minute TTL",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Errand lifecycle ─────────────────────────────────────────────
        crate::routes::errands::post_errand,
        crate::routes::errands::list_errands,
        crate::routes::errands::get_errand,
        crate::routes::errands::match_helper,
        crate::routes::errands::start_errand,
        crate::routes::errands::complete_errand,
        crate::routes::errands::cancel_errand,
        crate::routes::errands::mark_paid,
        // ── Disputes ─────────────────────────────────────────────────────
        crate::routes::disputes::open_dispute,
        crate::routes::disputes::resolve_dispute,
        // ── Reviews ──────────────────────────────────────────────────────
        crate::routes::reviews::submit_review,
        crate::routes::reviews::list_reviews,
        // ── Verification ─────────────────────────────────────────────────
        crate::routes::verification::issue_code,
        crate::routes::verification::verify_code,
    ),
    components(
        schemas(
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Errand DTOs ─────────────────────────────────────────────
            crate::routes::errands::PostErrandRequest,
            crate::routes::errands::MatchRequest,
            crate::routes::errands::ErrandResponse,
            crate::routes::errands::SettlementView,
            crate::routes::errands::CancellationView,
            // ── Dispute DTOs ────────────────────────────────────────────
            crate::routes::disputes::OpenDisputeRequest,
            crate::routes::disputes::ResolveDisputeRequest,
            crate::routes::disputes::DisputeResponse,
            // ── Review DTOs ─────────────────────────────────────────────
            crate::routes::reviews::SubmitReviewRequest,
            crate::routes::reviews::ReviewView,
            // ── Verification DTOs ───────────────────────────────────────
            crate::routes::verification::IssueCodeRequest,
            crate::routes::verification::IssuedCodeResponse,
            crate::routes::verification::VerifyCodeRequest,
            crate::routes::verification::VerifyCodeResponse,
        )
    ),
    tags(
        (name = "errands", description = "Errand lifecycle — posting, matching, progress, settlement, cancellation"),
        (name = "disputes", description = "Dispute side-records and admin resolution"),
        (name = "reviews", description = "Post-completion ratings between the parties"),
        (name = "verification", description = "One-time contact verification codes"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI serving router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
