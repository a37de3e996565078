//! # errand-api — Axum API Surface for the Errand Stack
//!
//! HTTP layer over the errand lifecycle engine. Handlers validate payloads
//! and role permissions, load an errand from the repository, run the state
//! machine in `errand-state`, and save the result; every business decision
//! stays in the inner crates.
//!
//! ## API Surface
//!
//! | Prefix                          | Module                    | Domain            |
//! |---------------------------------|---------------------------|-------------------|
//! | `/v1/errands/*`                 | [`routes::errands`]       | Errand lifecycle  |
//! | `/v1/errands/{id}/dispute/*`    | [`routes::disputes`]      | Disputes          |
//! | `/v1/errands/{id}/reviews`      | [`routes::reviews`]       | Reviews           |
//! | `/v1/verification/*`            | [`routes::verification`]  | Verification codes|
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// The health probe (`/health`) is mounted alongside the API routes; the
/// service carries no credentials.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::errands::router())
        .merge(routes::disputes::router())
        .merge(routes::reviews::router())
        .merge(routes::verification::router())
        .merge(openapi::router())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — returns 200 whenever the process is running.
async fn health() -> &'static str {
    "ok"
}
