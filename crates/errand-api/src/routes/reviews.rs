//! # Review Routes
//!
//! Submitting and listing the ratings parties leave for each other once an
//! errand is terminal. Rating bounds and the one-review-per-(reviewer,
//! target) rule are enforced by `errand_state::Errand::add_review`.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use errand_state::{Party, Review, ReviewTarget};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::routes::errands::load_errand;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to submit a review.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReviewRequest {
    /// Display name of the reviewer.
    pub reviewer_name: String,
    /// Which role the review is about (`requester` or `helper`).
    pub target: String,
    /// Rating from 1 (worst) to 5 (best).
    pub rating: u8,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// One review in API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewView {
    pub reviewer_name: String,
    pub target: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub submitted_at: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the review router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/errands/{id}/reviews",
        post(submit_review).get(list_reviews),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_target(s: &str) -> Result<ReviewTarget, AppError> {
    match s {
        "requester" => Ok(ReviewTarget::Requester),
        "helper" => Ok(ReviewTarget::Helper),
        other => Err(AppError::Validation(format!(
            "unknown review target: '{other}'"
        ))),
    }
}

fn review_to_view(r: &Review) -> ReviewView {
    ReviewView {
        reviewer_name: r.reviewer.name.clone(),
        target: r.target.as_str().to_string(),
        rating: r.rating,
        comment: r.comment.clone(),
        submitted_at: r.submitted_at.to_iso8601(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/errands/{id}/reviews — Leave a review on a finished errand.
#[utoipa::path(
    post,
    path = "/v1/errands/{id}/reviews",
    params(("id" = String, Path, description = "Errand UUID")),
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review recorded", body = ReviewView),
        (status = 404, description = "Errand not found"),
        (status = 409, description = "Errand not finished, or duplicate review"),
        (status = 422, description = "Validation error"),
    ),
    tag = "reviews"
)]
pub(crate) async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitReviewRequest>,
) -> Result<(axum::http::StatusCode, Json<ReviewView>), AppError> {
    if req.reviewer_name.trim().is_empty() {
        return Err(AppError::Validation(
            "reviewer_name must not be empty".to_string(),
        ));
    }
    let target = parse_target(&req.target)?;

    let mut errand = load_errand(&state, id)?;
    errand.add_review(
        Party::guest(req.reviewer_name),
        target,
        req.rating,
        req.comment,
    )?;
    state.store.save(&errand)?;

    // add_review appends, so the new review is the last.
    let view = errand
        .reviews
        .last()
        .map(review_to_view)
        .ok_or_else(|| AppError::Internal(format!("errand {id} lost its review")))?;
    Ok((axum::http::StatusCode::CREATED, Json(view)))
}

/// GET /v1/errands/{id}/reviews — List reviews in submission order.
#[utoipa::path(
    get,
    path = "/v1/errands/{id}/reviews",
    params(("id" = String, Path, description = "Errand UUID")),
    responses(
        (status = 200, description = "Reviews for the errand", body = Vec<ReviewView>),
        (status = 404, description = "Errand not found"),
    ),
    tag = "reviews"
)]
pub(crate) async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewView>>, AppError> {
    let errand = load_errand(&state, id)?;
    Ok(Json(errand.reviews.iter().map(review_to_view).collect()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use errand_core::Krw;
    use errand_state::{Errand, ErrandCategory};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(state: AppState) -> Router<()> {
        router().with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn done_errand(state: &AppState) -> String {
        let mut e = Errand::post(
            "Grocery run",
            "Milk and eggs from the corner store",
            ErrandCategory::Convenience,
            Krw(8_000),
            Party::guest("jiyoung"),
        );
        e.assign_helper(Party::guest("minsu")).unwrap();
        e.start().unwrap();
        e.complete().unwrap();
        state.store.save(&e).unwrap();
        e.id.as_uuid().to_string()
    }

    fn open_errand(state: &AppState) -> String {
        let e = Errand::post(
            "Grocery run",
            "Milk and eggs",
            ErrandCategory::Convenience,
            Krw(8_000),
            Party::guest("jiyoung"),
        );
        state.store.save(&e).unwrap();
        e.id.as_uuid().to_string()
    }

    async fn submit(
        state: &AppState,
        id: &str,
        body: serde_json::Value,
    ) -> axum::response::Response {
        let app = test_app(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri(format!("/v1/errands/{id}/reviews"))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn submit_and_list_reviews() {
        let state = AppState::in_memory();
        let id = done_errand(&state);

        let body = serde_json::json!({
            "reviewer_name": "jiyoung",
            "target": "helper",
            "rating": 5,
            "comment": "fast and friendly"
        });
        let response = submit(&state, &id, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let view: ReviewView = body_json(response).await;
        assert_eq!(view.rating, 5);
        assert_eq!(view.target, "helper");

        let app = test_app(state);
        let request = Request::builder()
            .method("GET")
            .uri(format!("/v1/errands/{id}/reviews"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<ReviewView> = body_json(response).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reviewer_name, "jiyoung");
    }

    #[tokio::test]
    async fn review_before_terminal_returns_409() {
        let state = AppState::in_memory();
        let id = open_errand(&state);

        let body = serde_json::json!({
            "reviewer_name": "jiyoung",
            "target": "helper",
            "rating": 4
        });
        let response = submit(&state, &id, body).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn out_of_range_rating_returns_422() {
        let state = AppState::in_memory();
        let id = done_errand(&state);

        let body = serde_json::json!({
            "reviewer_name": "jiyoung",
            "target": "helper",
            "rating": 6
        });
        let response = submit(&state, &id, body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn duplicate_review_returns_409() {
        let state = AppState::in_memory();
        let id = done_errand(&state);

        let body = serde_json::json!({
            "reviewer_name": "jiyoung",
            "target": "helper",
            "rating": 5
        });
        let response = submit(&state, &id, body.clone()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let response = submit(&state, &id, body).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
