//! End-to-end tests over the assembled application router: the full errand
//! lifecycle driven through HTTP, plus the health and OpenAPI endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use errand_api::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn app(state: &AppState) -> Router {
    errand_api::app(state.clone())
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post(state: &AppState, uri: &str, body: Option<Value>) -> axum::response::Response {
    let builder = Request::builder().method("POST").uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app(state).oneshot(request).await.unwrap()
}

async fn get(state: &AppState, uri: &str) -> axum::response::Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app(state).oneshot(request).await.unwrap()
}

#[tokio::test]
async fn health_probe_responds() {
    let state = AppState::in_memory();
    let response = get(&state, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let state = AppState::in_memory();
    let response = get(&state, "/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/errands"].is_object());
    assert!(spec["paths"]["/v1/verification/codes"].is_object());
}

#[tokio::test]
async fn disputed_errand_settles_after_admin_resolution() {
    let state = AppState::in_memory();

    // Post, match, start.
    let response = post(
        &state,
        "/v1/errands",
        Some(serde_json::json!({
            "title": "Civic office filing",
            "detail": "Stamp the residence form",
            "category": "civic_office",
            "reward_won": 10_000,
            "requester_name": "jiyoung",
            "role": "requester"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let errand = body_json(response).await;
    let id = errand["errand_id"].as_str().unwrap().to_string();

    let response = post(
        &state,
        &format!("/v1/errands/{id}/match"),
        Some(serde_json::json!({"helper_name": "minsu", "role": "helper"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post(&state, &format!("/v1/errands/{id}/start"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The requester files a dispute; the admin resolves it as done.
    let response = post(
        &state,
        &format!("/v1/errands/{id}/dispute"),
        Some(serde_json::json!({
            "reporter_name": "minsu",
            "reason": "requester refuses approval"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post(
        &state,
        &format!("/v1/errands/{id}/dispute/resolve"),
        Some(serde_json::json!({
            "resolver_name": "ops-admin",
            "role": "admin",
            "outcome": "done"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let resolved = body_json(response).await;
    assert_eq!(resolved["errand"]["status"], "done");
    assert_eq!(resolved["errand"]["settlement"]["platform_fee_won"], 1_000);
    assert_eq!(resolved["errand"]["settlement"]["helper_payout_won"], 9_000);

    // Both parties can now review.
    let response = post(
        &state,
        &format!("/v1/errands/{id}/reviews"),
        Some(serde_json::json!({
            "reviewer_name": "minsu",
            "target": "requester",
            "rating": 3,
            "comment": "slow to approve"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(&state, &format!("/v1/errands/{id}")).await;
    let errand = body_json(response).await;
    assert_eq!(errand["review_count"], 1);
    assert_eq!(errand["has_dispute"], true);
}

#[tokio::test]
async fn matched_cancellation_scenario() {
    let state = AppState::in_memory();

    let response = post(
        &state,
        "/v1/errands",
        Some(serde_json::json!({
            "title": "Parcel pickup",
            "detail": "Locker 12",
            "category": "delivery",
            "reward_won": 10_000,
            "requester_name": "jiyoung",
            "role": "requester"
        })),
    )
    .await;
    let errand = body_json(response).await;
    let id = errand["errand_id"].as_str().unwrap().to_string();

    post(
        &state,
        &format!("/v1/errands/{id}/match"),
        Some(serde_json::json!({"helper_name": "minsu", "role": "helper"})),
    )
    .await;

    let response = post(&state, &format!("/v1/errands/{id}/cancel"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cancelled = body_json(response).await;
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancellation"]["requester_penalty_won"], 2_000);
    assert_eq!(cancelled["cancellation"]["helper_compensation_won"], 2_000);
    assert_eq!(
        cancelled["cancellation"]["reason"],
        "cancelled after match (medium penalty)"
    );

    // Terminal: no further transitions through any endpoint.
    let response = post(&state, &format!("/v1/errands/{id}/start"), None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
