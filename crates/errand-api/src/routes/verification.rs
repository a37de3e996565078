//! # Verification Code Routes
//!
//! Issuing and checking one-time contact verification codes. Codes live in
//! the process-local `AppState` store, expire after the 3-minute TTL rule
//! from `errand-rules`, and are consumed on first successful check.
//! Re-issuing for the same contact replaces any earlier code.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use errand_core::Timestamp;
use errand_rules::DEFAULT_CODE_TTL_MS;
use errand_state::VerificationCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Request to issue a verification code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueCodeRequest {
    /// Contact address (phone number or similar) the code is tied to.
    pub contact: String,
}

/// An issued verification code.
///
/// The code is returned in the response because delivery channels (SMS and
/// the like) sit outside this service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IssuedCodeResponse {
    pub contact: String,
    pub code: String,
    pub issued_at: String,
    /// Validity window in milliseconds.
    pub ttl_ms: i64,
}

/// Request to check a verification code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyCodeRequest {
    /// Contact address the code was issued for.
    pub contact: String,
    /// The code digits to check.
    pub code: String,
}

/// Outcome of a verification check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeResponse {
    pub verified: bool,
    /// Why verification failed, absent on success.
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the verification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/verification/codes", post(issue_code))
        .route("/v1/verification/verify", post(verify_code))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate six code digits from UUID randomness.
fn generate_code() -> String {
    let n = u128::from_le_bytes(*Uuid::new_v4().as_bytes()) % 1_000_000;
    format!("{n:06}")
}

fn rejected(reason: &str) -> Json<VerifyCodeResponse> {
    Json(VerifyCodeResponse {
        verified: false,
        reason: Some(reason.to_string()),
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/verification/codes — Issue a code for a contact.
#[utoipa::path(
    post,
    path = "/v1/verification/codes",
    request_body = IssueCodeRequest,
    responses(
        (status = 201, description = "Code issued", body = IssuedCodeResponse),
        (status = 422, description = "Validation error"),
    ),
    tag = "verification"
)]
pub(crate) async fn issue_code(
    State(state): State<AppState>,
    Json(req): Json<IssueCodeRequest>,
) -> Result<(axum::http::StatusCode, Json<IssuedCodeResponse>), AppError> {
    let contact = req.contact.trim().to_string();
    if contact.is_empty() {
        return Err(AppError::Validation(
            "contact must not be empty".to_string(),
        ));
    }

    let code = VerificationCode::issue(generate_code());
    let response = IssuedCodeResponse {
        contact: contact.clone(),
        code: code.code.clone(),
        issued_at: code.issued_at.to_iso8601(),
        ttl_ms: DEFAULT_CODE_TTL_MS,
    };
    state.codes.insert(contact, code);
    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// POST /v1/verification/verify — Check a code and consume it on success.
#[utoipa::path(
    post,
    path = "/v1/verification/verify",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerifyCodeResponse),
    ),
    tag = "verification"
)]
pub(crate) async fn verify_code(
    State(state): State<AppState>,
    Json(req): Json<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    let contact = req.contact.trim();
    let Some(mut entry) = state.codes.get_mut(contact) else {
        return Ok(rejected("no code issued for this contact"));
    };

    if entry.code != req.code {
        return Ok(rejected("code does not match"));
    }
    if entry.used {
        return Ok(rejected("code already used"));
    }
    if !entry.is_valid_at(Timestamp::now(), None) {
        return Ok(rejected("code expired"));
    }
    entry
        .consume()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(VerifyCodeResponse {
        verified: true,
        reason: None,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(state: AppState) -> Router<()> {
        router().with_state(state)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(
        state: &AppState,
        uri: &str,
        body: serde_json::Value,
    ) -> axum::response::Response {
        let app = test_app(state.clone());
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn issue_and_verify() {
        let state = AppState::in_memory();
        let body = serde_json::json!({"contact": "010-1234-5678"});
        let response = send(&state, "/v1/verification/codes", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let issued: IssuedCodeResponse = body_json(response).await;
        assert_eq!(issued.code.len(), 6);
        assert_eq!(issued.ttl_ms, 180_000);

        let body = serde_json::json!({"contact": "010-1234-5678", "code": issued.code});
        let response = send(&state, "/v1/verification/verify", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let outcome: VerifyCodeResponse = body_json(response).await;
        assert!(outcome.verified);
        assert!(outcome.reason.is_none());
    }

    #[tokio::test]
    async fn wrong_code_is_rejected() {
        let state = AppState::in_memory();
        let body = serde_json::json!({"contact": "010-1234-5678"});
        send(&state, "/v1/verification/codes", body).await;

        let body = serde_json::json!({"contact": "010-1234-5678", "code": "000000x"});
        let response = send(&state, "/v1/verification/verify", body).await;
        let outcome: VerifyCodeResponse = body_json(response).await;
        assert!(!outcome.verified);
        assert_eq!(outcome.reason.as_deref(), Some("code does not match"));
    }

    #[tokio::test]
    async fn unknown_contact_is_rejected() {
        let state = AppState::in_memory();
        let body = serde_json::json!({"contact": "010-0000-0000", "code": "123456"});
        let response = send(&state, "/v1/verification/verify", body).await;
        let outcome: VerifyCodeResponse = body_json(response).await;
        assert!(!outcome.verified);
    }

    #[tokio::test]
    async fn code_is_single_use() {
        let state = AppState::in_memory();
        let body = serde_json::json!({"contact": "010-1234-5678"});
        let response = send(&state, "/v1/verification/codes", body).await;
        let issued: IssuedCodeResponse = body_json(response).await;

        let body = serde_json::json!({"contact": "010-1234-5678", "code": issued.code});
        let response = send(&state, "/v1/verification/verify", body.clone()).await;
        let outcome: VerifyCodeResponse = body_json(response).await;
        assert!(outcome.verified);

        let response = send(&state, "/v1/verification/verify", body).await;
        let outcome: VerifyCodeResponse = body_json(response).await;
        assert!(!outcome.verified);
        assert_eq!(outcome.reason.as_deref(), Some("code already used"));
    }

    #[tokio::test]
    async fn reissue_replaces_previous_code() {
        let state = AppState::in_memory();
        let body = serde_json::json!({"contact": "010-1234-5678"});
        let response = send(&state, "/v1/verification/codes", body.clone()).await;
        let first: IssuedCodeResponse = body_json(response).await;
        let response = send(&state, "/v1/verification/codes", body).await;
        let second: IssuedCodeResponse = body_json(response).await;

        if first.code != second.code {
            let body = serde_json::json!({"contact": "010-1234-5678", "code": first.code});
            let response = send(&state, "/v1/verification/verify", body).await;
            let outcome: VerifyCodeResponse = body_json(response).await;
            assert!(!outcome.verified);
        }

        let body = serde_json::json!({"contact": "010-1234-5678", "code": second.code});
        let response = send(&state, "/v1/verification/verify", body).await;
        let outcome: VerifyCodeResponse = body_json(response).await;
        assert!(outcome.verified);
    }
}
