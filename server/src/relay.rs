//! Messaging relay routes
//!
//! `POST /api/line` forwards `{userId, message}` to the push API with the
//! server-held credential and passes the upstream status and body back.

use crate::RelayState;
use axum::{
    body::Bytes,
    extract::State as AxumState,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use liffpoints_core::{PushMessageRequest, RelayRequest, RelayResponse};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

const INTERNAL_ERROR: &str = "Internal Server Error";

// ─── Router ────────────────────────────────────────────────────────

/// Build the axum router with all routes and middleware
pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route(
            "/api/line",
            post(handle_relay).fallback(handle_method_not_allowed),
        )
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─── Route Handlers ────────────────────────────────────────────────

/// POST /api/line: relay one push message
async fn handle_relay(AxumState(state): AxumState<RelayState>, body: Bytes) -> Response {
    let request: RelayRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("Malformed relay request: {}", e);
            return internal_error();
        }
    };

    if request.user_id.trim().is_empty() || request.message.trim().is_empty() {
        warn!("Relay request with blank userId or message rejected");
        return (
            StatusCode::BAD_REQUEST,
            Json(RelayResponse::failure("userId and message are required")),
        )
            .into_response();
    }

    let push = PushMessageRequest::text(&request.user_id, &request.message);

    match state.push.push(&push).await {
        Ok(reply) if reply.is_success() => {
            debug!("Relayed message to {}", request.user_id);
            (StatusCode::OK, Json(RelayResponse::success(reply.body))).into_response()
        }
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            warn!("Upstream rejected push with HTTP {}", status);
            (status, Json(RelayResponse::failure(reply.body))).into_response()
        }
        Err(e) => {
            error!("Relay to push API failed: {}", e);
            internal_error()
        }
    }
}

/// Any non-POST method on /api/line
async fn handle_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(json!({ "error": "Method Not Allowed", "allow": ["POST"] })),
    )
        .into_response()
}

/// GET /health: liveness check
async fn handle_health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(RelayResponse::failure(INTERNAL_ERROR)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use liffpoints_core::{Error, Result, UpstreamReply};
    use liffpoints_networking::PushApi;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    struct FakePush {
        reply: fn() -> Result<UpstreamReply>,
        seen: Mutex<Vec<PushMessageRequest>>,
    }

    impl FakePush {
        fn new(reply: fn() -> Result<UpstreamReply>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PushApi for FakePush {
        async fn push(&self, request: &PushMessageRequest) -> Result<UpstreamReply> {
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn accepted() -> Result<UpstreamReply> {
        Ok(UpstreamReply {
            status: 200,
            body: json!({}),
        })
    }

    async fn call(push: Arc<FakePush>, method: Method, body: &str) -> (StatusCode, Response) {
        let app = build_router(RelayState::new(push));
        let request = Request::builder()
            .method(method)
            .uri("/api/line")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_relay_success_wraps_upstream_body() {
        let push = FakePush::new(accepted);
        let (status, response) =
            call(push.clone(), Method::POST, r#"{"userId":"U1","message":"hi"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"success": true, "data": {}}));

        let seen = push.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].to, "U1");
        assert_eq!(
            serde_json::to_value(&seen[0]).unwrap(),
            json!({"to": "U1", "messages": [{"type": "text", "text": "hi"}]})
        );
    }

    #[tokio::test]
    async fn test_relay_passes_upstream_status() {
        let push = FakePush::new(|| {
            Ok(UpstreamReply {
                status: 400,
                body: json!({"message": "invalid recipient"}),
            })
        });
        let (status, response) =
            call(push, Method::POST, r#"{"userId":"nobody","message":"hi"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": {"message": "invalid recipient"}})
        );
    }

    #[tokio::test]
    async fn test_relay_upstream_failure_is_500() {
        let push = FakePush::new(|| Err(Error::NetworkError("connection reset".into())));
        let (status, response) =
            call(push, Method::POST, r#"{"userId":"U1","message":"hi"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": "Internal Server Error"}));
    }

    #[tokio::test]
    async fn test_relay_malformed_body_is_500() {
        let push = FakePush::new(accepted);
        let (status, response) = call(push.clone(), Method::POST, "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": "Internal Server Error"}));
        assert_eq!(push.calls(), 0);
    }

    #[tokio::test]
    async fn test_relay_blank_fields_not_forwarded() {
        let push = FakePush::new(accepted);
        let (status, _) =
            call(push.clone(), Method::POST, r#"{"userId":"  ","message":"hi"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(push.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_post_is_method_not_allowed() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let push = FakePush::new(accepted);
            let (status, response) = call(push.clone(), method, "").await;

            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            let allow = response
                .headers()
                .get(header::ALLOW)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            assert!(allow.contains("POST"));
            assert_eq!(json_body(response).await["allow"], json!(["POST"]));
            assert_eq!(push.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(RelayState::new(FakePush::new(accepted)));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }
}
