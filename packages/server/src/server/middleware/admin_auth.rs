//! Admin token gate.
//!
//! Real authentication lives outside this system; moderation and other admin
//! routes are gated by a single deploy-time token checked here. The token is
//! accepted either as a bearer Authorization header or an x-admin-token
//! header (the admin UI uses the latter).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum::middleware::Next;
use serde_json::json;
use tracing::debug;

pub async fn admin_auth_middleware(
    admin_token: Arc<String>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_authorized(&request, &admin_token) {
        next.run(request).await
    } else {
        debug!(path = %request.uri().path(), "Admin request rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "admin token required" })),
        )
            .into_response()
    }
}

fn is_authorized(request: &Request<Body>, admin_token: &str) -> bool {
    if let Some(value) = request.headers().get("authorization") {
        if let Ok(raw) = value.to_str() {
            let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
            if token == admin_token {
                return true;
            }
        }
    }

    if let Some(value) = request.headers().get("x-admin-token") {
        if let Ok(token) = value.to_str() {
            if token == admin_token {
                return true;
            }
        }
    }

    false
}
