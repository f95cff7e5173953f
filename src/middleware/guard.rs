use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Shared-secret guard on the admin route space. Reads pass through;
/// mutating methods must present the configured token and a same-origin
/// request. With no `ADMIN_API_TOKEN` configured the token check is a
/// no-op — effectively unprotected, a deliberate permissive default for
/// low-stakes deployments.
pub async fn admin_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::GET || request.method() == Method::HEAD {
        return Ok(next.run(request).await);
    }

    // Origin mismatch rejects regardless of token validity.
    check_origin(request.headers())?;

    if let Some(expected) = &state.config.admin_api_token {
        match extract_admin_token(request.headers()) {
            Some(token) if token == *expected => {}
            Some(_) => return Err(ApiError::unauthorized("Invalid admin token")),
            None => return Err(ApiError::unauthorized("Missing admin token")),
        }
    }

    Ok(next.run(request).await)
}

/// When both `Origin` and `Host` are present, the origin must contain the
/// host string. A loose substring comparison, not an origin allow-list;
/// enough to stop casual cross-origin form posts.
fn check_origin(headers: &HeaderMap) -> Result<(), ApiError> {
    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());

    if let (Some(origin), Some(host)) = (origin, host) {
        if !origin.contains(host) {
            return Err(ApiError::bad_request("Cross-origin request rejected"));
        }
    }
    Ok(())
}

/// Token from `Authorization: Bearer <token>` or `x-admin-token`.
fn extract_admin_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            if !token.trim().is_empty() {
                return Some(token.trim().to_string());
            }
        }
    }

    headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
