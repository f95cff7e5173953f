// Admin session endpoints: credential login issuing an HTTP-only cookie,
// cookie verification, logout.
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{clear_session_cookie, issue_session, session_cookie, session_from_headers, verify_session};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: LoginRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("Invalid JSON body"))?;

    if request.email != state.config.admin_email || request.password != state.config.admin_password
    {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_session(&state.config)?;
    let cookie = session_cookie(&token, state.config.session_ttl_hours);
    tracing::info!("admin session opened for {}", request.email);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "message": "Logged in" })),
    ))
}

/// POST /api/auth/logout
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(json!({ "message": "Logged out" })),
    )
}

/// GET /api/auth/whoami
pub async fn whoami(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = session_from_headers(&headers)
        .ok_or_else(|| ApiError::unauthorized("No active session"))?;
    let claims = verify_session(&state.config, &token)?;

    Ok(Json(json!({ "email": claims.sub, "expires_at": claims.exp })))
}
