use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Name of the HTTP-only cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "folio_session";

/// Signed, time-limited admin session. Independent of the mutation-guard
/// token: the session authenticates the admin UI, the guard gates writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: &str, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: email.to_string(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn issue_session(config: &AppConfig) -> Result<String, ApiError> {
    let claims = Claims::new(&config.admin_email, config.session_ttl_hours);
    let key = EncodingKey::from_secret(config.session_secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| {
        tracing::error!("session token generation failed: {}", e);
        ApiError::internal_server_error("Failed to create session")
    })
}

pub fn verify_session(config: &AppConfig, token: &str) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(config.session_secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| ApiError::unauthorized("Invalid or expired session"))
}

/// `Set-Cookie` value for a fresh session.
pub fn session_cookie(token: &str, ttl_hours: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl_hours * 3600
    )
}

/// `Set-Cookie` value that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Pull the session token out of the `Cookie` header, if present.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let prefix = format!("{}=", SESSION_COOKIE);
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
