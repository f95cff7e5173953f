use std::env;
use std::path::PathBuf;

/// Application configuration, resolved once at startup from the environment
/// and passed to handlers through [`crate::state::AppState`].
///
/// Everything here has a working development default so the server runs with
/// no environment at all: content falls back to the local file store and the
/// admin mutation guard is disabled (documented as effectively unprotected).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to (`FOLIO_PORT` / `PORT`).
    pub port: u16,

    /// Remote key-value REST endpoint, e.g. an Upstash Redis REST URL
    /// (`KV_REST_API_URL`). Unset means local-only operation.
    pub kv_rest_url: Option<String>,
    /// Bearer token for the remote store (`KV_REST_API_TOKEN`).
    pub kv_rest_token: Option<String>,
    /// Deadline for each remote store call, seconds (`KV_TIMEOUT_SECS`).
    /// A timed-out call is treated like any other remote failure.
    pub kv_timeout_secs: u64,

    /// File backing the local fallback store (`FOLIO_DATA_FILE`).
    pub data_file: PathBuf,
    /// Directory uploaded images are written to (`FOLIO_UPLOAD_DIR`).
    pub upload_dir: PathBuf,

    /// Shared secret gating admin mutations (`ADMIN_API_TOKEN`).
    /// When unset the guard passes everything through.
    pub admin_api_token: Option<String>,

    /// Admin UI login credentials (`ADMIN_EMAIL` / `ADMIN_PASSWORD`).
    pub admin_email: String,
    pub admin_password: String,
    /// HMAC secret for session tokens (`SESSION_SECRET`).
    pub session_secret: String,
    /// Session lifetime in hours (`SESSION_TTL_HOURS`).
    pub session_ttl_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            kv_rest_url: None,
            kv_rest_token: None,
            kv_timeout_secs: 5,
            data_file: PathBuf::from(".data/content.json"),
            upload_dir: PathBuf::from("public/uploads"),
            admin_api_token: None,
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin".to_string(),
            session_secret: "dev-session-secret-change-me".to_string(),
            session_ttl_hours: 24,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env::var("FOLIO_PORT").ok().or_else(|| env::var("PORT").ok()) {
            config.port = v.parse().unwrap_or(config.port);
        }

        config.kv_rest_url = non_empty(env::var("KV_REST_API_URL").ok());
        config.kv_rest_token = non_empty(env::var("KV_REST_API_TOKEN").ok());
        if let Ok(v) = env::var("KV_TIMEOUT_SECS") {
            config.kv_timeout_secs = v.parse().unwrap_or(config.kv_timeout_secs);
        }

        if let Ok(v) = env::var("FOLIO_DATA_FILE") {
            config.data_file = PathBuf::from(v);
        }
        if let Ok(v) = env::var("FOLIO_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(v);
        }

        config.admin_api_token = non_empty(env::var("ADMIN_API_TOKEN").ok());

        if let Ok(v) = env::var("ADMIN_EMAIL") {
            config.admin_email = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin_password = v;
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            config.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            config.session_ttl_hours = v.parse().unwrap_or(config.session_ttl_hours);
        }

        config
    }

    /// True when both halves of the remote store credential pair are present.
    pub fn remote_store_configured(&self) -> bool {
        self.kv_rest_url.is_some() && self.kv_rest_token.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
