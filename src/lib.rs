pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod store;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(auth_routes())
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::{content, messages};

    Router::new()
        // Contact-form submission (static segment wins over :entity)
        .route("/api/messages", post(messages::submit))
        .route("/api/:entity", get(content::public_get))
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/whoami", get(auth::whoami))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::{content, messages, upload};

    Router::new()
        .route("/api/admin/meta", get(content::admin_meta))
        .route("/api/admin/upload", post(upload::upload))
        .route(
            "/api/admin/messages/:id",
            put(messages::update).delete(messages::remove),
        )
        .route(
            "/api/admin/:entity",
            get(content::admin_get).post(content::admin_post),
        )
        // Guard runs on mutating methods only; reads pass through
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::admin_guard,
        ))
        // Wide enough to receive a just-over-limit upload and answer 400
        // ourselves instead of a bare 413 from the body limit
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "folio-api",
        "version": version,
        "description": "Portfolio/CMS backend: public content API plus guarded admin surface",
        "endpoints": {
            "public": "/api/:entity (GET), /api/messages (POST)",
            "auth": "/api/auth/login, /api/auth/logout, /api/auth/whoami",
            "admin": "/api/admin/:entity (GET/POST), /api/admin/messages/:id (PUT/DELETE), /api/admin/meta, /api/admin/upload",
        }
    }))
}

async fn health(State(state): State<AppState>) -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "remote_store": if state.store.is_configured() { "configured" } else { "local fallback" },
    }))
}
