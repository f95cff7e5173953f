use folio_api::{app, config::AppConfig, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up KV_REST_API_URL, ADMIN_API_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN is not set; admin mutations are unprotected");
    }
    tracing::info!(
        "remote store: {}",
        if config.remote_store_configured() { "configured" } else { "not configured, using local fallback" }
    );

    let port = config.port;
    let state = AppState::new(config);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("folio-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}
