#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use folio_api::{app, config::AppConfig, state::AppState};

/// Guard token configured for every test server unless a test opts out.
pub const ADMIN_TOKEN: &str = "test-admin-token";

pub struct TestServer {
    pub base_url: String,
    pub upload_dir: PathBuf,
    // Keeps the temp storage alive for the duration of the test
    _data_dir: TempDir,
}

/// Spawn an isolated in-process server on an ephemeral port, backed by a
/// temp-dir local store, with the mutation guard enabled.
pub async fn spawn() -> Result<TestServer> {
    spawn_with(|_| {}).await
}

pub async fn spawn_with(tweak: impl FnOnce(&mut AppConfig)) -> Result<TestServer> {
    let data_dir = tempfile::tempdir()?;

    let mut config = AppConfig {
        data_file: data_dir.path().join("content.json"),
        upload_dir: data_dir.path().join("uploads"),
        admin_api_token: Some(ADMIN_TOKEN.to_string()),
        ..AppConfig::default()
    };
    tweak(&mut config);
    let upload_dir = config.upload_dir.clone();

    let state = AppState::new(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        upload_dir,
        _data_dir: data_dir,
    })
}
