// Key-value persistence with remote-first reads/writes and a local
// file-backed fallback, so the site keeps serving when the remote store
// is unreachable or simply not configured.
mod local;
mod remote;

use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::AppConfig;
use local::LocalStore;
use remote::RemoteStore;

/// Storage key for the side map of per-key last-updated timestamps.
pub const META_KEY: &str = "content_meta";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("remote store error: {0}")]
    Remote(String),
    #[error("local store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid stored json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logical string-keyed JSON store.
///
/// Remote failures never propagate out of `get`: they are logged and the
/// read falls through to the local store, which itself degrades to `None`.
/// `set` errors only when the local fallback write also fails.
pub struct KeyValueStore {
    remote: Option<RemoteStore>,
    local: LocalStore,
}

impl KeyValueStore {
    pub fn from_config(config: &AppConfig) -> Self {
        let remote = match (&config.kv_rest_url, &config.kv_rest_token) {
            (Some(url), Some(token)) => {
                match RemoteStore::new(url.clone(), token.clone(), config.kv_timeout_secs) {
                    Ok(remote) => Some(remote),
                    Err(e) => {
                        tracing::warn!("remote store client unavailable, using local only: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        Self {
            remote,
            local: LocalStore::new(config.data_file.clone()),
        }
    }

    /// Whether remote credentials are present, for diagnostics.
    pub fn is_configured(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        if let Some(remote) = &self.remote {
            match remote.get(key).await {
                Ok(value) => return value,
                Err(e) => {
                    tracing::warn!("remote get '{}' failed, falling back to local: {}", key, e);
                }
            }
        }

        match self.local.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("local get '{}' failed: {}", key, e);
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.set(key, &value).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!("remote set '{}' failed, falling back to local: {}", key, e);
                }
            }
        }

        self.local.set(key, value).await
    }

    /// Record the last-updated instant for a tracked key in the shared
    /// metadata map. Failures are logged, never surfaced: timestamps are
    /// advisory and must not fail the write that triggered them.
    pub async fn record_update(&self, key: &str) {
        let mut meta = match self.get(META_KEY).await {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        meta.insert(key.to_string(), Value::String(Utc::now().to_rfc3339()));

        if let Err(e) = self.set(META_KEY, Value::Object(meta)).await {
            tracing::warn!("failed to record update timestamp for '{}': {}", key, e);
        }
    }
}
