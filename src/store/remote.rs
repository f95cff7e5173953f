use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::StoreError;

/// Client for an Upstash-style Redis REST endpoint:
/// `GET {base}/get/{key}` and `POST {base}/set/{key}` with bearer auth,
/// values transported as JSON-encoded strings in a `{"result": ...}` envelope.
pub struct RemoteStore {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct RestResult {
    result: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: String, token: String, timeout_secs: u64) -> Result<Self, StoreError> {
        // Deadline on every call; a hung remote must not hang the request.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let url = format!("{}/get/{}", self.base_url, key);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Remote(format!(
                "GET {} returned {}",
                key,
                response.status()
            )));
        }

        let body: RestResult = response
            .json()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        match body.result {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let url = format!("{}/set/{}", self.base_url, key);
        let body = serde_json::to_string(value)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Remote(format!(
                "SET {} returned {}",
                key,
                response.status()
            )));
        }

        Ok(())
    }
}
