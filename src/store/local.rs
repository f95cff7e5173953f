use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::RwLock;

use super::StoreError;

/// File-backed fallback store: one JSON file holding a string-keyed map,
/// loaded lazily and cached in memory. Every write rewrites the whole file.
///
/// Read-modify-write on the map is not atomic across processes; the
/// realistic deployment is a single server process with one admin user.
pub struct LocalStore {
    path: PathBuf,
    cache: RwLock<Option<HashMap<String, Value>>>,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path, cache: RwLock::new(None) }
    }

    pub async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        {
            let cache = self.cache.read().await;
            if let Some(map) = cache.as_ref() {
                return Ok(map.get(key).cloned());
            }
        }

        let map = self.load().await?;
        let value = map.get(key).cloned();
        *self.cache.write().await = Some(map);
        Ok(value)
    }

    pub async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        let map = match cache.take() {
            Some(map) => map,
            None => self.load().await?,
        };

        let mut map = map;
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let serialized = serde_json::to_string_pretty(&map)?;
        tokio::fs::write(&self.path, serialized).await?;

        *cache = Some(map);
        Ok(())
    }

    async fn load(&self) -> Result<HashMap<String, Value>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("content.json"));
        assert_eq!(store.get("profile_data").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("content.json"));

        let value = json!([{ "id": 1, "name": "Go" }]);
        store.set("skills_data", value.clone()).await.unwrap();
        assert_eq!(store.get("skills_data").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn writes_survive_a_fresh_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/content.json");

        let store = LocalStore::new(path.clone());
        store.set("settings_data", json!({ "theme": "dark" })).await.unwrap();

        let reopened = LocalStore::new(path);
        assert_eq!(
            reopened.get("settings_data").await.unwrap(),
            Some(json!({ "theme": "dark" }))
        );
    }

    #[tokio::test]
    async fn second_write_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("content.json"));

        store.set("a", json!(1)).await.unwrap();
        store.set("b", json!(2)).await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some(json!(1)));
        assert_eq!(store.get("b").await.unwrap(), Some(json!(2)));
    }
}
