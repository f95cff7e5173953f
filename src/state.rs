use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::KeyValueStore;

/// Shared application state: configuration plus the one store instance,
/// constructed at startup and injected into every handler. Nothing here is
/// a module-level static, so tests can build isolated instances with fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<KeyValueStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(KeyValueStore::from_config(&config));
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
