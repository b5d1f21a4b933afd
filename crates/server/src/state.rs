//! Application state shared across handlers.

use rolodex_core::config::AppConfig;
use rolodex_store::ContactStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Contact store.
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, store: Arc<dyn ContactStore>) -> Self {
        if let Some(dir) = &config.server.static_dir
            && !dir.is_dir()
        {
            tracing::warn!(
                static_dir = %dir.display(),
                "Configured static directory does not exist; UI requests will return 404"
            );
        }

        Self {
            config: Arc::new(config),
            store,
        }
    }
}
