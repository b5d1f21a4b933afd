//! Server test utilities.

use rolodex_core::config::{AppConfig, StoreConfig};
use rolodex_server::{AppState, create_router};
use rolodex_store::{ContactStore, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub sqlite: Option<Arc<SqliteStore>>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server backed by a temporary SQLite database.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("rolodex.db");
        let sqlite = Arc::new(
            SqliteStore::new(&db_path)
                .await
                .expect("Failed to create contact store"),
        );

        let mut config = AppConfig::for_testing();
        config.store = StoreConfig::Sqlite { path: db_path };
        modifier(&mut config);

        let mut server = Self::with_store(config, sqlite.clone(), temp_dir);
        server.sqlite = Some(sqlite);
        server
    }

    /// Create a test server around an existing store.
    pub fn with_store(config: AppConfig, store: Arc<dyn ContactStore>, temp_dir: TempDir) -> Self {
        rolodex_server::metrics::register_metrics();

        let state = AppState::new(config, store);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            sqlite: None,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying store.
    pub fn store(&self) -> Arc<dyn ContactStore> {
        self.state.store.clone()
    }

    /// Directory that lives as long as the server.
    pub fn temp_path(&self) -> &std::path::Path {
        self._temp_dir.path()
    }
}
