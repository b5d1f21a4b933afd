//! Contact store abstraction and implementations for Rolodex.
//!
//! This crate provides the persistence side of the address book:
//! - The `contacts` / `contact_details` schema
//! - Aggregated reads of contacts with their details
//! - Transactional creation, favorite updates and cascading deletes
//! - Bulk import of parsed spreadsheet rows

pub mod error;
pub mod models;
pub mod postgres;
pub mod repos;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use postgres::PostgresStore;
pub use repos::{ContactRepo, ImportRepo, ImportSummary};
pub use store::{ContactStore, SqliteStore};

use rolodex_core::config::StoreConfig;
use std::sync::Arc;

/// Create a contact store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn ContactStore>> {
    config.validate().map_err(StoreError::Config)?;

    match config {
        StoreConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn ContactStore>)
        }
        StoreConfig::Postgres {
            url,
            host,
            port,
            username,
            password,
            database,
            ssl_mode,
            max_connections,
            statement_timeout_ms,
        } => {
            let store = if let Some(url) = url {
                tracing::info!("Connecting to PostgreSQL using connection URL");
                PostgresStore::from_url(url, *max_connections, *statement_timeout_ms).await?
            } else if let (Some(host), Some(database)) = (host.as_ref(), database.as_ref()) {
                PostgresStore::from_params(
                    host,
                    port.unwrap_or(5432),
                    username.as_deref(),
                    password.as_deref(),
                    database,
                    *ssl_mode,
                    *max_connections,
                    *statement_timeout_ms,
                )
                .await?
            } else {
                return Err(StoreError::Config(
                    "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                ));
            };
            Ok(Arc::new(store) as Arc<dyn ContactStore>)
        }
    }
}
