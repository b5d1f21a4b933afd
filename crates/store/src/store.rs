//! Contact store trait and the SQLite implementation.

use crate::error::StoreResult;
use crate::repos::{ContactRepo, ImportRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined contact store trait.
#[async_trait]
pub trait ContactStore: ContactRepo + ImportRepo + Send + Sync {
    /// Create the schema if it does not exist yet.
    async fn migrate(&self) -> StoreResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> StoreResult<()>;

    /// Close the connection pool, waiting for in-flight queries to finish.
    async fn close(&self);
}

/// SQLite-based contact store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if missing) the SQLite database at `path` and apply the schema.
    pub async fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            // Required for ON DELETE CASCADE on contact_details.
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // "database is locked" failures under concurrent axum requests.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(path = %path.display(), "SQLite contact store opened");

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl ContactStore for SqliteStore {
    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

// Implement the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::error::StoreError;
    use crate::models::{ContactDetailRow, ContactRow, sqlite_timestamp, timestamp_now};
    use crate::repos::ImportSummary;
    use rolodex_core::{Contact, ContactDetail, NewContact, ValidationPolicy, attach_details};
    use sqlx::Transaction;
    use time::OffsetDateTime;
    use uuid::Uuid;

    /// Insert one contact and its details inside an open transaction.
    ///
    /// Inserts run one after another and the first failure is returned; the
    /// caller drops the transaction, which rolls back everything before it.
    async fn insert_contact(
        tx: &mut Transaction<'_, Sqlite>,
        contact: &NewContact,
        created_at: OffsetDateTime,
    ) -> StoreResult<Contact> {
        let contact_id = Uuid::new_v4();
        let stamp = sqlite_timestamp(created_at)
            .map_err(|e| StoreError::Validation(format!("invalid timestamp: {}", e)))?;

        sqlx::query("INSERT INTO contacts (id, name, is_favorite, created_at) VALUES (?, ?, 0, ?)")
            .bind(contact_id)
            .bind(&contact.name)
            .bind(stamp)
            .execute(&mut **tx)
            .await?;

        let mut details = Vec::with_capacity(contact.details.len());
        for (position, detail) in contact.details.iter().enumerate() {
            let detail_id = Uuid::new_v4();
            let position = i32::try_from(position).map_err(|_| {
                StoreError::Validation("too many contact details".to_string())
            })?;

            sqlx::query(
                "INSERT INTO contact_details (id, contact_id, contact_type, contact_value, position) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(detail_id)
            .bind(contact_id)
            .bind(&detail.contact_type)
            .bind(&detail.contact_value)
            .bind(position)
            .execute(&mut **tx)
            .await?;

            details.push(ContactDetail {
                id: detail_id,
                contact_id,
                contact_type: detail.contact_type.clone(),
                contact_value: detail.contact_value.clone(),
                position,
            });
        }

        Ok(Contact {
            id: contact_id,
            name: contact.name.clone(),
            is_favorite: false,
            created_at,
            details,
        })
    }

    #[async_trait]
    impl ContactRepo for SqliteStore {
        async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
            let rows = sqlx::query_as::<_, ContactRow>(
                "SELECT id, name, is_favorite, created_at FROM contacts ORDER BY created_at, name",
            )
            .fetch_all(&self.pool)
            .await?;

            if rows.is_empty() {
                return Ok(Vec::new());
            }

            // A subquery keeps the statement's bind count fixed whatever the table size.
            let details = sqlx::query_as::<_, ContactDetailRow>(
                r#"
                SELECT id, contact_id, contact_type, contact_value, position
                FROM contact_details
                WHERE contact_id IN (SELECT id FROM contacts)
                ORDER BY contact_id, position
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            Ok(attach_details(
                rows.into_iter().map(Contact::from).collect(),
                details.into_iter().map(ContactDetail::from).collect(),
            ))
        }

        async fn get_contact(&self, contact_id: Uuid) -> StoreResult<Option<Contact>> {
            let Some(row) = sqlx::query_as::<_, ContactRow>(
                "SELECT id, name, is_favorite, created_at FROM contacts WHERE id = ?",
            )
            .bind(contact_id)
            .fetch_optional(&self.pool)
            .await?
            else {
                return Ok(None);
            };

            let details = sqlx::query_as::<_, ContactDetailRow>(
                "SELECT id, contact_id, contact_type, contact_value, position FROM contact_details WHERE contact_id = ? ORDER BY position",
            )
            .bind(contact_id)
            .fetch_all(&self.pool)
            .await?;

            let mut contact = Contact::from(row);
            contact.details = details.into_iter().map(ContactDetail::from).collect();
            Ok(Some(contact))
        }

        async fn create_contact(&self, contact: &NewContact) -> StoreResult<Contact> {
            let contact = contact.normalized();
            contact.validate(ValidationPolicy::Strict)?;

            let mut tx = self.pool.begin().await?;
            let created = insert_contact(&mut tx, &contact, timestamp_now()).await?;
            tx.commit().await?;

            tracing::debug!(
                contact_id = %created.id,
                details = created.details.len(),
                "Contact created"
            );

            Ok(created)
        }

        async fn set_favorite(&self, contact_id: Uuid, is_favorite: bool) -> StoreResult<()> {
            let result = sqlx::query("UPDATE contacts SET is_favorite = ? WHERE id = ?")
                .bind(is_favorite)
                .bind(contact_id)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!(
                    "contact {} not found",
                    contact_id
                )));
            }
            Ok(())
        }

        async fn delete_contact(&self, contact_id: Uuid) -> StoreResult<bool> {
            let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
                .bind(contact_id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        }
    }

    #[async_trait]
    impl ImportRepo for SqliteStore {
        async fn import_contacts(&self, contacts: &[NewContact]) -> StoreResult<ImportSummary> {
            let normalized: Vec<NewContact> = contacts.iter().map(NewContact::normalized).collect();
            for contact in &normalized {
                contact.validate(ValidationPolicy::Permissive)?;
            }

            let base = timestamp_now();
            let mut summary = ImportSummary::default();
            let mut tx = self.pool.begin().await?;

            for (offset, contact) in normalized.iter().enumerate() {
                // Offset timestamps so listings keep the sheet's row order.
                let created_at = base + time::Duration::microseconds(offset as i64);
                let created = insert_contact(&mut tx, contact, created_at).await?;

                summary.contacts_created += 1;
                summary.details_created += created.details.len();
                if created.details.is_empty() {
                    summary.without_details += 1;
                }
            }

            tx.commit().await?;
            Ok(summary)
        }
    }
}

/// SQL schema for SQLite.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    is_favorite INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_contacts_created ON contacts(created_at, name);

CREATE TABLE IF NOT EXISTS contact_details (
    id BLOB PRIMARY KEY,
    contact_id BLOB NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
    contact_type TEXT NOT NULL,
    contact_value TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_contact_details_contact ON contact_details(contact_id, position);
"#;
