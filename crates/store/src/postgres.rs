//! PostgreSQL-based contact store implementation.

use crate::error::{StoreError, StoreResult};
use crate::models::{ContactDetailRow, ContactRow, timestamp_now};
use crate::repos::{ContactRepo, ImportRepo, ImportSummary};
use crate::store::ContactStore;
use async_trait::async_trait;
use rolodex_core::config::PgSslMode;
use rolodex_core::{Contact, ContactDetail, NewContact, ValidationPolicy, attach_details};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode as SqlxPgSslMode};
use sqlx::{Pool, Postgres, Transaction};
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

fn postgres_schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .filter_map(|statement| {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                return None;
            }
            let has_sql = trimmed.lines().any(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("--")
            });
            has_sql.then_some(trimmed)
        })
        .collect()
}

/// PostgreSQL-based contact store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection URL.
    pub async fn from_url(
        url: &str,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> StoreResult<Self> {
        let opts = PgConnectOptions::from_str(url)?;
        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    /// Create a new PostgreSQL store from individual connection parameters.
    ///
    /// This allows credentials to be passed separately, e.g. the password
    /// through an environment variable.
    #[allow(clippy::too_many_arguments)]
    pub async fn from_params(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        database: &str,
        ssl_mode: Option<PgSslMode>,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> StoreResult<Self> {
        let mut opts = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database);

        if let Some(user) = username {
            opts = opts.username(user);
        }

        if let Some(pass) = password {
            opts = opts.password(pass);
        }

        if let Some(mode) = ssl_mode {
            let sqlx_mode = match mode {
                PgSslMode::Disable => SqlxPgSslMode::Disable,
                PgSslMode::Prefer => SqlxPgSslMode::Prefer,
                PgSslMode::Require => SqlxPgSslMode::Require,
            };
            opts = opts.ssl_mode(sqlx_mode);
        }

        // Log connection info without password
        tracing::info!(
            host = host,
            port = port,
            database = database,
            username = username.unwrap_or("<none>"),
            ssl_mode = ?ssl_mode,
            "Connecting to PostgreSQL with individual parameters"
        );

        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    async fn connect(
        mut opts: PgConnectOptions,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> StoreResult<Self> {
        if let Some(timeout_ms) = statement_timeout_ms {
            opts = opts.options([("statement_timeout", format!("{}ms", timeout_ms))]);
            tracing::info!("PostgreSQL statement_timeout set to {}ms", timeout_ms);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl ContactStore for PostgresStore {
    async fn migrate(&self) -> StoreResult<()> {
        // PostgreSQL doesn't allow multiple statements in a single prepared statement,
        // so we split the schema and execute each statement separately.
        for statement in postgres_schema_statements(POSTGRES_SCHEMA) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
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

/// Insert one contact and its details inside an open transaction.
async fn insert_contact(
    tx: &mut Transaction<'_, Postgres>,
    contact: &NewContact,
    created_at: OffsetDateTime,
) -> StoreResult<Contact> {
    let contact_id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO contacts (id, name, is_favorite, created_at) VALUES ($1, $2, FALSE, $3)",
    )
    .bind(contact_id)
    .bind(&contact.name)
    .bind(created_at)
    .execute(&mut **tx)
    .await?;

    let mut details = Vec::with_capacity(contact.details.len());
    for (position, detail) in contact.details.iter().enumerate() {
        let detail_id = Uuid::new_v4();
        let position = i32::try_from(position)
            .map_err(|_| StoreError::Validation("too many contact details".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO contact_details (id, contact_id, contact_type, contact_value, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
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
impl ContactRepo for PostgresStore {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, is_favorite, created_at FROM contacts ORDER BY created_at, name",
        )
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let details = sqlx::query_as::<_, ContactDetailRow>(
            r#"
            SELECT id, contact_id, contact_type, contact_value, position
            FROM contact_details
            WHERE contact_id = ANY($1)
            ORDER BY contact_id, position
            "#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        Ok(attach_details(
            rows.into_iter().map(Contact::from).collect(),
            details.into_iter().map(ContactDetail::from).collect(),
        ))
    }

    async fn get_contact(&self, contact_id: Uuid) -> StoreResult<Option<Contact>> {
        let Some(row) = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, is_favorite, created_at FROM contacts WHERE id = $1",
        )
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, ContactDetailRow>(
            r#"
            SELECT id, contact_id, contact_type, contact_value, position
            FROM contact_details
            WHERE contact_id = $1
            ORDER BY position
            "#,
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
        let result = sqlx::query("UPDATE contacts SET is_favorite = $1 WHERE id = $2")
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
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(contact_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ImportRepo for PostgresStore {
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
