//! Database models mapping to the contact schema.

use rolodex_core::{Contact, ContactDetail};
use sqlx::FromRow;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use uuid::Uuid;

/// Row of the `contacts` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub name: String,
    pub is_favorite: bool,
    pub created_at: OffsetDateTime,
}

/// Row of the `contact_details` table.
#[derive(Debug, Clone, FromRow)]
pub struct ContactDetailRow {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub contact_type: String,
    pub contact_value: String,
    pub position: i32,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            name: row.name,
            is_favorite: row.is_favorite,
            created_at: row.created_at,
            details: Vec::new(),
        }
    }
}

impl From<ContactDetailRow> for ContactDetail {
    fn from(row: ContactDetailRow) -> Self {
        ContactDetail {
            id: row.id,
            contact_id: row.contact_id,
            contact_type: row.contact_type,
            contact_value: row.contact_value,
            position: row.position,
        }
    }
}

/// Fixed-width RFC 3339 layout used for SQLite `created_at` text.
///
/// Every value carries six fractional digits so that text ordering matches
/// chronological ordering.
const SQLITE_TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");

/// Format a UTC timestamp for storage in SQLite.
pub(crate) fn sqlite_timestamp(ts: OffsetDateTime) -> Result<String, time::error::Format> {
    ts.to_offset(time::UtcOffset::UTC).format(SQLITE_TIMESTAMP)
}

/// Current UTC time truncated to microseconds.
///
/// PostgreSQL stores microsecond precision, so values returned from inserts
/// compare equal to values read back later on both backends.
pub(crate) fn timestamp_now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_has_microsecond_precision() {
        let now = timestamp_now();
        assert_eq!(now.nanosecond() % 1_000, 0);
    }

    #[test]
    fn contact_row_converts_without_details() {
        let row = ContactRow {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            is_favorite: true,
            created_at: timestamp_now(),
        };
        let contact = Contact::from(row.clone());
        assert_eq!(contact.id, row.id);
        assert!(contact.is_favorite);
        assert!(contact.details.is_empty());
    }

    #[test]
    fn sqlite_timestamp_is_fixed_width_and_sortable() {
        let whole = time::macros::datetime!(2026-01-02 03:04:05 UTC);
        let later = whole + time::Duration::microseconds(1);
        let a = sqlite_timestamp(whole).unwrap();
        let b = sqlite_timestamp(later).unwrap();
        assert_eq!(a, "2026-01-02T03:04:05.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }
}
