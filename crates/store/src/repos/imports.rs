//! Bulk import repository trait.

use crate::error::StoreResult;
use async_trait::async_trait;
use rolodex_core::NewContact;

/// Counts reported after an import completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub contacts_created: usize,
    pub details_created: usize,
    /// Contacts that were created without any details.
    pub without_details: usize,
}

/// Repository for importing many contacts at once.
#[async_trait]
pub trait ImportRepo: Send + Sync {
    /// Insert all contacts and their details in a single transaction.
    ///
    /// Uses the permissive validation policy: contacts may have no details.
    /// A failure on any row rolls back the whole import.
    async fn import_contacts(&self, contacts: &[NewContact]) -> StoreResult<ImportSummary>;
}
