//! Contact repository trait.

use crate::error::StoreResult;
use async_trait::async_trait;
use rolodex_core::{Contact, NewContact};
use uuid::Uuid;

/// Repository for contacts and their details.
#[async_trait]
pub trait ContactRepo: Send + Sync {
    /// List all contacts with their details attached.
    ///
    /// Returns an empty list without querying details when there are no contacts.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// Get a single contact with its details.
    async fn get_contact(&self, contact_id: Uuid) -> StoreResult<Option<Contact>>;

    /// Create a contact and all of its details in one transaction.
    ///
    /// The input must satisfy the strict validation policy: a name and at
    /// least one complete detail. Either every row is committed or none is.
    async fn create_contact(&self, contact: &NewContact) -> StoreResult<Contact>;

    /// Set the favorite flag of a contact.
    ///
    /// Returns `StoreError::NotFound` if no contact has this id.
    async fn set_favorite(&self, contact_id: Uuid, is_favorite: bool) -> StoreResult<()>;

    /// Delete a contact; its details are removed by the foreign key cascade.
    ///
    /// Returns whether a contact was deleted. Deleting an unknown id is not an error.
    async fn delete_contact(&self, contact_id: Uuid) -> StoreResult<bool>;
}
