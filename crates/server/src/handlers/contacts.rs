//! Contact handlers: list, get, create, favorite, delete.

use super::common::{SuccessResponse, parse_contact_id, parse_json_body};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rolodex_core::{Contact, NewContact};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for a newly created contact.
#[derive(Debug, Serialize)]
pub struct CreateContactResponse {
    pub success: bool,
    pub id: Uuid,
}

/// Body of a favorite update.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}

/// GET /api/contacts - List all contacts with their details.
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Vec<Contact>>> {
    let contacts = state.store.list_contacts().await?;
    tracing::debug!(contacts = contacts.len(), "Listed contacts");
    Ok(Json(contacts))
}

/// GET /api/contacts/{contact_id} - Fetch one contact.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> ApiResult<Json<Contact>> {
    let contact_id = parse_contact_id(&contact_id)?;

    let contact = state
        .store
        .get_contact(contact_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("contact {contact_id} not found")))?;

    Ok(Json(contact))
}

/// POST /api/contacts - Create a contact with at least one detail.
pub async fn create_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreateContactResponse>)> {
    let request: NewContact = parse_json_body(&body)?;

    let contact = state.store.create_contact(&request).await?;
    metrics::CONTACTS_CREATED.inc();

    tracing::info!(
        contact_id = %contact.id,
        details = contact.details.len(),
        "Contact created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateContactResponse {
            success: true,
            id: contact.id,
        }),
    ))
}

/// PUT /api/contacts/{contact_id}/favorite - Set or clear the favorite flag.
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<SuccessResponse>> {
    let contact_id = parse_contact_id(&contact_id)?;
    let request: FavoriteRequest = parse_json_body(&body)?;

    state
        .store
        .set_favorite(contact_id, request.is_favorite)
        .await?;
    metrics::FAVORITE_UPDATES.inc();

    tracing::info!(
        contact_id = %contact_id,
        is_favorite = request.is_favorite,
        "Favorite flag updated"
    );

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/contacts/{contact_id} - Delete a contact and its details.
///
/// Deleting an id that does not exist still succeeds.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let contact_id = parse_contact_id(&contact_id)?;

    if state.store.delete_contact(contact_id).await? {
        metrics::CONTACTS_DELETED.inc();
        tracing::info!(contact_id = %contact_id, "Contact deleted");
    } else {
        tracing::debug!(contact_id = %contact_id, "Delete of unknown contact ignored");
    }

    Ok(Json(SuccessResponse::ok()))
}
