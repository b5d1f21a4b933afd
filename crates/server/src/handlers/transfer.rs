//! Spreadsheet import and export handlers.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use rolodex_core::EXPORT_FILE_NAME;
use rolodex_sheet::{export_workbook, plan_import, read_workbook};
use serde::Serialize;

/// Multipart field carrying the uploaded workbook.
pub const IMPORT_FIELD: &str = "file";

/// MIME type of exported workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Response for a completed import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    /// Contacts created.
    pub imported: usize,
    /// Rows skipped because they had no name.
    pub skipped: usize,
    /// Created contacts that had no parseable details.
    pub without_details: usize,
}

/// GET /api/export - Download all contacts as an XLSX workbook.
pub async fn export_contacts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let contacts = state.store.list_contacts().await?;
    let count = contacts.len();

    let workbook = tokio::task::spawn_blocking(move || export_workbook(&contacts))
        .await
        .map_err(|e| ApiError::Internal(format!("export task failed: {e}")))??;
    metrics::EXPORTS.inc();

    tracing::info!(
        contacts = count,
        bytes = workbook.len(),
        "Exported contacts"
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        workbook,
    ))
}

/// POST /api/import - Create contacts from an uploaded workbook.
///
/// Expects a multipart form with the workbook in the `file` field. Rows
/// without a name are skipped; rows without details are still imported.
/// The whole document is written in one transaction.
pub async fn import_contacts(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ImportResponse>> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMPORT_FIELD) {
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;
            upload = Some((file_name, data));
            break;
        }
    }

    let Some((file_name, data)) = upload else {
        return Err(ApiError::BadRequest(format!(
            "no file uploaded; expected multipart field '{IMPORT_FIELD}'"
        )));
    };
    if data.is_empty() {
        return Err(ApiError::BadRequest("uploaded file is empty".to_string()));
    }

    tracing::info!(
        file_name = file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = data.len(),
        "Importing contacts workbook"
    );

    let plan = tokio::task::spawn_blocking(move || read_workbook(&data).map(plan_import))
        .await
        .map_err(|e| ApiError::Internal(format!("import task failed: {e}")))??;

    let summary = state.store.import_contacts(&plan.contacts).await?;
    metrics::record_import_rows("imported", summary.contacts_created);
    metrics::record_import_rows("skipped", plan.skipped_rows.len());

    tracing::info!(
        imported = summary.contacts_created,
        details = summary.details_created,
        skipped = plan.skipped_rows.len(),
        without_details = summary.without_details,
        "Import complete"
    );

    Ok(Json(ImportResponse {
        success: true,
        imported: summary.contacts_created,
        skipped: plan.skipped_rows.len(),
        without_details: summary.without_details,
    }))
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(format!("invalid multipart body: {}", e.body_text()))
    }
}
