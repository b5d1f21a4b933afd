//! Workbook export.

use crate::details::format_details;
use crate::error::SheetResult;
use crate::{DETAILS_COLUMN, NAME_COLUMN};
use rolodex_core::{Contact, EXPORT_SHEET_NAME};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Write all contacts to an XLSX workbook and return its bytes.
///
/// The workbook has one worksheet with a bold `name`/`details` header row
/// followed by one row per contact, in the order given.
pub fn export_workbook(contacts: &[Contact]) -> SheetResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;
    worksheet.write_string_with_format(0, 0, NAME_COLUMN, &header)?;
    worksheet.write_string_with_format(0, 1, DETAILS_COLUMN, &header)?;
    worksheet.set_column_width(0, 28)?;
    worksheet.set_column_width(1, 64)?;

    for (index, contact) in contacts.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string(row, 0, &contact.name)?;
        worksheet.write_string(row, 1, format_details(&contact.details))?;
    }

    let buffer = workbook.save_to_buffer()?;
    tracing::debug!(
        contacts = contacts.len(),
        bytes = buffer.len(),
        "Exported contacts workbook"
    );
    Ok(buffer)
}
