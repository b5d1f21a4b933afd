//! Workbook import.

use crate::details::parse_details_cell;
use crate::error::{SheetError, SheetResult};
use crate::{DETAILS_COLUMN, NAME_COLUMN};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rolodex_core::{DetailInput, NewContact};
use std::io::Cursor;

/// One data row read from an uploaded workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// 1-based worksheet row number, for log messages.
    pub row: usize,
    pub name: String,
    pub details: Vec<DetailInput>,
}

/// Contacts ready to be written, plus the rows that were left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    pub contacts: Vec<NewContact>,
    /// Row numbers skipped because the name cell was empty.
    pub skipped_rows: Vec<usize>,
}

/// Read the first worksheet of an XLSX/XLS/ODS document.
///
/// The first non-empty row is the header. Columns are matched by header text,
/// ignoring case and surrounding whitespace; `details` is optional.
pub fn read_workbook(bytes: &[u8]) -> SheetResult<Vec<ImportRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::EmptyWorkbook)??;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range
        .rows()
        .enumerate()
        .map(|(index, cells)| (first_row + index + 1, cells))
        .filter(|(_, cells)| cells.iter().any(|cell| !cell_text(cell).is_empty()));

    let Some((_, header)) = rows.next() else {
        return Err(SheetError::MissingColumn(NAME_COLUMN));
    };
    let name_col = find_column(header, NAME_COLUMN).ok_or(SheetError::MissingColumn(NAME_COLUMN))?;
    let details_col = find_column(header, DETAILS_COLUMN);

    let records: Vec<ImportRecord> = rows
        .map(|(row, cells)| {
            let name = cells.get(name_col).map(cell_text).unwrap_or_default();
            let details = details_col
                .and_then(|col| cells.get(col))
                .map(|cell| parse_details_cell(&cell_text(cell)))
                .unwrap_or_default();
            ImportRecord {
                row,
                name: name.trim().to_string(),
                details,
            }
        })
        .collect();

    tracing::debug!(rows = records.len(), "Read import workbook");
    Ok(records)
}

/// Turn records into contacts, skipping rows without a name.
pub fn plan_import(records: Vec<ImportRecord>) -> ImportPlan {
    let mut plan = ImportPlan::default();

    for record in records {
        if record.name.is_empty() {
            tracing::warn!(row = record.row, "Skipping import row without a name");
            plan.skipped_rows.push(record.row);
            continue;
        }
        if record.details.is_empty() {
            tracing::warn!(
                row = record.row,
                name = %record.name,
                "Import row has no contact details"
            );
        }
        plan.contacts.push(NewContact::new(record.name, record.details));
    }

    plan
}

fn find_column(header: &[Data], wanted: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell_text(cell).trim().eq_ignore_ascii_case(wanted))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Phone numbers typed into a sheet arrive as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
