//! Encoding of contact details inside a single sheet cell.

use rolodex_core::{ContactDetail, DetailInput};

/// Render details as `type: value` pairs joined by `, `.
pub fn format_details(details: &[ContactDetail]) -> String {
    details
        .iter()
        .map(|d| format!("{}: {}", d.contact_type, d.contact_value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a details cell into trimmed, complete pairs.
///
/// Accepts either the exported text form or a JSON array of
/// `{"contact_type", "contact_value"}` objects. Incomplete pairs are dropped.
pub fn parse_details_cell(cell: &str) -> Vec<DetailInput> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Vec::new();
    }

    if cell.starts_with('[')
        && let Ok(structured) = serde_json::from_str::<Vec<DetailInput>>(cell)
    {
        return structured
            .iter()
            .map(DetailInput::trimmed)
            .filter(DetailInput::is_complete)
            .collect();
    }

    cell.split(',')
        .filter_map(|segment| {
            let (contact_type, contact_value) = segment.split_once(':')?;
            let detail = DetailInput::new(contact_type.trim(), contact_value.trim());
            detail.is_complete().then_some(detail)
        })
        .collect()
}
