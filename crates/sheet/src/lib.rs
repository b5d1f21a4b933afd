//! Spreadsheet transcoding for the rolodex address book.
//!
//! Exports contacts to a single-sheet XLSX workbook and reads workbooks back
//! into import plans. The sheet layout is two columns, `name` and `details`,
//! where `details` holds `type: value` pairs joined by `, `.

pub mod details;
pub mod error;
pub mod export;
pub mod import;

pub use details::{format_details, parse_details_cell};
pub use error::{SheetError, SheetResult};
pub use export::export_workbook;
pub use import::{ImportPlan, ImportRecord, plan_import, read_workbook};

/// Header of the name column.
pub const NAME_COLUMN: &str = "name";

/// Header of the details column.
pub const DETAILS_COLUMN: &str = "details";
