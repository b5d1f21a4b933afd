//! Spreadsheet error types.

use thiserror::Error;

/// Errors raised while reading or writing workbooks.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read workbook: {0}")]
    Read(#[from] calamine::Error),

    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("workbook contains no worksheets")]
    EmptyWorkbook,

    #[error("worksheet is missing the '{0}' column")]
    MissingColumn(&'static str),
}

impl SheetError {
    /// Whether the error was caused by the uploaded document rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SheetError::Write(_))
    }
}

/// Result type alias for spreadsheet operations.
pub type SheetResult<T> = std::result::Result<T, SheetError>;
