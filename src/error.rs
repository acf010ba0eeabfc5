use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads, merges, or emits tabular data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading, rewinding, or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when CSV content is malformed or cannot be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the `.xlsx` reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the legacy `.xls` reader implementation.
    #[error("Excel read error: {0}")]
    LegacyExcelRead(#[from] calamine::XlsError),

    /// Raised when the merge report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a workbook opens but carries nothing readable.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when every row of a file is blank.
    #[error("file appears to be completely empty")]
    EmptyFile,

    /// Raised when a file name does not carry a `.csv`, `.xlsx`, or `.xls`
    /// extension.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Raised when no file of a batch produced a table.
    #[error("no valid data found to merge")]
    NoValidData,

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
