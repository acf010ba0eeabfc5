use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::merge::{FileError, FileSummary, MergeOutcome};

/// Machine-readable summary of a merge run.
#[derive(Debug, Serialize)]
pub struct MergeReport<'a> {
    /// Path of the written CSV, if one was written.
    pub output: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub files: &'a [FileSummary],
    pub errors: &'a [FileError],
}

impl<'a> MergeReport<'a> {
    pub fn new(outcome: &'a MergeOutcome, output: Option<&Path>) -> Self {
        let (rows, columns) = outcome
            .table
            .as_ref()
            .map(|table| (table.row_count(), table.column_count()))
            .unwrap_or((0, 0));
        Self {
            output: output.map(|path| path.display().to_string()),
            rows,
            columns,
            files: &outcome.files,
            errors: &outcome.errors,
        }
    }
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &MergeReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
