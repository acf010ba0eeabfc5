use std::collections::HashMap;
use std::io::{Read, Seek};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::header::locate_header_row;
use crate::io::{InputFile, PathInput, SourceFormat, csv_read, dedupe_names, excel_read};
use crate::model::{CellValue, MergedTable, Table};

/// A failure attributed to a single input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

impl FileError {
    pub fn new(file: impl Into<String>, error: &ToolError) -> Self {
        Self {
            file: file.into(),
            message: error.to_string(),
        }
    }
}

/// Shape of a table that was read successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub rows: usize,
    pub columns: usize,
}

/// Emitted after each file of a batch has been processed.
#[derive(Debug, Clone, Copy)]
pub struct MergeProgress<'a> {
    pub completed: usize,
    pub total: usize,
    pub file: &'a str,
    pub succeeded: bool,
}

impl MergeProgress<'_> {
    /// Fraction of the batch processed so far, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Result of merging a batch of files.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Merged table, or `None` when no file produced a table.
    pub table: Option<MergedTable>,
    /// Per-file failures, in processing order.
    pub errors: Vec<FileError>,
    /// Per-file summaries of the tables that were merged, in processing order.
    pub files: Vec<FileSummary>,
}

impl MergeOutcome {
    /// Returns the merged table, or [`ToolError::NoValidData`] when every file
    /// failed or the batch was empty.
    pub fn require_table(&self) -> Result<&MergedTable> {
        self.table.as_ref().ok_or(ToolError::NoValidData)
    }
}

/// A member of a merge batch.
pub trait Upload {
    /// Name errors and summaries are attributed to.
    fn name(&self) -> &str;

    /// Reads the upload into a cleaned [`Table`].
    fn read_table(&mut self) -> Result<Table>;
}

impl<R: Read + Seek> Upload for InputFile<R> {
    fn name(&self) -> &str {
        InputFile::name(self)
    }

    fn read_table(&mut self) -> Result<Table> {
        read_file_auto_header(self)
    }
}

impl Upload for PathInput {
    fn name(&self) -> &str {
        PathInput::name(self)
    }

    fn read_table(&mut self) -> Result<Table> {
        let mut file = self.open()?;
        read_file_auto_header(&mut file)
    }
}

/// Trims and lower-cases a column name.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Reads a file whose header may be preceded by blank rows.
///
/// The content is first read with every cell as a string to find the header
/// row, then rewound and read again using that row as the header. Rows whose
/// cells are all missing are dropped and column names are normalised.
#[instrument(level = "info", skip_all, fields(file = %file.name()))]
pub fn read_file_auto_header<R: Read + Seek>(file: &mut InputFile<R>) -> Result<Table> {
    let format = file.format()?;

    file.rewind()?;
    let raw = match format {
        SourceFormat::Csv => csv_read::read_raw(file.reader_mut())?,
        SourceFormat::Xlsx | SourceFormat::Xls => excel_read::read_raw(file.reader_mut(), format)?,
    };
    let header_index = locate_header_row(&raw)?;
    debug!(%format, header_index, raw_rows = raw.rows.len(), "raw pass complete");

    file.rewind()?;
    let mut table = match format {
        SourceFormat::Csv => csv_read::read_with_header(file.reader_mut(), header_index)?,
        SourceFormat::Xlsx | SourceFormat::Xls => {
            excel_read::read_with_header(file.reader_mut(), format, header_index)?
        }
    };

    let before = table.rows.len();
    table
        .rows
        .retain(|row| !row.iter().all(CellValue::is_missing));
    table.columns = dedupe_names(
        table
            .columns
            .iter()
            .map(|name| normalize_column_name(name))
            .collect(),
    );

    info!(
        rows = table.rows.len(),
        dropped = before - table.rows.len(),
        columns = table.columns.len(),
        "read table"
    );
    Ok(table)
}

/// Merges every file of the batch, in order. See
/// [`merge_files_with_progress`].
pub fn merge_files<U: Upload>(files: &mut [U]) -> MergeOutcome {
    merge_files_with_progress(files, |_| {})
}

/// Reads each file independently and concatenates the resulting tables.
///
/// A file that fails to read is recorded in [`MergeOutcome::errors`] and the
/// batch carries on with the remaining files. `on_progress` is invoked once
/// per file, after it has been processed.
#[instrument(level = "info", skip_all, fields(file_count = files.len()))]
pub fn merge_files_with_progress<U, F>(files: &mut [U], mut on_progress: F) -> MergeOutcome
where
    U: Upload,
    F: FnMut(MergeProgress<'_>),
{
    let total = files.len();
    let mut tables = Vec::with_capacity(total);
    let mut outcome = MergeOutcome::default();

    for (idx, file) in files.iter_mut().enumerate() {
        let succeeded = match file.read_table() {
            Ok(table) => {
                outcome.files.push(FileSummary {
                    file: file.name().to_string(),
                    rows: table.row_count(),
                    columns: table.columns.len(),
                });
                tables.push(table);
                true
            }
            Err(error) => {
                warn!(file = file.name(), %error, "failed to process file");
                outcome.errors.push(FileError::new(file.name(), &error));
                false
            }
        };

        on_progress(MergeProgress {
            completed: idx + 1,
            total,
            file: file.name(),
            succeeded,
        });
    }

    if tables.is_empty() {
        warn!("no valid data found to merge");
    } else {
        let merged = concat(tables);
        info!(
            rows = merged.row_count(),
            columns = merged.column_count(),
            failed = outcome.errors.len(),
            "merged tables"
        );
        outcome.table = Some(merged);
    }

    outcome
}

/// Concatenates tables using an outer union of their columns.
///
/// Columns appear in order of first appearance. Rows keep their order within
/// each table and tables keep their order in the input; cells of columns a
/// table does not have are [`CellValue::Empty`].
pub fn concat(tables: Vec<Table>) -> MergedTable {
    let mut columns: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for table in &tables {
        for column in &table.columns {
            if !positions.contains_key(column) {
                positions.insert(column.clone(), columns.len());
                columns.push(column.clone());
            }
        }
    }

    let total_rows = tables.iter().map(Table::row_count).sum();
    let mut rows = Vec::with_capacity(total_rows);
    for table in tables {
        let targets: Vec<usize> = table
            .columns
            .iter()
            .map(|column| positions[column])
            .collect();
        for row in table.rows {
            let mut merged = vec![CellValue::Empty; columns.len()];
            for (&target, cell) in targets.iter().zip(row) {
                merged[target] = cell;
            }
            rows.push(merged);
        }
    }

    MergedTable { columns, rows }
}
