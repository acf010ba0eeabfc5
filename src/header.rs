use tracing::debug;

use crate::error::{Result, ToolError};
use crate::model::RawTable;

/// Returns the index of the first row holding at least one non-blank cell.
///
/// A single non-blank cell is enough for a row to qualify; rows of
/// whitespace-only cells are skipped. Fails with [`ToolError::EmptyFile`]
/// when no row qualifies.
pub fn locate_header_row(raw: &RawTable) -> Result<usize> {
    let index = raw
        .rows
        .iter()
        .position(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .ok_or(ToolError::EmptyFile)?;
    debug!(header_index = index, "located header row");
    Ok(index)
}
