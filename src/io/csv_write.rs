use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::model::MergedTable;

/// Default file name of the merged artifact.
pub const MERGED_FILE_NAME: &str = "merged_master.csv";

/// Writes the merged table as comma-delimited UTF-8 CSV: one header row with
/// the column names, then the data rows. No index column is emitted.
pub fn write_csv<W: Write>(writer: W, table: &MergedTable) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(ToString::to_string))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialises the merged table into an in-memory CSV buffer.
pub fn to_csv_bytes(table: &MergedTable) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, table)?;
    Ok(buffer)
}

/// Writes the merged table to the given path.
pub fn write_file(path: &Path, table: &MergedTable) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, table)
}
