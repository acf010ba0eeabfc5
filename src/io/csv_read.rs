use std::io::Read;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::error::Result;
use crate::io::assemble_table;
use crate::model::{CellValue, RawTable, Table};

/// Reads CSV content without assuming a header. Every field is kept as a
/// string.
pub fn read_raw<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = build_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RawTable::new(rows))
}

/// Reads CSV content, treating the record at `header_index` as the header and
/// every following record as data. Records above the header are skipped.
pub fn read_with_header<R: Read>(reader: R, header_index: usize) -> Result<Table> {
    let mut csv_reader = build_reader(reader);
    let mut records = csv_reader.records().skip(header_index);

    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => Vec::new(),
    };

    let mut data = Vec::new();
    for record in records {
        data.push(record_to_cells(&record?));
    }

    Ok(assemble_table(header, data))
}

fn build_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn record_to_cells(record: &StringRecord) -> Vec<CellValue> {
    record.iter().map(CellValue::from_text).collect()
}
