use std::io::{Read, Seek};

use calamine::{DataType, Range, Reader, Xls, Xlsx};
use chrono::{Datelike, Timelike};

use crate::error::{Result, ToolError};
use crate::io::{SourceFormat, assemble_table};
use crate::model::{CellValue, RawTable, Table};

/// Reads the first worksheet of a workbook without assuming a header. Every
/// cell is rendered to its string form.
pub fn read_raw<R: Read + Seek>(reader: R, format: SourceFormat) -> Result<RawTable> {
    let range = read_first_sheet(reader, format)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .collect();
    Ok(RawTable::new(rows))
}

/// Reads the first worksheet of a workbook, treating the row at
/// `header_index` as the header. Data cells keep their native type.
pub fn read_with_header<R: Read + Seek>(
    reader: R,
    format: SourceFormat,
    header_index: usize,
) -> Result<Table> {
    let range = read_first_sheet(reader, format)?;
    let mut rows = range.rows().skip(header_index);

    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|cell| cell_to_string(Some(cell))).collect(),
        None => Vec::new(),
    };

    let data = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    Ok(assemble_table(header, data))
}

fn read_first_sheet<R: Read + Seek>(reader: R, format: SourceFormat) -> Result<Range<DataType>> {
    match format {
        SourceFormat::Xlsx => {
            let mut workbook: Xlsx<R> = Xlsx::new(reader)?;
            let name = first_sheet_name(workbook.sheet_names().first().cloned())?;
            let range_result = workbook
                .worksheet_range(&name)
                .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
            Ok(range_result?)
        }
        SourceFormat::Xls => {
            let mut workbook: Xls<R> = Xls::new(reader)?;
            let name = first_sheet_name(workbook.sheet_names().first().cloned())?;
            let range_result = workbook
                .worksheet_range(&name)
                .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
            Ok(range_result?)
        }
        SourceFormat::Csv => Err(ToolError::InvalidWorkbook(
            "csv content is not a workbook".to_string(),
        )),
    }
}

fn first_sheet_name(name: Option<String>) -> Result<String> {
    name.ok_or_else(|| ToolError::InvalidWorkbook("workbook has no worksheets".to_string()))
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other @ DataType::DateTime(_)) => format_datetime(other),
        Some(other) => other.to_string(),
    }
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) => CellValue::from_text(value.clone()),
        DataType::Int(value) => CellValue::Integer(*value),
        DataType::Float(value) => CellValue::Float(*value),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::DateTime(_) => CellValue::from_text(format_datetime(cell)),
        other => CellValue::from_text(other.to_string()),
    }
}

fn format_datetime(cell: &DataType) -> String {
    cell.as_datetime()
        .map(|datetime| {
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                datetime.year(),
                datetime.month(),
                datetime.day(),
                datetime.hour(),
                datetime.minute(),
                datetime.second()
            )
        })
        .unwrap_or_else(|| cell.to_string())
}
