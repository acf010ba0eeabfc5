use std::fmt;

/// A single cell value of a parsed table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value at all. Rendered as an empty CSV field.
    #[default]
    Empty,
    /// Plain string value, kept verbatim.
    Text(String),
    /// Integer value read from a typed source.
    Integer(i64),
    /// Floating point value read from a typed source.
    Float(f64),
    /// Boolean value read from a typed source.
    Boolean(bool),
}

impl CellValue {
    /// Builds a text cell, mapping the empty string to [`CellValue::Empty`].
    pub fn from_text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Returns `true` when the cell holds no value. Whitespace-only text is a
    /// value.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns `true` when the cell is missing or only holds whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// Tabular content read without any header semantics. Every cell is kept as
/// a string and rows may have different lengths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// A table with named columns. Every row carries exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Looks up a cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col_idx = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(col_idx)
    }
}

/// Outer union of several [`Table`]s: the column set is the union of every
/// input's columns and rows are concatenated in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl MergedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the first `n` rows.
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Looks up a cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col_idx = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(col_idx)
    }
}
