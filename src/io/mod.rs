pub mod csv_read;
pub mod csv_write;
pub mod excel_read;

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolError};
use crate::model::{CellValue, Table};

/// File formats accepted by the merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    /// Detects the format from the extension of a file name. The match is
    /// case-insensitive.
    pub fn from_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("xlsx") => Ok(SourceFormat::Xlsx),
            Some("xls") => Ok(SourceFormat::Xls),
            _ => Err(ToolError::UnsupportedFormat(name.to_string())),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Xlsx => write!(f, "xlsx"),
            SourceFormat::Xls => write!(f, "xls"),
        }
    }
}

/// A named, rewindable byte stream. Header detection reads the content twice,
/// so the stream must be seekable.
#[derive(Debug)]
pub struct InputFile<R> {
    name: String,
    reader: R,
}

impl<R: Read + Seek> InputFile<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    /// File name as supplied by the user, extension included.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> Result<SourceFormat> {
        SourceFormat::from_name(&self.name)
    }

    /// Resets the read position to the start of the stream.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.rewind()?;
        Ok(())
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }
}

impl InputFile<Cursor<Vec<u8>>> {
    /// Wraps in-memory content, e.g. an uploaded buffer.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(name, Cursor::new(bytes.into()))
    }
}

impl InputFile<File> {
    /// Opens a file from disk, naming it after the final path component.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Ok(Self::new(display_name(path), file))
    }
}

/// A file on disk that is only opened while it is being read, so a batch
/// holds at most one handle at a time.
#[derive(Debug, Clone)]
pub struct PathInput {
    name: String,
    path: PathBuf,
}

impl PathInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file. The handle is closed when the returned value drops.
    pub fn open(&self) -> Result<InputFile<File>> {
        InputFile::open(&self.path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Builds a table from a header row and the data rows that follow it.
///
/// The table is as wide as the widest row. Blank or missing header cells are
/// named `Unnamed: {index}`, repeated names get `.1`, `.2`, ... suffixes, and
/// short rows are padded with [`CellValue::Empty`].
pub(crate) fn assemble_table(header: Vec<String>, data: Vec<Vec<CellValue>>) -> Table {
    let width = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let columns: Vec<String> = (0..width)
        .map(|col_idx| match header.get(col_idx) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Unnamed: {col_idx}"),
        })
        .collect();

    let rows = data
        .into_iter()
        .map(|mut row| {
            row.resize(width, CellValue::Empty);
            row
        })
        .collect();

    Table {
        columns: dedupe_names(columns),
        rows,
    }
}

/// Makes every name unique by suffixing repeats with `.1`, `.2`, ...
pub(crate) fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .map(|name| {
            if seen.insert(name.clone()) {
                return name;
            }
            let mut counter = 1;
            loop {
                let candidate = format!("{name}.{counter}");
                if seen.insert(candidate.clone()) {
                    return candidate;
                }
                counter += 1;
            }
        })
        .collect()
}
