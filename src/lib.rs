//! Core library for the sheet-merge command line application.
//!
//! Several CSV or Excel files are read, each one's header row is located by
//! skipping leading blank rows, column names are normalised, and the tables are
//! concatenated into a single CSV. IO adapters live under [`io`], data
//! representations inside [`model`], header detection in [`header`], and the
//! merge orchestration under [`merge`].

pub mod error;
pub mod header;
pub mod io;
pub mod merge;
pub mod model;
pub mod preview;
pub mod report;
pub mod session;

pub use error::{Result, ToolError};
