//! Reading registration tables and writing winner lists.

pub mod delimited;
pub mod pinned;
pub mod workbook;

use crate::model::Table;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Unsupported file type '{0}' (expected .csv, .xlsx, .xls or .ods)")]
    UnsupportedFormat(String),
    #[error("Workbook has no readable worksheet: {}", .0.display())]
    EmptyWorkbook(PathBuf),
    #[error("No header row found in {}", .0.display())]
    MissingHeader(PathBuf),
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Read a table, choosing the reader from the file extension.
pub fn read_table(path: &Path) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => delimited::read_csv(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => workbook::read_workbook(path),
        other => Err(FormatError::UnsupportedFormat(other.to_string())),
    }
}
