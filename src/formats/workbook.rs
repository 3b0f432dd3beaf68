/// Spreadsheet input via calamine. Only the first worksheet is read.
use super::{FormatError, Result};
use crate::model::Table;
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;

pub fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FormatError::EmptyWorkbook(path.to_path_buf()))?;
    let sheet = match workbook.worksheet_range(&first_sheet) {
        Some(Ok(sheet)) => sheet,
        Some(Err(e)) => return Err(e.into()),
        None => return Err(FormatError::EmptyWorkbook(path.to_path_buf())),
    };

    let mut rows = sheet.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_text(cell).trim().to_string())
            .collect(),
        None => return Err(FormatError::MissingHeader(path.to_path_buf())),
    };
    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

/// Render a cell the way it reads in the spreadsheet. Whole numbers lose
/// the trailing `.0` that a float would otherwise print with.
fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(text) => text.clone(),
        DataType::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    }
}
