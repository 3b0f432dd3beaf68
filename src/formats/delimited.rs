/// CSV input and output
use super::Result;
use crate::model::Table;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Written ahead of exported CSV so spreadsheet programs detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn read_csv(path: &Path) -> Result<Table> {
    read_csv_from(File::open(path)?)
}

/// Read CSV with a header row. Ragged rows are accepted and padded.
pub fn read_csv_from<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.iter().map(clean_header).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}

fn clean_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    write_csv_to(table, File::create(path)?)
}

pub fn write_csv_to<W: Write>(table: &Table, mut output: W) -> Result<()> {
    output.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}
