//! CSV output.
//!
//! Minimal RFC-style writer: fields containing the separator, quotes, or
//! line breaks are quoted, embedded quotes are doubled, everything else is
//! written verbatim. Empty fields stay as empty cells so the column order
//! is stable for every consumer.

use std::error::Error;
use std::io::{self, Write};
use tokio::fs;
use tracing::{info, instrument};

use crate::models::CsvRecord;

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one row to any writer, quoting only where required.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Serialize records to a full CSV document, header line included.
pub fn to_csv_string<R: CsvRecord>(records: &[R]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let header: Vec<String> = R::columns().iter().map(|c| c.to_string()).collect();
    let _ = write_row(&mut buf, &header);
    for record in records {
        let _ = write_row(&mut buf, &record.row());
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// Write one dataset to `path`.
#[instrument(level = "info", skip(records), fields(path = %path))]
pub async fn write_records<R: CsvRecord>(records: &[R], path: &str) -> Result<(), Box<dyn Error>> {
    fs::write(path, to_csv_string(records)).await?;
    info!(rows = records.len(), "wrote CSV dataset");
    Ok(())
}
