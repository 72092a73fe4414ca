// src/csv.rs
use std::io::Write;

use ::csv::{QuoteStyle, WriterBuilder};

use crate::error::Result;
use crate::flatten::Table;

/* ---------------- Writing ---------------- */

/// Header row then data rows. Quoting only where needed.
pub fn write_table<W: Write>(w: W, table: &Table) -> Result<()> {
    let mut out = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(w);
    out.write_record(&table.headers)?;
    for row in &table.rows {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

/// Rows of differing length, no header (the run summary is ragged by nature).
pub fn write_ragged<W: Write>(w: W, rows: &[Vec<String>]) -> Result<()> {
    let mut out = WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_writer(w);
    for row in rows {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

/* ---------------- Convenience ---------------- */

pub fn table_to_string(table: &Table) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_table(&mut buf, table)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
