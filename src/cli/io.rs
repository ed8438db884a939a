//! Output handling for CLI
//!
//! - JSON output: a single `{"status":"ok","data":...}` object per command
//! - Table output: tibble-style text
//! - Logs go to stderr, so stdout carries only results

use std::io::Write;

use serde_json::Value;

use crate::table::Table;

use super::errors::CliResult;

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write a table as text, at most `max_rows` rows
pub fn write_table<W: Write>(out: &mut W, table: &Table, max_rows: usize) -> CliResult<()> {
    write!(out, "{}", table.display(max_rows))?;
    out.flush()?;

    Ok(())
}

/// Write one line of text
pub fn write_line<W: Write>(out: &mut W, line: &str) -> CliResult<()> {
    writeln!(out, "{}", line)?;
    Ok(())
}
