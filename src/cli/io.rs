//! Output handling for CLI
//!
//! - Text output: one human-readable line per record
//! - JSON output: one JSON object per line
//! - UTF-8 only

use std::io::Write;

use serde::Serialize;

use super::errors::CliResult;

/// Write a text line
pub fn write_line<W: Write>(out: &mut W, line: impl std::fmt::Display) -> CliResult<()> {
    writeln!(out, "{}", line)?;
    Ok(())
}

/// Write a value as a single JSON line
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
