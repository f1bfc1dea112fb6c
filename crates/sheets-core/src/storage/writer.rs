//! Writer for sheet files.

use crate::document::Sheet;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write a sheet to `path`.
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    fs::write(path, sheet_to_string(sheet))?;
    Ok(())
}

/// Serialize a sheet, one cell per line in row-major order.
pub fn sheet_to_string(sheet: &Sheet) -> String {
    let mut lines = vec!["# Sheets".to_string()];
    for (cell, text) in sheet.cells() {
        lines.push(format!("{}: {}", cell, escape_text(&text)));
    }
    lines.join("\n") + "\n"
}

/// Escape cell text for a single line. Whitespace at either end is escaped
/// so that the reader can trim the separator space without losing it.
fn escape_text(input: &str) -> String {
    let start = input.len() - input.trim_start().len();
    let end = start + input.trim().len();
    let mut out = String::with_capacity(input.len());
    for (i, ch) in input.char_indices() {
        let edge = i < start || i >= end;
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if edge => out.push_str("\\s"),
            c if edge && c.is_whitespace() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            _ => out.push(ch),
        }
    }
    out
}
