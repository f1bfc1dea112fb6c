//! Markdown export of evaluated sheets.

use crate::document::Sheet;
use sheets_engine::engine::CellRef;

/// Render the evaluated sheet as a Markdown table covering columns `A` to the
/// last used column and rows `1` (or `0`, when a row-0 cell exists) to the
/// last used row. Cells whose column is not a letter have no table column.
pub fn write_markdown(sheet: &Sheet) -> String {
    let cells: Vec<_> = sheet
        .cells()
        .into_iter()
        .filter(|(cell, _)| cell.column_index().is_some())
        .collect();
    let (Some(first_row), Some(max_row), Some(max_col)) = (
        cells.iter().map(|(cell, _)| cell.row.min(1)).min(),
        cells.iter().map(|(cell, _)| cell.row).max(),
        cells.iter().filter_map(|(cell, _)| cell.column_index()).max(),
    ) else {
        return "# Sheet\n\n*Empty spreadsheet*\n".to_string();
    };

    let columns: Vec<char> = (0..=max_col).filter_map(CellRef::column_letter).collect();
    let mut out = String::from("# Sheet\n\n|   |");
    for column in &columns {
        out.push_str(&format!(" {} |", column));
    }
    out.push_str("\n|---|");
    for _ in &columns {
        out.push_str("---|");
    }
    out.push('\n');

    for row in first_row..=max_row {
        out.push_str(&format!("| {} |", row));
        for column in &columns {
            let display = sheet.get_cell_display(&CellRef::new(*column, row));
            out.push_str(&format!(" {} |", escape_markdown(&display)));
        }
        out.push('\n');
    }
    out
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
