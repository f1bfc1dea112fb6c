//! Parser for sheet files.
//!
//! One cell per line, `CELLREF: TEXT`, where TEXT is the raw cell text
//! (formulas keep their `=`). Backslash escapes `\\`, `\n`, `\r`, `\t`, `\s`
//! (space) and `\u{hex}` allow any text; whitespace at either end of TEXT is
//! only significant when escaped.

use crate::document::Sheet;
use crate::error::{Result, SheetError};
use sheets_engine::engine::CellRef;
use std::path::Path;
use std::str::Chars;

/// Load a sheet file into a new [`Sheet`].
pub fn load_sheet(path: &Path) -> Result<Sheet> {
    let mut sheet = Sheet::new();
    sheet.load_file(path)?;
    Ok(sheet)
}

/// Parse sheet content into `(cell, text)` pairs in file order.
pub fn parse_sheet(content: &str) -> Result<Vec<(CellRef, String)>> {
    let mut cells = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((cell_ref_str, value_str)) = line.split_once(':') else {
            return Err(SheetError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: TEXT' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell = CellRef::parse(cell_ref_str).ok_or_else(|| SheetError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        let text = unescape_text(value_str.trim());
        if !text.is_empty() {
            cells.push((cell, text));
        }
    }

    Ok(cells)
}

fn unescape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('s') => out.push(' '),
                Some('u') => match code_point(&mut chars) {
                    Some(c) => out.push(c),
                    None => out.push_str("\\u"),
                },
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Read a `{hex}` code point, leaving `chars` untouched when malformed.
fn code_point(chars: &mut Chars<'_>) -> Option<char> {
    let rest = chars.as_str();
    let (hex, _) = rest.strip_prefix('{')?.split_once('}')?;
    let ch = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)?;
    *chars = rest[hex.len() + 2..].chars();
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formula_and_text() {
        let cells = parse_sheet("A1: =B1 + C1\nB1: 42\nC1: \"quoted\"").unwrap();
        assert_eq!(
            cells,
            vec![
                (CellRef::new('A', 1), "=B1 + C1".to_string()),
                (CellRef::new('B', 1), "42".to_string()),
                (CellRef::new('C', 1), "\"quoted\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_may_contain_colons() {
        let cells = parse_sheet("A1: time: 10:30").unwrap();
        assert_eq!(cells[0].1, "time: 10:30");
    }

    #[test]
    fn test_unescape() {
        let cells = parse_sheet(r"A1: line one\nline two \\ done").unwrap();
        assert_eq!(cells[0].1, "line one\nline two \\ done");
    }

    #[test]
    fn test_unescape_whitespace_and_code_points() {
        let cells = parse_sheet("A1: \\s5\\t \nA2: a\\r\\nb\nA3: \\u{a0}x\\u{zz}\\u{41").unwrap();
        assert_eq!(cells[0].1, " 5\t");
        assert_eq!(cells[1].1, "a\r\nb");
        assert_eq!(cells[2].1, "\u{a0}x\\u{zz}\\u{41");
    }

    #[test]
    fn test_skip_comments_and_empty_lines() {
        let content = r#"
# This is a comment
A1: 42

# Another comment

B1: 100
C1:
"#;
        assert_eq!(parse_sheet(content).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_lines_report_line_numbers() {
        match parse_sheet("A1: 1\nnonsense") {
            Err(SheetError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
        match parse_sheet("AA1: 1") {
            Err(SheetError::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert_eq!(message, "Invalid cell reference: AA1");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
