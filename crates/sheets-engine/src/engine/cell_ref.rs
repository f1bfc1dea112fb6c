//! Cell reference parsing and formatting.
//!
//! Formulas address cells with a single column letter followed by a one or
//! two digit row number (e.g., "A1", "Z99"). Rows are kept exactly as typed,
//! so "B7" is row 7 of column 'B'.
//!
//! # Examples
//!
//! ```
//! use sheets_engine::engine::CellRef;
//!
//! let cell = CellRef::parse("B3").unwrap();
//! assert_eq!(cell.column, 'B');
//! assert_eq!(cell.row, 3);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by row number and column letter.
///
/// Ordering is row-major: all of row 1 sorts before row 2.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub column: char,
}

impl CellRef {
    pub fn new(column: char, row: u32) -> CellRef {
        CellRef { row, column }
    }

    /// Parse a cell reference written as one uppercase letter and 1-2 digits.
    /// Returns None if the input is invalid.
    pub fn parse(name: &str) -> Option<CellRef> {
        let caps = cell_re().captures(name)?;
        let column = caps["column"].chars().next()?;
        let row = caps["row"].parse::<u32>().ok()?;
        Some(CellRef::new(column, row))
    }

    /// Zero-based column index ('A' -> 0, 'Z' -> 25), or None when the
    /// column is not an uppercase ASCII letter.
    pub fn column_index(&self) -> Option<usize> {
        self.column
            .is_ascii_uppercase()
            .then(|| (self.column as u8 - b'A') as usize)
    }

    /// Column letter for a zero-based index, if it is within 'A'..='Z'.
    pub fn column_letter(index: usize) -> Option<char> {
        if index < 26 {
            Some((b'A' + index as u8) as char)
        } else {
            None
        }
    }
}

/// Full-match pattern for a cell reference token.
pub(crate) fn cell_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"^(?<column>[A-Z])(?<row>[0-9]{1,2})$").expect("cell reference regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}
