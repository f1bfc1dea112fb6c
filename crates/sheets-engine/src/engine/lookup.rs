//! The cell lookup capability used to resolve cell references.

/// Read access to the raw text stored in a grid of cells.
///
/// Formula cells return their text including the leading `=`.
pub trait CellLookup {
    fn cell_text(&self, row: u32, column: char) -> String;
}

impl<F> CellLookup for F
where
    F: Fn(u32, char) -> String,
{
    fn cell_text(&self, row: u32, column: char) -> String {
        self(row, column)
    }
}

/// A lookup in which every cell is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCells;

impl CellLookup for NoCells {
    fn cell_text(&self, _row: u32, _column: char) -> String {
        String::new()
    }
}
