use log::debug;
use sheets_engine::engine::{CellRef, CellValue, Parser};

use super::Sheet;
use crate::error::Result;

impl Sheet {
    /// Store `text` in `cell`. Blank text clears the cell.
    pub fn set_cell(&mut self, cell: CellRef, text: &str) {
        if text.trim().is_empty() {
            self.clear_cell(&cell);
            return;
        }
        debug!("set {} = {:?}", cell, text);
        self.grid.insert(cell, text.to_string());
        self.modified = true;
    }

    pub fn clear_cell(&mut self, cell: &CellRef) {
        if self.grid.remove(cell).is_some() {
            self.modified = true;
        }
    }

    pub fn get_cell(&self, cell: &CellRef) -> Option<String> {
        self.grid.get(cell).map(|entry| entry.value().clone())
    }

    /// All non-empty cells in row-major order.
    pub fn cells(&self) -> Vec<(CellRef, String)> {
        let mut cells: Vec<_> = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        cells.sort_by_key(|(cell, _)| *cell);
        cells
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Evaluate a cell: formulas are computed, other text is returned as is.
    pub fn evaluate_cell(&self, cell: CellRef) -> Result<CellValue> {
        Ok(self.parser().evaluate_cell(cell)?)
    }

    /// Evaluate an ad-hoc formula against this sheet. The leading `=` is optional.
    pub fn evaluate_formula(&self, formula: &str) -> Result<f64> {
        let formula = formula.trim();
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        Ok(self.parser().parse(formula)?)
    }

    /// Text shown for a cell: its value, or the error in place of a value.
    pub fn get_cell_display(&self, cell: &CellRef) -> String {
        match self.evaluate_cell(*cell) {
            Ok(value) => value.to_string(),
            Err(e) => format!("#ERR: {}", e),
        }
    }

    fn parser(&self) -> Parser<'_, Sheet> {
        Parser::new(self).with_options(self.options)
    }
}
