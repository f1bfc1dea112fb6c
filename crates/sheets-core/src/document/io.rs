use log::debug;
use std::path::Path;

use super::Sheet;
use crate::error::{Result, SheetError};
use crate::storage::{parse_sheet, write_sheet};

impl Sheet {
    /// Replace the grid with the contents of `path` and remember the path.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let loaded = parse_sheet(&std::fs::read_to_string(path)?)?;
        self.grid.clear();
        for (cell, text) in loaded {
            self.grid.insert(cell, text);
        }
        debug!("loaded {} cell(s) from {}", self.grid.len(), path.display());
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Save to the current file path.
    pub fn save(&mut self) -> Result<()> {
        let path = self.file_path.clone().ok_or(SheetError::NoFilePath)?;
        self.save_as(&path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        write_sheet(path, self)?;
        debug!("saved {} cell(s) to {}", self.grid.len(), path.display());
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheets_engine::engine::{CellRef, CellValue};

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.sheet");

        let mut sheet = Sheet::new();
        sheet.set_cell(CellRef::new('A', 1), "=2+2");
        sheet.set_cell(CellRef::new('B', 1), "=A1*10");
        sheet.set_cell(CellRef::new('A', 2), "Total: \"x\"");
        sheet.save_as(&path).unwrap();
        assert!(!sheet.modified);

        let loaded = Sheet::with_file(Some(path.clone())).unwrap();
        assert_eq!(loaded.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.cells(), sheet.cells());
        assert_eq!(
            loaded.evaluate_cell(CellRef::new('B', 1)).unwrap(),
            CellValue::Number(40.0)
        );
    }

    #[test]
    fn test_whitespace_edged_text_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("padded.sheet");

        let mut sheet = Sheet::new();
        sheet.set_cell(CellRef::new('A', 1), " 5");
        sheet.set_cell(CellRef::new('A', 2), "note \r");
        sheet.set_cell(CellRef::new('B', 1), "=LEN(A1)");
        assert_eq!(
            sheet.evaluate_cell(CellRef::new('B', 1)).unwrap(),
            CellValue::Number(2.0)
        );
        sheet.save_as(&path).unwrap();

        let loaded = Sheet::with_file(Some(path)).unwrap();
        assert_eq!(loaded.cells(), sheet.cells());
        assert_eq!(
            loaded.evaluate_cell(CellRef::new('B', 1)).unwrap(),
            CellValue::Number(2.0)
        );
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut sheet = Sheet::new();
        assert!(matches!(sheet.save(), Err(SheetError::NoFilePath)));
    }

    #[test]
    fn test_with_missing_file_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.sheet");
        let sheet = Sheet::with_file(Some(path.clone())).unwrap();
        assert!(sheet.is_empty());
        assert_eq!(sheet.file_path, Some(path));
    }
}
