use dashmap::DashMap;
use sheets_engine::engine::{CellLookup, CellRef, EvalOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// Sparse storage of raw cell text, shared cheaply between clones.
pub type Grid = Arc<DashMap<CellRef, String>>;

/// UI-agnostic sheet state.
///
/// Cells hold the text exactly as typed; formula cells keep their leading `=`.
pub struct Sheet {
    /// The spreadsheet grid (clones of the `Arc` are cheap)
    pub grid: Grid,
    /// Options used for every evaluation on this sheet
    pub options: EvalOptions,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified since it was loaded or saved
    pub modified: bool,
}

impl Sheet {
    /// Create an empty sheet.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Sheet {
            grid: Arc::new(DashMap::new()),
            options: EvalOptions::default(),
            file_path: None,
            modified: false,
        }
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a sheet and load `path` into it if the file exists.
    pub fn with_file(path: Option<PathBuf>) -> crate::error::Result<Self> {
        let mut sheet = Self::new();
        if let Some(p) = path {
            if p.exists() {
                sheet.load_file(&p)?;
            } else {
                sheet.file_path = Some(p);
            }
        }
        Ok(sheet)
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl CellLookup for Sheet {
    fn cell_text(&self, row: u32, column: char) -> String {
        self.grid
            .get(&CellRef::new(column, row))
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}
