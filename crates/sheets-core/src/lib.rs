//! sheets-core - UI-agnostic sheet model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{Grid, Sheet};
pub use error::{Result, SheetError};

pub use sheets_engine::engine::{CellRef, CellValue, EvalOptions};
