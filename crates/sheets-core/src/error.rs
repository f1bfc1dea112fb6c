//! Error types for Sheets core.

use sheets_engine::engine::FormulaError;
use thiserror::Error;

/// Errors that can occur while loading, saving or evaluating a sheet.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("No file path set")]
    NoFilePath,

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
