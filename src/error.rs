//! Error types for the Sheets command line

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the Sheets application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
