//! Storage for sheet files and Markdown export.

mod md;
mod parser;
mod writer;

pub use md::write_markdown;
pub use parser::{load_sheet, parse_sheet};
pub use writer::{sheet_to_string, write_sheet};
