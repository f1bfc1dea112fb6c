//! sheets_engine - Formula tokenizer, parser and evaluator.

pub mod engine;

pub use engine::{CellLookup, CellRef, CellValue, EvalOptions, FormulaError, Parser, parse};
