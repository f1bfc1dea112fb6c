//! Formula engine API.
//!
//! - [`CellRef`] - Cell addresses (`A1` notation)
//! - [`Token`], [`tokenize`] - Lazy formula tokenizer
//! - [`Expression`] - Evaluation trees
//! - [`Parser`], [`parse`] - Shunting-yard parser with recursive cell resolution
//! - [`CellLookup`] - Read access to the grid the formula lives in
//! - [`format_number`] - Format values for display

mod cell_ref;
mod error;
mod expr;
mod format;
mod lookup;
mod parser;
mod token;
mod tokenizer;

pub use cell_ref::CellRef;
pub use error::{EvalError, FormulaError, ParseError, Result, TokenizeError};
pub use expr::Expression;
pub use format::{CellValue, format_number};
pub use lookup::{CellLookup, NoCells};
pub use parser::{EvalOptions, MAX_EXPRESSION_DEPTH, Parser, evaluate_formula, evaluate_formula_with, parse};
pub use token::{FunctionName, Token, UNARY_MINUS};
pub use tokenizer::{Tokenizer, default_functions, tokenize, tokenize_all};
