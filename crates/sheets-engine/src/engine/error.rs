//! Error types for formula tokenizing, parsing and evaluation.

use thiserror::Error;

use super::CellRef;

/// Raised while splitting formula text into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizeError {
    #[error("Unexpected character '{ch}' at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    #[error("Unrecognized token: {0}")]
    UnrecognizedToken(String),

    #[error("Unexpected quote at position {pos}")]
    UnexpectedQuote { pos: usize },

    #[error("Unterminated string literal starting at position {pos}")]
    UnterminatedString { pos: usize },
}

/// Raised while building the expression tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    #[error("Wrong number of arguments for '{op}': expected {expected}, found {found}")]
    WrongArgumentCount {
        op: String,
        expected: usize,
        found: usize,
    },

    #[error("Parse error: expected a single expression, found {0}")]
    DanglingExpressions(usize),

    #[error("Unexpected token '{token}' at token {index}")]
    UnexpectedToken { token: String, index: usize },

    #[error("Function {0} must be followed by '('")]
    ExpectedParenthesis(String),

    #[error("Formula nests deeper than {0} levels")]
    TooDeep(usize),
}

/// Raised while evaluating an expression tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Operation not supported on text: \"{0}\"")]
    TextOperand(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("{0} expects a text argument")]
    ExpectedText(String),

    #[error("Circular reference: {}", format_path(.path))]
    CircularReference { path: Vec<CellRef> },
}

fn format_path(path: &[CellRef]) -> String {
    path.iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Any failure of a single formula evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
