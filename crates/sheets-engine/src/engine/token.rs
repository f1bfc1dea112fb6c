//! Token definitions shared by the tokenizer and the parser.

use std::fmt;
use std::str::FromStr;

use super::CellRef;

/// Marker emitted in place of `-` when it negates the following operand.
pub const UNARY_MINUS: char = '—';

/// Tokens recognized by the formula tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// One of `+ - * / ( )` or the [`UNARY_MINUS`] marker.
    Operator(char),
    Number(f64),
    Function(String),
    Cell(CellRef),
    String(String),
}

impl Token {
    pub fn is_operator(&self, op: char) -> bool {
        matches!(self, Token::Operator(c) if *c == op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(c) if *c == UNARY_MINUS => write!(f, "-"),
            Token::Operator(c) => write!(f, "{}", c),
            Token::Number(n) => write!(f, "{}", n),
            Token::Function(name) => write!(f, "{}", name),
            Token::Cell(cell) => write!(f, "{}", cell),
            Token::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// The named functions a formula may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    Abs,
    Sin,
    Len,
}

impl FunctionName {
    pub const ALL: [FunctionName; 3] = [FunctionName::Abs, FunctionName::Sin, FunctionName::Len];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionName::Abs => "ABS",
            FunctionName::Sin => "SIN",
            FunctionName::Len => "LEN",
        }
    }
}

impl FromStr for FunctionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ABS" => Ok(FunctionName::Abs),
            "SIN" => Ok(FunctionName::Sin),
            "LEN" => Ok(FunctionName::Len),
            _ => Err(format!("Unknown function: {}", s)),
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
