//! Formula tokenizer.
//!
//! Splits formula text into [`Token`]s one step at a time. Digits and letters
//! accumulate into a pending word which is classified (function name, number,
//! cell reference) when an operator, whitespace, quote or the end of input
//! ends it. A `-` becomes the [`UNARY_MINUS`] marker when it starts an operand:
//! at the start of input or after any operator other than `)`.

use log::trace;
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::iter::Enumerate;
use std::str::Chars;
use std::sync::OnceLock;

use super::error::TokenizeError;
use super::token::{FunctionName, Token, UNARY_MINUS};
use super::CellRef;

const OPERATORS: [char; 6] = ['+', '-', '*', '/', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolType {
    Digit,
    Letter,
    Operator,
    Whitespace,
    Quote,
    Undefined,
}

fn classify(ch: char) -> SymbolType {
    match ch {
        '0'..='9' | '.' => SymbolType::Digit,
        'A'..='Z' => SymbolType::Letter,
        '"' => SymbolType::Quote,
        c if OPERATORS.contains(&c) => SymbolType::Operator,
        c if c.is_whitespace() => SymbolType::Whitespace,
        _ => SymbolType::Undefined,
    }
}

/// Full-match pattern for numeric text: `12`, `1.5` or `.5`.
pub(crate) fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| {
        Regex::new(r"^(?:[0-9]+|[0-9]*\.[0-9]+)$").expect("number regex must compile")
    })
}

/// The function names recognized by default (`ABS`, `SIN`, `LEN`).
pub fn default_functions() -> &'static HashSet<String> {
    static FUNCTIONS: OnceLock<HashSet<String>> = OnceLock::new();
    FUNCTIONS.get_or_init(|| {
        FunctionName::ALL
            .iter()
            .map(|name| name.as_str().to_string())
            .collect()
    })
}

/// Pull-style token stream over a single formula.
///
/// Yields `Err` at most once; the stream ends after the first error.
pub struct Tokenizer<'a> {
    chars: Enumerate<Chars<'a>>,
    functions: &'a HashSet<String>,
    word: String,
    /// Position of the opening quote while inside a string literal.
    string_start: Option<usize>,
    unary_minus_possible: bool,
    pending: VecDeque<Token>,
    finished: bool,
}

/// Tokenize `line`, treating any word in `functions` as a function name.
pub fn tokenize<'a>(line: &'a str, functions: &'a HashSet<String>) -> Tokenizer<'a> {
    Tokenizer {
        chars: line.chars().enumerate(),
        functions,
        word: String::new(),
        string_start: None,
        unary_minus_possible: true,
        pending: VecDeque::new(),
        finished: false,
    }
}

/// Tokenize eagerly, stopping at the first error.
pub fn tokenize_all(line: &str, functions: &HashSet<String>) -> Result<Vec<Token>, TokenizeError> {
    tokenize(line, functions).collect()
}

impl Tokenizer<'_> {
    fn step(&mut self) -> Result<(), TokenizeError> {
        let Some((pos, ch)) = self.chars.next() else {
            self.finished = true;
            if let Some(start) = self.string_start {
                return Err(TokenizeError::UnterminatedString { pos: start });
            }
            return self.flush_word();
        };

        if self.string_start.is_some() {
            if ch == '"' {
                self.string_start = None;
                let text = std::mem::take(&mut self.word);
                self.pending.push_back(Token::String(text));
                self.unary_minus_possible = false;
            } else {
                self.word.push(ch);
            }
            return Ok(());
        }

        match classify(ch) {
            SymbolType::Digit | SymbolType::Letter => {
                self.word.push(ch);
                self.unary_minus_possible = false;
            }
            SymbolType::Operator => {
                self.flush_word()?;
                if ch == '-' && self.unary_minus_possible {
                    self.pending.push_back(Token::Operator(UNARY_MINUS));
                } else {
                    self.pending.push_back(Token::Operator(ch));
                }
                self.unary_minus_possible = ch != ')';
            }
            SymbolType::Whitespace => self.flush_word()?,
            SymbolType::Quote => {
                if !self.word.trim().is_empty() {
                    return Err(TokenizeError::UnexpectedQuote { pos });
                }
                self.word.clear();
                self.string_start = Some(pos);
            }
            SymbolType::Undefined => return Err(TokenizeError::InvalidCharacter { ch, pos }),
        }
        Ok(())
    }

    /// Classify and emit the pending word, if any.
    fn flush_word(&mut self) -> Result<(), TokenizeError> {
        let word = std::mem::take(&mut self.word);
        if word.trim().is_empty() {
            return Ok(());
        }

        let token = if self.functions.contains(&word) {
            Token::Function(word)
        } else if number_re().is_match(&word) {
            match word.parse::<f64>() {
                Ok(n) => Token::Number(n),
                Err(_) => return Err(TokenizeError::UnrecognizedToken(word)),
            }
        } else if let Some(cell) = CellRef::parse(&word) {
            Token::Cell(cell)
        } else {
            return Err(TokenizeError::UnrecognizedToken(word));
        };
        self.pending.push_back(token);
        Ok(())
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                trace!("token: {:?}", token);
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.step() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(line: &str) -> Result<Vec<Token>, TokenizeError> {
        tokenize_all(line, default_functions())
    }

    fn op(c: char) -> Token {
        Token::Operator(c)
    }

    #[test]
    fn test_tokenize_arithmetic() {
        assert_eq!(
            lex("2+3*4").unwrap(),
            vec![
                Token::Number(2.0),
                op('+'),
                Token::Number(3.0),
                op('*'),
                Token::Number(4.0)
            ]
        );
    }

    #[test]
    fn test_tokenize_number_forms() {
        assert_eq!(lex("12").unwrap(), vec![Token::Number(12.0)]);
        assert_eq!(lex("1.25").unwrap(), vec![Token::Number(1.25)]);
        assert_eq!(lex(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(lex("1."), Err(TokenizeError::UnrecognizedToken("1.".to_string())));
        assert_eq!(lex("1.2.3"), Err(TokenizeError::UnrecognizedToken("1.2.3".to_string())));
    }

    #[test]
    fn test_tokenize_functions_and_cells() {
        assert_eq!(
            lex("ABS(A1)").unwrap(),
            vec![
                Token::Function("ABS".to_string()),
                op('('),
                Token::Cell(CellRef::new('A', 1)),
                op(')')
            ]
        );
        assert_eq!(lex("Z99").unwrap(), vec![Token::Cell(CellRef::new('Z', 99))]);
    }

    #[test]
    fn test_tokenize_unrecognized_words() {
        assert_eq!(lex("FOO"), Err(TokenizeError::UnrecognizedToken("FOO".to_string())));
        assert_eq!(lex("A100"), Err(TokenizeError::UnrecognizedToken("A100".to_string())));
        assert_eq!(lex("1A"), Err(TokenizeError::UnrecognizedToken("1A".to_string())));
    }

    #[test]
    fn test_unary_minus_positions() {
        assert_eq!(lex("-3").unwrap(), vec![op(UNARY_MINUS), Token::Number(3.0)]);
        assert_eq!(
            lex("2--3").unwrap(),
            vec![Token::Number(2.0), op('-'), op(UNARY_MINUS), Token::Number(3.0)]
        );
        assert_eq!(
            lex("(1)-2").unwrap(),
            vec![op('('), Token::Number(1.0), op(')'), op('-'), Token::Number(2.0)]
        );
        // Whitespace keeps unary minus possible.
        assert_eq!(
            lex("* - 1").unwrap(),
            vec![op('*'), op(UNARY_MINUS), Token::Number(1.0)]
        );
        assert_eq!(
            lex("A1 - 1").unwrap(),
            vec![Token::Cell(CellRef::new('A', 1)), op('-'), Token::Number(1.0)]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            lex("LEN(\"a + b\")").unwrap(),
            vec![
                Token::Function("LEN".to_string()),
                op('('),
                Token::String("a + b".to_string()),
                op(')')
            ]
        );
        assert_eq!(lex("\"\"").unwrap(), vec![Token::String(String::new())]);
        assert_eq!(
            lex("\"x\"-1").unwrap(),
            vec![Token::String("x".to_string()), op('-'), Token::Number(1.0)]
        );
    }

    #[test]
    fn test_quote_errors() {
        assert_eq!(lex("AB\"c\""), Err(TokenizeError::UnexpectedQuote { pos: 2 }));
        assert_eq!(lex("1 + \"abc"), Err(TokenizeError::UnterminatedString { pos: 4 }));
    }

    #[test]
    fn test_invalid_character_reports_position() {
        assert_eq!(
            lex("1 + x"),
            Err(TokenizeError::InvalidCharacter { ch: 'x', pos: 4 })
        );
        assert_eq!(lex("2^3"), Err(TokenizeError::InvalidCharacter { ch: '^', pos: 1 }));
    }

    #[test]
    fn test_tokenizer_is_lazy_and_fused() {
        let functions = default_functions();
        let mut tokens = tokenize("1 + x + 2", functions);
        assert_eq!(tokens.next(), Some(Ok(Token::Number(1.0))));
        assert_eq!(tokens.next(), Some(Ok(op('+'))));
        assert!(matches!(tokens.next(), Some(Err(TokenizeError::InvalidCharacter { .. }))));
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn test_custom_function_set() {
        let functions: HashSet<String> = ["SQRT".to_string()].into_iter().collect();
        assert_eq!(
            tokenize_all("SQRT", &functions).unwrap(),
            vec![Token::Function("SQRT".to_string())]
        );
        assert!(tokenize_all("ABS", &functions).is_err());
    }
}
