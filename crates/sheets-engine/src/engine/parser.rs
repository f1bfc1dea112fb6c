//! Shunting-yard formula parser and evaluator.
//!
//! Tokens are consumed one at a time and folded into two stacks: finished
//! operand trees and pending operators. Cell references are resolved through
//! a [`CellLookup`] as soon as they are seen; a referenced formula cell is
//! parsed and evaluated recursively and enters the tree as a plain value.
//!
//! Precedence (higher binds tighter): `(` 1, `+ -` 2, `* /` 3, functions 4.
//! Operators of equal precedence associate to the left.

use log::{debug, trace, warn};

use super::error::{EvalError, FormulaError, ParseError, Result};
use super::expr::Expression;
use super::format::CellValue;
use super::lookup::{CellLookup, NoCells};
use super::token::{Token, UNARY_MINUS};
use super::tokenizer::{default_functions, number_re, tokenize};
use super::CellRef;

/// Options controlling formula evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Report a formula cell that (transitively) references itself instead
    /// of recursing until the stack is exhausted.
    pub detect_cycles: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            detect_cycles: true,
        }
    }
}

/// An entry of the operator stack.
#[derive(Debug, Clone, PartialEq)]
enum StackOp {
    Binary(char),
    UnaryMinus,
    OpenParen,
    Function(String),
}

impl StackOp {
    /// Unary minus is never compared; it blocks popping until its operand is complete.
    fn precedence(&self) -> Option<u8> {
        match self {
            StackOp::OpenParen => Some(1),
            StackOp::Binary('+' | '-') => Some(2),
            StackOp::Binary(_) => Some(3),
            StackOp::Function(_) => Some(4),
            StackOp::UnaryMinus => None,
        }
    }
}

/// Deepest operand tree a formula may build; evaluation recurses once per level.
pub const MAX_EXPRESSION_DEPTH: usize = 1000;

#[derive(Default)]
struct Stacks {
    /// Finished operand trees with their depth.
    operands: Vec<(Expression, usize)>,
    operators: Vec<StackOp>,
}

impl Stacks {
    fn push(&mut self, expr: Expression, depth: usize) -> std::result::Result<(), ParseError> {
        if depth > MAX_EXPRESSION_DEPTH {
            return Err(ParseError::TooDeep(MAX_EXPRESSION_DEPTH));
        }
        self.operands.push((expr, depth));
        Ok(())
    }

    fn apply(&mut self, op: StackOp) -> std::result::Result<(), ParseError> {
        trace!("apply {:?} to {} operand(s)", op, self.operands.len());
        let (expr, depth) = match op {
            StackOp::Function(name) => {
                let (arg, depth) = self
                    .operands
                    .pop()
                    .ok_or_else(|| wrong_argument_count(&name, 1, 0))?;
                (Expression::call(name, arg), depth + 1)
            }
            StackOp::UnaryMinus => {
                let (operand, depth) = self
                    .operands
                    .pop()
                    .ok_or_else(|| wrong_argument_count("-", 1, 0))?;
                (Expression::negate(operand), depth + 1)
            }
            StackOp::Binary(op) => {
                let found = self.operands.len();
                let (Some((right, rdepth)), Some((left, ldepth))) =
                    (self.operands.pop(), self.operands.pop())
                else {
                    return Err(wrong_argument_count(&op.to_string(), 2, found));
                };
                (Expression::binary(left, op, right), ldepth.max(rdepth) + 1)
            }
            StackOp::OpenParen => return Err(ParseError::MismatchedParentheses),
        };
        self.push(expr, depth)
    }

    /// Pop and apply operators while the top binds at least as tightly as `precedence`.
    fn reduce_while(&mut self, precedence: u8) -> std::result::Result<(), ParseError> {
        while self
            .operators
            .last()
            .and_then(StackOp::precedence)
            .is_some_and(|top| top >= precedence)
        {
            if let Some(op) = self.operators.pop() {
                self.apply(op)?;
            }
        }
        Ok(())
    }

    /// Pop the run of unary minus markers on top of the operator stack,
    /// returning -1.0 for an odd run and 1.0 otherwise.
    fn take_sign(&mut self) -> f64 {
        let mut sign = 1.0;
        while self.operators.last() == Some(&StackOp::UnaryMinus) {
            self.operators.pop();
            sign = -sign;
        }
        sign
    }

    fn push_operand(&mut self, expr: Expression) -> std::result::Result<(), ParseError> {
        match expr {
            Expression::Value(v) => {
                let signed = Expression::Value(self.take_sign() * v);
                self.push(signed, 1)
            }
            other if self.take_sign() < 0.0 => self.push(Expression::negate(other), 2),
            other => self.push(other, 1),
        }
    }

    /// Negate the operand just completed by a `)` if unary minus markers precede it.
    fn finish_group(&mut self) -> std::result::Result<(), ParseError> {
        if self.take_sign() < 0.0 {
            if let Some((operand, depth)) = self.operands.pop() {
                return self.push(Expression::negate(operand), depth + 1);
            }
        }
        Ok(())
    }
}

fn wrong_argument_count(op: &str, expected: usize, found: usize) -> ParseError {
    ParseError::WrongArgumentCount {
        op: op.to_string(),
        expected,
        found,
    }
}

fn unexpected(token: &Token, index: usize) -> FormulaError {
    ParseError::UnexpectedToken {
        token: token.to_string(),
        index,
    }
    .into()
}

/// Parses and evaluates formulas, resolving cell references through `L`.
pub struct Parser<'a, L: CellLookup + ?Sized> {
    lookup: &'a L,
    options: EvalOptions,
}

impl<'a, L: CellLookup + ?Sized> Parser<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Parser {
            lookup,
            options: EvalOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    /// Parse and evaluate a formula given without its leading `=`.
    pub fn parse(&self, expr: &str) -> Result<f64> {
        self.eval_formula(expr, &mut Vec::new())
    }

    /// Build the expression tree for a formula without evaluating its root.
    ///
    /// Referenced formula cells are still evaluated while the tree is built.
    pub fn parse_expression(&self, expr: &str) -> Result<Expression> {
        self.build(expr, &mut Vec::new())
    }

    /// Evaluate the cell at `cell`: formulas are computed, anything else is
    /// returned as text.
    pub fn evaluate_cell(&self, cell: CellRef) -> Result<CellValue> {
        let text = self.lookup.cell_text(cell.row, cell.column);
        match text.strip_prefix('=') {
            Some(formula) => {
                let mut resolving = vec![cell];
                Ok(CellValue::Number(self.eval_formula(formula, &mut resolving)?))
            }
            None => Ok(CellValue::Text(text)),
        }
    }

    fn eval_formula(&self, expr: &str, resolving: &mut Vec<CellRef>) -> Result<f64> {
        Ok(self.build(expr, resolving)?.eval()?)
    }

    fn build(&self, expr: &str, resolving: &mut Vec<CellRef>) -> Result<Expression> {
        let mut stacks = Stacks::default();
        let mut expect_operand = true;
        let mut awaiting_paren: Option<String> = None;

        for (index, token) in tokenize(expr, default_functions()).enumerate() {
            let token = token?;
            let index = index + 1;

            if let Some(name) = awaiting_paren.take() {
                if !token.is_operator('(') {
                    return Err(ParseError::ExpectedParenthesis(name).into());
                }
            }

            match token {
                Token::Operator(UNARY_MINUS) => {
                    if !expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    stacks.operators.push(StackOp::UnaryMinus);
                }
                Token::Operator('(') => {
                    if !expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    stacks.operators.push(StackOp::OpenParen);
                }
                Token::Operator(')') => {
                    if expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    loop {
                        match stacks.operators.pop() {
                            Some(StackOp::OpenParen) => break,
                            Some(op) => stacks.apply(op)?,
                            None => return Err(ParseError::MismatchedParentheses.into()),
                        }
                    }
                    if matches!(stacks.operators.last(), Some(StackOp::Function(_))) {
                        if let Some(function) = stacks.operators.pop() {
                            stacks.apply(function)?;
                        }
                    }
                    stacks.finish_group()?;
                }
                Token::Operator(op) => {
                    if expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    let binary = StackOp::Binary(op);
                    if let Some(precedence) = binary.precedence() {
                        stacks.reduce_while(precedence)?;
                    }
                    stacks.operators.push(binary);
                    expect_operand = true;
                }
                Token::Function(ref name) => {
                    if !expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    let function = StackOp::Function(name.clone());
                    if let Some(precedence) = function.precedence() {
                        stacks.reduce_while(precedence)?;
                    }
                    stacks.operators.push(function);
                    awaiting_paren = Some(name.clone());
                }
                Token::Number(n) => {
                    if !expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    stacks.push_operand(Expression::Value(n))?;
                    expect_operand = false;
                }
                Token::Cell(cell) => {
                    if !expect_operand {
                        return Err(unexpected(&token, index));
                    }
                    let resolved = self.resolve_cell(cell, resolving)?;
                    stacks.push_operand(resolved)?;
                    expect_operand = false;
                }
                Token::String(text) => {
                    if !expect_operand {
                        return Err(unexpected(&Token::String(text), index));
                    }
                    stacks.push_operand(Expression::Text(text))?;
                    expect_operand = false;
                }
            }
        }

        if let Some(name) = awaiting_paren {
            return Err(ParseError::ExpectedParenthesis(name).into());
        }

        while let Some(op) = stacks.operators.pop() {
            stacks.apply(op)?;
        }

        match stacks.operands.len() {
            1 => stacks
                .operands
                .pop()
                .map(|(expr, _)| expr)
                .ok_or_else(|| ParseError::DanglingExpressions(0).into()),
            n => Err(ParseError::DanglingExpressions(n).into()),
        }
    }

    /// Substitute the current content of `cell` into the formula being built.
    fn resolve_cell(&self, cell: CellRef, resolving: &mut Vec<CellRef>) -> Result<Expression> {
        let text = self.lookup.cell_text(cell.row, cell.column);
        debug!("resolving {} = {:?}", cell, text);

        let Some(formula) = text.strip_prefix('=') else {
            return Ok(match text.parse::<f64>() {
                Ok(n) if number_re().is_match(&text) => Expression::Value(n),
                _ => Expression::Text(text),
            });
        };

        if self.options.detect_cycles {
            if let Some(start) = resolving.iter().position(|c| *c == cell) {
                let mut path = resolving[start..].to_vec();
                path.push(cell);
                warn!("circular reference through {}", cell);
                return Err(EvalError::CircularReference { path }.into());
            }
        }

        resolving.push(cell);
        let value = self.eval_formula(formula, resolving);
        resolving.pop();
        Ok(Expression::Value(value?))
    }
}

/// Parse and evaluate a formula (without its leading `=`) that references no cells.
pub fn parse(expr: &str) -> Result<f64> {
    Parser::new(&NoCells).parse(expr)
}

/// Evaluate raw cell text: `=`-prefixed text is computed, anything else is
/// returned verbatim.
pub fn evaluate_formula<L: CellLookup + ?Sized>(lookup: &L, text: &str) -> Result<CellValue> {
    evaluate_formula_with(lookup, text, EvalOptions::default())
}

pub fn evaluate_formula_with<L: CellLookup + ?Sized>(
    lookup: &L,
    text: &str,
    options: EvalOptions,
) -> Result<CellValue> {
    match text.strip_prefix('=') {
        Some(formula) => {
            let value = Parser::new(lookup).with_options(options).parse(formula)?;
            Ok(CellValue::Number(value))
        }
        None => Ok(CellValue::Text(text.to_string())),
    }
}
