//! Expression trees built by the parser.

use super::error::EvalError;
use super::token::FunctionName;

/// A node of an evaluation tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Value(f64),
    /// Text that can only be measured by `LEN`.
    Text(String),
    BinaryOp {
        left: Box<Expression>,
        op: char,
        right: Box<Expression>,
    },
    FunctionCall {
        name: String,
        arg: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(left: Expression, op: char, right: Expression) -> Expression {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, arg: Expression) -> Expression {
        Expression::FunctionCall {
            name: name.into(),
            arg: Box::new(arg),
        }
    }

    /// `-1 * operand`, the tree shape for a unary minus.
    pub fn negate(operand: Expression) -> Expression {
        Expression::binary(Expression::Value(-1.0), '*', operand)
    }

    /// Evaluate numerically. Division by zero follows IEEE semantics.
    pub fn eval(&self) -> Result<f64, EvalError> {
        match self {
            Expression::Value(v) => Ok(*v),
            Expression::Text(text) => Err(EvalError::TextOperand(text.clone())),
            Expression::BinaryOp { left, op, right } => {
                let l = left.eval()?;
                let r = right.eval()?;
                match op {
                    '+' => Ok(l + r),
                    '-' => Ok(l - r),
                    '*' => Ok(l * r),
                    '/' => Ok(l / r),
                    other => Err(EvalError::UnknownOperation(other.to_string())),
                }
            }
            Expression::FunctionCall { name, arg } => {
                let function = name
                    .parse::<FunctionName>()
                    .map_err(|_| EvalError::UnknownOperation(name.clone()))?;
                match function {
                    FunctionName::Abs => Ok(arg.eval()?.abs()),
                    FunctionName::Sin => Ok(arg.eval()?.sin()),
                    FunctionName::Len => match arg.as_ref() {
                        Expression::Text(text) => Ok(text.chars().count() as f64),
                        _ => Err(EvalError::ExpectedText(name.clone())),
                    },
                }
            }
        }
    }
}
