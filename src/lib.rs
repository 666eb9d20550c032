//! Parses arithmetic expressions such as `2**3*5 + abs(-1)` into an
//! [`Expression`] tree and evaluates them to an `f64`.
//!
//! ```
//! let ast = expreval::parse("5 * 4 + 3 * 2 + 1").unwrap();
//! assert_eq!(expreval::eval(&ast), Ok(27.0));
//! ```
//!
//! Precedence, loosest first: `+ -`, then `* / mod`, then `**`. All of them,
//! `**` included, chain left to right. Unary `+`/`-` applies to the primary
//! right after it, so `-2**2` is `(-2)**2`.

pub mod ast;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryExpression, BinaryOperator, Expression, FunctionCall, UnaryOperator};
pub use eval::{EvalError, Evaluator};
pub use functions::{Function, Functions, BUILTINS};
pub use parser::{ParseError, Parser, DEFAULT_MAX_DEPTH};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Parses with the default [`Parser`] settings.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    Parser::default().parse_str(input)
}

/// Evaluates against the builtin functions.
pub fn eval(expr: &Expression) -> Result<f64, EvalError> {
    Evaluator::default().eval(expr)
}

pub fn evaluate(input: &str) -> Result<f64, Error> {
    Ok(eval(&parse(input)?)?)
}
