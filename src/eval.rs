use crate::ast::{BinaryExpression, BinaryOperator, Expression, FunctionCall, UnaryOperator};
use crate::functions::{Functions, BUILTINS};

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum EvalError {
    #[error("unknown function {0}")]
    UnknownFunction(String),
    #[error("missing argument {index} in call to {function}")]
    MissingArgument { function: String, index: usize },
    #[error("modulo by zero")]
    ModuloByZero,
}

pub type EvalResult = Result<f64, EvalError>;

/// Applies one binary operator.
///
/// `Mod` truncates both operands toward zero to integers first and returns
/// the integer remainder, whose sign follows the dividend: `7.9 mod 2.5` is
/// `7 mod 2 = 1`, `-7 mod 2` is `-1`. Out of range operands saturate and NaN
/// truncates to zero.
pub fn apply_binary(op: BinaryOperator, a: f64, b: f64) -> EvalResult {
    match op {
        BinaryOperator::Plus => Ok(a + b),
        BinaryOperator::Minus => Ok(a - b),
        BinaryOperator::Mul => Ok(a * b),
        BinaryOperator::Div => Ok(a / b),
        BinaryOperator::Mod => {
            let (a, b) = (a as i64, b as i64);
            if b == 0 {
                return Err(EvalError::ModuloByZero);
            }
            Ok(a.wrapping_rem(b) as f64)
        }
        BinaryOperator::Pow => Ok(a.powf(b)),
    }
}

fn apply_unary(op: UnaryOperator, a: f64) -> f64 {
    match op {
        UnaryOperator::Plus => a,
        UnaryOperator::Minus => -a,
    }
}

/// Tree-walking evaluator over a function registry. Evaluation never mutates
/// the tree, so the same expression can be evaluated any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    pub functions: &'a Functions,
}

impl std::default::Default for Evaluator<'static> {
    fn default() -> Self {
        Self {
            functions: &BUILTINS,
        }
    }
}

impl<'a> Evaluator<'a> {
    pub fn new(functions: &'a Functions) -> Self {
        Self { functions }
    }

    pub fn eval(&self, expr: &Expression) -> EvalResult {
        match expr {
            Expression::Number(value) => Ok(*value),
            Expression::Unary(op, arg) => Ok(apply_unary(*op, self.eval(arg)?)),
            Expression::Binary(binary) => self.eval_binary(binary),
            Expression::Call(call) => self.eval_call(call),
        }
    }

    fn eval_binary(&self, binary: &BinaryExpression) -> EvalResult {
        let mut acc = self.eval(&binary.first)?;
        for (op, operand) in &binary.ops {
            let rhs = self.eval(operand)?;
            acc = apply_binary(*op, acc, rhs)?;
        }
        Ok(acc)
    }

    fn eval_call(&self, call: &FunctionCall) -> EvalResult {
        let function = match self.functions.get(&call.name) {
            Some(function) => function,
            None => return Err(EvalError::UnknownFunction(call.name.clone())),
        };

        // only the required arguments are evaluated, extras are ignored
        let mut args = Vec::with_capacity(function.arity);
        for index in 0..function.arity {
            let arg = call.args.get(index).ok_or_else(|| EvalError::MissingArgument {
                function: call.name.clone(),
                index,
            })?;
            args.push(self.eval(arg)?);
        }

        Ok(function.call(&args))
    }
}
