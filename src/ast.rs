use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
}

/// A chain of operators sharing one precedence level, in input order.
/// `first op₁ x₁ op₂ x₂ ...` is folded strictly left to right.
#[derive(Debug, PartialEq, Clone)]
pub struct BinaryExpression {
    pub first: Expression,
    pub ops: Vec<(BinaryOperator, Expression)>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expression>,
}

/// A parsed expression. Each node owns its children, so a tree has no
/// sharing and is dropped in one go.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Unary(UnaryOperator, Box<Expression>),
    Binary(Box<BinaryExpression>),
    Call(FunctionCall),
}

impl Expression {
    pub fn unary(op: UnaryOperator, arg: Expression) -> Self {
        Expression::Unary(op, Box::new(arg))
    }

    pub fn binary(first: Expression, ops: Vec<(BinaryOperator, Expression)>) -> Self {
        Expression::Binary(Box::new(BinaryExpression { first, ops }))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call(FunctionCall {
            name: name.into(),
            args,
        })
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Plus => f.write_str("+"),
            UnaryOperator::Minus => f.write_str("-"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "mod",
            BinaryOperator::Pow => "**",
        };
        f.write_str(symbol)
    }
}

/// Renders the tree fully parenthesized, one pair per operator chain, so the
/// grouping the parser chose is visible.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Unary(op, arg) => write!(f, "{}{}", op, arg),
            Expression::Binary(binary) => {
                write!(f, "({}", binary.first)?;
                for (op, operand) in &binary.ops {
                    write!(f, " {} {}", op, operand)?;
                }
                f.write_str(")")
            }
            Expression::Call(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_shows_grouping() {
        let expr = Expression::binary(
            Expression::binary(
                Expression::Number(2.0),
                vec![(BinaryOperator::Pow, Expression::Number(3.0))],
            ),
            vec![
                (BinaryOperator::Mul, Expression::Number(5.0)),
                (BinaryOperator::Mod, Expression::Number(4.0)),
            ],
        );
        assert_eq!(expr.to_string(), "((2 ** 3) * 5 mod 4)");
    }

    #[test]
    fn display_unary_and_call() {
        let expr = Expression::call(
            "pow",
            vec![
                Expression::unary(
                    UnaryOperator::Minus,
                    Expression::unary(UnaryOperator::Plus, Expression::Number(1.5)),
                ),
                Expression::Number(2.0),
            ],
        );
        assert_eq!(expr.to_string(), "pow(-+1.5, 2)");
    }
}
