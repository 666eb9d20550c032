use crate::ast::{BinaryOperator, Expression};
use crate::lexer::{
    Scanner, SymbolTable, ADDITIVE_OPERATORS, MULTIPLICATIVE_OPERATORS, POWER_OPERATORS,
    UNARY_OPERATORS,
};

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("failed at offset {offset}: `{rest}`")]
    Unmatched { offset: usize, rest: String },
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// `Ok(None)` means the rule did not match here and the input was left where
/// it was, so the caller may try something else. `Err` aborts the whole parse.
pub type PartialParseResult = Result<Option<Expression>, ParseError>;

#[derive(Debug, Clone)]
pub struct Parser {
    /// deepest allowed nesting of parentheses, unary signs and call arguments
    pub max_depth: usize,
}

impl std::default::Default for Parser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Parses the whole of `input` as one expression. Leading and trailing
    /// whitespace is ignored; anything else left over is an error.
    pub fn parse_str(&self, input: &str) -> Result<Expression, ParseError> {
        let mut grammar = Grammar {
            scanner: Scanner::new(input),
            depth: 0,
            max_depth: self.max_depth,
        };
        let expr = grammar.parse_expr()?;
        grammar.scanner.skip_whitespace();
        match expr {
            Some(expr) if grammar.scanner.at_end() => Ok(expr),
            _ => Err(ParseError::Unmatched {
                offset: grammar.scanner.position(),
                rest: grammar.scanner.rest().to_string(),
            }),
        }
    }
}

struct Grammar<'a> {
    scanner: Scanner<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Grammar<'a> {
    fn backtrack(&mut self, start: usize) -> PartialParseResult {
        self.scanner.reset(start);
        Ok(None)
    }

    fn parse_expr(&mut self) -> PartialParseResult {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> PartialParseResult {
        self.parse_chain(&ADDITIVE_OPERATORS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> PartialParseResult {
        self.parse_chain(&MULTIPLICATIVE_OPERATORS, Self::parse_power)
    }

    fn parse_power(&mut self) -> PartialParseResult {
        self.parse_chain(&POWER_OPERATORS, Self::parse_primary)
    }

    /// `operand (operator operand)*`. An operator whose right operand fails to
    /// parse is given back, ending the chain.
    fn parse_chain(
        &mut self,
        operators: &SymbolTable<BinaryOperator>,
        operand: fn(&mut Self) -> PartialParseResult,
    ) -> PartialParseResult {
        let first = match operand(self)? {
            Some(first) => first,
            None => return Ok(None),
        };

        let mut ops = Vec::new();
        loop {
            let checkpoint = self.scanner.position();
            let op = match self.scanner.operator(operators) {
                Some(op) => op,
                None => break,
            };
            match operand(self)? {
                Some(rhs) => ops.push((op, rhs)),
                None => {
                    self.scanner.reset(checkpoint);
                    break;
                }
            }
        }

        if ops.is_empty() {
            Ok(Some(first))
        } else {
            Ok(Some(Expression::binary(first, ops)))
        }
    }

    fn parse_primary(&mut self) -> PartialParseResult {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = self.parse_primary_choice();
        self.depth -= 1;
        result
    }

    fn parse_primary_choice(&mut self) -> PartialParseResult {
        if let Some(value) = self.scanner.number() {
            return Ok(Some(Expression::Number(value)));
        }
        if let Some(nested) = self.parse_nested()? {
            return Ok(Some(nested));
        }
        if let Some(unary) = self.parse_unary()? {
            return Ok(Some(unary));
        }
        self.parse_call()
    }

    fn parse_nested(&mut self) -> PartialParseResult {
        let start = self.scanner.position();
        if !self.scanner.symbol('(') {
            return Ok(None);
        }
        let res = match self.parse_expr()? {
            Some(res) => res,
            None => return self.backtrack(start),
        };
        if !self.scanner.symbol(')') {
            return self.backtrack(start);
        }
        Ok(Some(res))
    }

    fn parse_unary(&mut self) -> PartialParseResult {
        let start = self.scanner.position();
        let op = match self.scanner.operator(&UNARY_OPERATORS) {
            Some(op) => op,
            None => return Ok(None),
        };
        match self.parse_primary()? {
            Some(arg) => Ok(Some(Expression::unary(op, arg))),
            None => self.backtrack(start),
        }
    }

    /// `identifier '(' expr (',' expr)* ')'`, at least one argument
    fn parse_call(&mut self) -> PartialParseResult {
        let start = self.scanner.position();
        let name = match self.scanner.identifier() {
            Some(name) => name,
            None => return Ok(None),
        };
        if !self.scanner.symbol('(') {
            return self.backtrack(start);
        }

        let mut args = match self.parse_expr()? {
            Some(arg) => vec![arg],
            None => return self.backtrack(start),
        };
        loop {
            let checkpoint = self.scanner.position();
            if !self.scanner.symbol(',') {
                break;
            }
            match self.parse_expr()? {
                Some(arg) => args.push(arg),
                None => {
                    self.scanner.reset(checkpoint);
                    break;
                }
            }
        }

        if !self.scanner.symbol(')') {
            return self.backtrack(start);
        }
        Ok(Some(Expression::call(name, args)))
    }
}
