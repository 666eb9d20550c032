use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{BinaryOperator, UnaryOperator};

/// A fixed set of operator spellings, matched longest-first.
#[derive(Debug, Clone)]
pub struct SymbolTable<T> {
    symbols: Vec<(&'static str, T)>,
}

impl<T: Copy> SymbolTable<T> {
    pub fn new(symbols: &[(&'static str, T)]) -> Self {
        let mut symbols = symbols.to_vec();
        // stable, so equal-length spellings keep their declared order
        symbols.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { symbols }
    }

    /// the longest spelling that prefixes `input`, if any
    pub fn longest_match(&self, input: &str) -> Option<(&'static str, T)> {
        self.symbols
            .iter()
            .find(|(symbol, _)| input.starts_with(symbol))
            .copied()
    }
}

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"^[ \t\n\x0B\x0C\r]+").unwrap();
    static ref NUMBER_RE: Regex =
        Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[[:alpha:]_]+").unwrap();
    pub static ref UNARY_OPERATORS: SymbolTable<UnaryOperator> = SymbolTable::new(&[
        ("+", UnaryOperator::Plus),
        ("-", UnaryOperator::Minus),
    ]);
    pub static ref ADDITIVE_OPERATORS: SymbolTable<BinaryOperator> = SymbolTable::new(&[
        ("+", BinaryOperator::Plus),
        ("-", BinaryOperator::Minus),
    ]);
    pub static ref MULTIPLICATIVE_OPERATORS: SymbolTable<BinaryOperator> = SymbolTable::new(&[
        ("*", BinaryOperator::Mul),
        ("/", BinaryOperator::Div),
        ("mod", BinaryOperator::Mod),
    ]);
    pub static ref POWER_OPERATORS: SymbolTable<BinaryOperator> =
        SymbolTable::new(&[("**", BinaryOperator::Pow)]);
}

/// Cursor over the source text. Every token method skips leading whitespace
/// first and leaves the position untouched when it does not match, whitespace
/// included.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    pub fn skip_whitespace(&mut self) {
        self.take(&WHITESPACE_RE);
    }

    fn take(&mut self, re: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let found = re.find(rest)?;
        self.pos += found.end();
        Some(&rest[..found.end()])
    }

    fn token<T>(&mut self, lex: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        self.skip_whitespace();
        let token = lex(self);
        if token.is_none() {
            self.pos = start;
        }
        token
    }

    pub fn number(&mut self) -> Option<f64> {
        self.token(|s| s.take(&NUMBER_RE)?.parse().ok())
    }

    /// letters and underscores only, digits never continue an identifier
    pub fn identifier(&mut self) -> Option<&'a str> {
        self.token(|s| s.take(&IDENTIFIER_RE))
    }

    pub fn symbol(&mut self, symbol: char) -> bool {
        self.token(|s| {
            if s.rest().starts_with(symbol) {
                s.pos += symbol.len_utf8();
                Some(())
            } else {
                None
            }
        })
        .is_some()
    }

    pub fn operator<T: Copy>(&mut self, table: &SymbolTable<T>) -> Option<T> {
        self.token(|s| {
            let (spelling, op) = table.longest_match(s.rest())?;
            s.pos += spelling.len();
            Some(op)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_c_whitespace() {
        let mut scanner = Scanner::new(" \t\n\x0B\x0C\r1");
        scanner.skip_whitespace();
        assert_eq!(scanner.rest(), "1");
        assert_eq!(scanner.position(), 6);
    }

    #[test]
    fn number_forms() {
        for (input, value, rest) in &[
            ("0", 0.0, ""),
            ("42", 42.0, ""),
            ("1.5", 1.5, ""),
            ("1.", 1.0, ""),
            (".25", 0.25, ""),
            ("1e3", 1000.0, ""),
            ("2.5E-1", 0.25, ""),
            ("  7+1", 7.0, "+1"),
            ("1e", 1.0, "e"),
        ] {
            let mut scanner = Scanner::new(input);
            assert_eq!(scanner.number(), Some(*value), "input {:?}", input);
            assert_eq!(scanner.rest(), *rest);
        }
    }

    #[test]
    fn number_has_no_sign() {
        let mut scanner = Scanner::new("-1");
        assert_eq!(scanner.number(), None);
        assert_eq!(scanner.position(), 0);

        let mut scanner = Scanner::new(".");
        assert_eq!(scanner.number(), None);
    }

    #[test]
    fn identifier_excludes_digits() {
        let mut scanner = Scanner::new("log2(x)");
        assert_eq!(scanner.identifier(), Some("log"));
        assert_eq!(scanner.rest(), "2(x)");

        let mut scanner = Scanner::new("__my_fn(");
        assert_eq!(scanner.identifier(), Some("__my_fn"));

        let mut scanner = Scanner::new("1abc");
        assert_eq!(scanner.identifier(), None);
    }

    #[test]
    fn symbol_only_advances_on_match() {
        let mut scanner = Scanner::new(" ( 1");
        assert!(!scanner.symbol(')'));
        assert_eq!(scanner.position(), 0);
        assert!(scanner.symbol('('));
        assert_eq!(scanner.rest(), " 1");
    }

    #[test]
    fn power_is_longest_match() {
        let table = SymbolTable::new(&[
            ("*", BinaryOperator::Mul),
            ("**", BinaryOperator::Pow),
        ]);
        assert_eq!(table.longest_match("**2"), Some(("**", BinaryOperator::Pow)));
        assert_eq!(table.longest_match("*2"), Some(("*", BinaryOperator::Mul)));
        assert_eq!(table.longest_match("2"), None);
    }

    #[test]
    fn operator_tables() {
        let mut scanner = Scanner::new(" mod 3");
        assert_eq!(
            scanner.operator(&*MULTIPLICATIVE_OPERATORS),
            Some(BinaryOperator::Mod)
        );
        assert_eq!(scanner.rest(), " 3");

        let mut scanner = Scanner::new("**");
        assert_eq!(scanner.operator(&*ADDITIVE_OPERATORS), None);
        assert_eq!(scanner.operator(&*POWER_OPERATORS), Some(BinaryOperator::Pow));
        assert!(scanner.at_end());

        let mut scanner = Scanner::new("-x");
        assert_eq!(
            scanner.operator(&*UNARY_OPERATORS),
            Some(UnaryOperator::Minus)
        );
    }
}
