//! Recursive-descent parser for expressions and equations.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! input   := expr ( '=' expr )?
//! expr    := term ( ('+' | '-') term )*
//! term    := unary ( ('*' | '/') unary )*
//! unary   := ('+' | '-') unary | power
//! power   := primary ( '^' unary )?
//! primary := number | ident | ident '(' expr (',' expr)* ')' | '(' expr ')'
//! ```

use std::{collections::BTreeSet, fmt};

use crate::{
    Float,
    error::{Error, Result},
};

use super::lexer::{Spanned, Token, tokenize};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Float),
    Symbol(String),
    Neg(Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    Call(String, Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed input: a bare expression or an equation `lhs = rhs`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expr),
    Equation(Expr, Expr),
}

/// Deepest nesting accepted, counted both as parser recursion and as height
/// of the resulting tree. Later passes recurse over the tree, so this also
/// bounds their stack use.
const MAX_DEPTH: usize = 128;

/// Parse an expression or a single equation.
pub fn parse(input: &str) -> Result<Statement> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
        depth: 0,
    };
    let (lhs, _) = parser.parse_expr()?;
    let statement = if parser.consume(&Token::Equals) {
        Statement::Equation(lhs, parser.parse_expr()?.0)
    } else {
        Statement::Expr(lhs)
    };
    match parser.tokens.get(parser.pos) {
        None => Ok(statement),
        Some(extra) => Err(Error::Parse {
            position: extra.position,
            message: format!("unexpected {:?} after end of expression", extra.token),
        }),
    }
}

/// Parse input that must be a bare expression.
pub fn parse_expr(input: &str) -> Result<Expr> {
    match parse(input)? {
        Statement::Expr(expr) => Ok(expr),
        Statement::Equation(..) => Err(Error::Parse {
            position: input.find('=').unwrap_or(0),
            message: "expected an expression, found an equation".into(),
        }),
    }
}

/// A parsed subtree and its height.
type Parsed = (Expr, usize);

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn parse_expr(&mut self) -> Result<Parsed> {
        let (mut node, mut height) = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            let position = self.position();
            self.pos += 1;
            let (rhs, rhs_height) = self.parse_term()?;
            height = self.grow(height.max(rhs_height), position)?;
            node = Expr::Binary(Box::new(node), op, Box::new(rhs));
        }
        Ok((node, height))
    }

    fn parse_term(&mut self) -> Result<Parsed> {
        let (mut node, mut height) = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => break,
            };
            let position = self.position();
            self.pos += 1;
            let (rhs, rhs_height) = self.parse_unary()?;
            height = self.grow(height.max(rhs_height), position)?;
            node = Expr::Binary(Box::new(node), op, Box::new(rhs));
        }
        Ok((node, height))
    }

    /// Every recursive path passes through here, so the depth guard lives here.
    fn parse_unary(&mut self) -> Result<Parsed> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_at(self.position(), "expression nested too deeply"));
        }
        self.depth += 1;
        let parsed = self.parse_signed();
        self.depth -= 1;
        parsed
    }

    fn parse_signed(&mut self) -> Result<Parsed> {
        let position = self.position();
        if self.consume(&Token::Plus) {
            self.parse_unary()
        } else if self.consume(&Token::Minus) {
            let (inner, height) = self.parse_unary()?;
            Ok((Expr::Neg(Box::new(inner)), self.grow(height, position)?))
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> Result<Parsed> {
        let (base, base_height) = self.parse_primary()?;
        let position = self.position();
        if self.consume(&Token::Caret) {
            // right associative, and allows x^-1
            let (exponent, exp_height) = self.parse_unary()?;
            let height = self.grow(base_height.max(exp_height), position)?;
            Ok((Expr::Binary(Box::new(base), BinOp::Pow, Box::new(exponent)), height))
        } else {
            Ok((base, base_height))
        }
    }

    fn parse_primary(&mut self) -> Result<Parsed> {
        let Some(Spanned { token, position }) = self.next() else {
            return Err(self.error_at(self.end, "unexpected end of input, expected expression"));
        };
        match token {
            Token::Number(value) => Ok((Expr::Number(value), 1)),
            Token::Ident(name) => {
                if !self.consume(&Token::LParen) {
                    return Ok((Expr::Symbol(name), 1));
                }
                let (first, mut height) = self.parse_expr()?;
                let mut args = vec![first];
                while self.consume(&Token::Comma) {
                    let (arg, arg_height) = self.parse_expr()?;
                    height = height.max(arg_height);
                    args.push(arg);
                }
                self.expect_close(position)?;
                Ok((Expr::Call(name, args), self.grow(height, position)?))
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect_close(position)?;
                Ok(inner)
            }
            other => Err(self.error_at(position, &format!("unexpected {other:?}, expected expression"))),
        }
    }

    /// Height of a node over a child of height `child`, bounded by [`MAX_DEPTH`].
    fn grow(&self, child: usize, position: usize) -> Result<usize> {
        if child >= MAX_DEPTH {
            Err(self.error_at(position, "expression nested too deeply"))
        } else {
            Ok(child + 1)
        }
    }

    fn expect_close(&mut self, open: usize) -> Result<()> {
        if self.consume(&Token::RParen) {
            Ok(())
        } else {
            Err(self.error_at(open, "unclosed '('"))
        }
    }

    fn error_at(&self, position: usize, message: &str) -> Error {
        Error::Parse {
            position,
            message: message.to_string(),
        }
    }

    /// Byte offset of the next token, or the end of input.
    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.position)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn next(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

impl Expr {
    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(name.to_string())
    }

    /// `a + b`, dropping literal zeros.
    pub fn add(a: Expr, b: Expr) -> Self {
        match (a, b) {
            (Expr::Number(x), Expr::Number(y)) => Expr::Number(x + y),
            (a, b) if b.is_zero() => a,
            (a, b) if a.is_zero() => b,
            (a, b) => Expr::Binary(Box::new(a), BinOp::Add, Box::new(b)),
        }
    }

    /// `a - b`, dropping literal zeros.
    pub fn sub(a: Expr, b: Expr) -> Self {
        match (a, b) {
            (Expr::Number(x), Expr::Number(y)) => Expr::Number(x - y),
            (a, b) if b.is_zero() => a,
            (a, b) if a.is_zero() => Expr::neg(b),
            (a, b) => Expr::Binary(Box::new(a), BinOp::Sub, Box::new(b)),
        }
    }

    /// `a * b`, simplifying literal zeros and ones.
    pub fn mul(a: Expr, b: Expr) -> Self {
        match (a, b) {
            (Expr::Number(x), Expr::Number(y)) => Expr::Number(x * y),
            (a, b) if a.is_zero() || b.is_zero() => Expr::Number(0.0),
            (a, b) if a.is_one() => b,
            (a, b) if b.is_one() => a,
            (a, b) => Expr::Binary(Box::new(a), BinOp::Mul, Box::new(b)),
        }
    }

    /// `a / b`, folding numbers, a zero numerator and a unit denominator.
    pub fn div(a: Expr, b: Expr) -> Self {
        match (a, b) {
            (Expr::Number(x), Expr::Number(y)) if y != 0.0 => Expr::Number(x / y),
            (a, b) if a.is_zero() && !b.is_zero() => Expr::Number(0.0),
            (a, b) if b.is_one() => a,
            (a, b) => Expr::Binary(Box::new(a), BinOp::Div, Box::new(b)),
        }
    }

    /// `-a`, folding numbers and double negation.
    pub fn neg(a: Expr) -> Self {
        match a {
            Expr::Number(x) => Expr::Number(-x),
            Expr::Neg(inner) => *inner,
            a => Expr::Neg(Box::new(a)),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Number(x) if *x == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Number(x) if *x == 1.0)
    }

    /// Names of all free symbols (function names excluded).
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Symbol(name) => {
                out.insert(name.clone());
            }
            Expr::Neg(inner) => inner.collect_symbols(out),
            Expr::Binary(l, _, r) => {
                l.collect_symbols(out);
                r.collect_symbols(out);
            }
            Expr::Call(_, args) => args.iter().for_each(|a| a.collect_symbols(out)),
        }
    }

    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Symbol(s) => s == name,
            Expr::Neg(inner) => inner.contains_symbol(name),
            Expr::Binary(l, _, r) => l.contains_symbol(name) || r.contains_symbol(name),
            Expr::Call(_, args) => args.iter().any(|a| a.contains_symbol(name)),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(_, BinOp::Add | BinOp::Sub, _) => 1,
            Expr::Binary(_, BinOp::Mul | BinOp::Div, _) => 2,
            Expr::Neg(_) => 3,
            Expr::Number(x) if *x < 0.0 => 3,
            Expr::Binary(_, BinOp::Pow, _) => 4,
            _ => 5,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        let prec = self.precedence();
        if prec < min_prec {
            write!(f, "(")?;
        }
        match self {
            Expr::Number(x) => write!(f, "{x}")?,
            Expr::Symbol(name) => write!(f, "{name}")?,
            Expr::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_with(f, 3)?;
            }
            Expr::Binary(l, op, r) => {
                let (sym, left_min, right_min) = match op {
                    BinOp::Add => (" + ", 1, 2),
                    BinOp::Sub => (" - ", 1, 2),
                    BinOp::Mul => ("*", 2, 3),
                    BinOp::Div => ("/", 2, 3),
                    BinOp::Pow => ("^", 5, 3),
                };
                l.fmt_with(f, left_min)?;
                write!(f, "{sym}")?;
                r.fmt_with(f, right_min)?;
            }
            Expr::Call(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_with(f, 0)?;
                }
                write!(f, ")")?;
            }
        }
        if prec < min_prec {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, 0)
    }
}
