//! Tokens of right-hand-side expressions and equations.

use logos::Logos;

use crate::{
    Float,
    error::{Error, Result},
};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<Float>().ok())]
    Number(Float),
    /// Identifier, optionally followed by primes marking derivatives (`y'`, `y''`).
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*'*", |lex| lex.slice().to_string())]
    Ident(String),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let position = lexer.span().start;
        match result {
            Ok(token) => tokens.push(Spanned { token, position }),
            Err(()) => {
                return Err(Error::Parse {
                    position,
                    message: format!("invalid token '{}'", lexer.slice()),
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn numbers_identifiers_and_primes() {
        assert_eq!(
            kinds("y'' = -2.5e-1*y' + x"),
            vec![
                Token::Ident("y''".into()),
                Token::Equals,
                Token::Minus,
                Token::Number(0.25),
                Token::Star,
                Token::Ident("y'".into()),
                Token::Plus,
                Token::Ident("x".into()),
            ]
        );
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(
            kinds("x**2^3"),
            vec![
                Token::Ident("x".into()),
                Token::Caret,
                Token::Number(2.0),
                Token::Caret,
                Token::Number(3.0),
            ]
        );
    }

    #[test]
    fn reports_position_of_invalid_character() {
        match tokenize("y + @@") {
            Err(Error::Parse { position, .. }) => assert_eq!(position, 4),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
