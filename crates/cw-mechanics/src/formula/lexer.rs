//! Logos tokenizer for dice formulas.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::dice::Die;

/// Token type for dice formulas.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal.
    Number(i64),
    /// Dice term `NdM`; a missing `N` means one die.
    Dice(u32, Die),
    /// `@name` reference into the roll context.
    Var(String),
    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// `*`.
    Star,
    /// `/`.
    Slash,
    /// `(`.
    LParen,
    /// `)`.
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Dice(n, die) => write!(f, "{n}{die}"),
            Token::Var(name) => write!(f, "@{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[0-9]*[dD]([0-9]+|%)")]
    Dice,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"@[A-Za-z_][A-Za-z0-9_.]*")]
    Var,
}

/// A lexer error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte range of the offending input.
    pub span: Range<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Lex a formula into tokens, stopping at the first error.
pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = match result {
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::Star) => Token::Star,
            Ok(RawToken::Slash) => Token::Slash,
            Ok(RawToken::LParen) => Token::LParen,
            Ok(RawToken::RParen) => Token::RParen,
            Ok(RawToken::Number) => Token::Number(slice.parse::<i64>().map_err(|_| LexError {
                span: span.clone(),
                message: format!("integer out of range: {slice}"),
            })?),
            Ok(RawToken::Dice) => lex_dice(slice, &span)?,
            Ok(RawToken::Var) => Token::Var(slice[1..].to_string()),
            Err(()) => {
                return Err(LexError {
                    span: span.clone(),
                    message: format!("unexpected character: {:?}", &source[span]),
                });
            }
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}

fn lex_dice(slice: &str, span: &Range<usize>) -> Result<Token, LexError> {
    let split = slice.find(['d', 'D']).unwrap_or(0);
    let (count, die) = slice.split_at(split);
    let count = if count.is_empty() {
        1
    } else {
        count.parse::<u32>().map_err(|_| LexError {
            span: span.clone(),
            message: format!("dice count out of range: {count}"),
        })?
    };
    let die = Die::from_str_tag(die).ok_or_else(|| LexError {
        span: span.clone(),
        message: format!("invalid die: {die}"),
    })?;
    Ok(Token::Dice(count, die))
}
