//! Integer dice formulas.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := unary (("*" | "/") unary)*
//! unary   := "-" unary | primary
//! primary := NUMBER | DICE | "@" NAME | "(" expr ")"
//! ```
//!
//! Division truncates toward zero. Arithmetic saturates instead of
//! overflowing.

/// Tokenizer for formula text.
pub mod lexer;

use std::fmt;
use std::ops::Range;

use rand::rngs::StdRng;

use cw_core::{FormulaContext, FormulaError};

use crate::dice::{DicePool, Die, RollResult};
use lexer::Token;

/// Upper bound on dice rolled by a single term.
pub const MAX_DICE_PER_TERM: u32 = 1000;

/// Upper bound on tokens in one formula.
pub const MAX_TOKENS: usize = 512;

/// Upper bound on nested negations and parentheses.
pub const MAX_NESTING: usize = 64;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Truncating division.
    Div,
}

/// A parsed formula expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal.
    Number(i64),
    /// Roll `count` dice and sum them.
    Dice {
        /// Number of dice.
        count: u32,
        /// Die type.
        die: Die,
    },
    /// Context variable.
    Var(String),
    /// Negation.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

/// A parsed, reusable formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

/// The outcome of evaluating a formula once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Final total.
    pub total: i64,
    /// Every die rolled, left to right.
    pub rolls: RollResult,
}

impl Formula {
    /// Parse formula text.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = lexer::lex(source).map_err(|e| syntax(source, e.message))?;
        if tokens.is_empty() {
            return Err(syntax(source, "empty formula".to_string()));
        }
        if tokens.len() > MAX_TOKENS {
            return Err(syntax(source, format!("more than {MAX_TOKENS} tokens")));
        }
        let mut parser = Parser {
            source,
            tokens: &tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.expr()?;
        if let Some((token, span)) = parser.peek() {
            return Err(syntax(
                source,
                format!("unexpected '{token}' at {}", span.start),
            ));
        }
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// The formula text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Roll the formula once.
    pub fn evaluate(
        &self,
        rng: &mut StdRng,
        context: &FormulaContext,
    ) -> Result<Evaluation, FormulaError> {
        let mut rolls = RollResult::default();
        let total = self.eval(&self.expr, rng, context, &mut rolls)?;
        Ok(Evaluation { total, rolls })
    }

    fn eval(
        &self,
        expr: &Expr,
        rng: &mut StdRng,
        context: &FormulaContext,
        rolls: &mut RollResult,
    ) -> Result<i64, FormulaError> {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Dice { count, die } => {
                if *count > MAX_DICE_PER_TERM {
                    return Err(FormulaError::InvalidDie(format!(
                        "{count}{die} exceeds {MAX_DICE_PER_TERM} dice"
                    )));
                }
                let result = DicePool::new().add(*die, *count).roll(rng);
                let total = i64::try_from(result.total()).unwrap_or(i64::MAX);
                rolls.extend(result);
                Ok(total)
            }
            Expr::Var(name) => context
                .get(name)
                .copied()
                .ok_or_else(|| FormulaError::UnknownVariable(name.clone())),
            Expr::Neg(inner) => Ok(self.eval(inner, rng, context, rolls)?.saturating_neg()),
            Expr::Binary { op, lhs, rhs } => {
                let l = self.eval(lhs, rng, context, rolls)?;
                let r = self.eval(rhs, rng, context, rolls)?;
                match op {
                    BinOp::Add => Ok(l.saturating_add(r)),
                    BinOp::Sub => Ok(l.saturating_sub(r)),
                    BinOp::Mul => Ok(l.saturating_mul(r)),
                    BinOp::Div => {
                        if r == 0 {
                            Err(FormulaError::DivisionByZero(self.source.clone()))
                        } else {
                            Ok(l.saturating_div(r))
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn syntax(source: &str, message: String) -> FormulaError {
    FormulaError::Syntax {
        formula: source.to_string(),
        message,
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [(Token, Range<usize>)],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&(Token, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek().is_some_and(|(t, _)| t == expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat(&Token::Plus) {
                BinOp::Add
            } else if self.eat(&Token::Minus) {
                BinOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = if self.eat(&Token::Star) {
                BinOp::Mul
            } else if self.eat(&Token::Slash) {
                BinOp::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(syntax(
                self.source,
                format!("nested deeper than {MAX_NESTING} levels"),
            ));
        }
        let expr = if self.eat(&Token::Minus) {
            self.unary().map(|inner| Expr::Neg(Box::new(inner)))
        } else {
            self.primary()
        };
        self.depth -= 1;
        expr
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let Some((token, span)) = self.peek().cloned() else {
            return Err(syntax(self.source, "unexpected end of formula".to_string()));
        };
        self.pos += 1;
        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Dice(count, die) => Ok(Expr::Dice { count, die }),
            Token::Var(name) => Ok(Expr::Var(name)),
            Token::LParen => {
                let inner = self.expr()?;
                if !self.eat(&Token::RParen) {
                    return Err(syntax(self.source, "missing ')'".to_string()));
                }
                Ok(inner)
            }
            other => Err(syntax(
                self.source,
                format!("unexpected '{other}' at {}", span.start),
            )),
        }
    }
}
