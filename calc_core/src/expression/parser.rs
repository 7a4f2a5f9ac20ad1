//! Recursive-descent parser.
//!
//! ```text
//! expr    := term (('+'|'-') term)*
//! term    := power (('*'|'/') power)*
//! power   := unary ('^' power)?
//! unary   := ('-'|'+') unary | postfix
//! postfix := primary ('%' | '!')*
//! primary := NUMBER | '(' expr ')' | FUNC primary | CONST
//! ```
//!
//! Nesting (parentheses, `^` exponents, function arguments) is capped at
//! [`MAX_DEPTH`] and input length at [`MAX_TOKENS`], so the tree that
//! evaluation and drop walk recursively stays shallow.

use super::ast::{BinOp, Expr};
use super::lexer::{Op, Spanned, Token};
use crate::constants::constant_by_symbol;
use crate::errors::{CalcError, CalcResult};
use crate::functions::Function;

/// Deepest allowed nesting of parentheses, exponents and function arguments
pub const MAX_DEPTH: usize = 256;

/// Longest accepted token stream
pub const MAX_TOKENS: usize = 1024;

/// Parse a token stream into an expression tree.
///
/// `end_pos` is reported for errors at the end of input.
pub fn parse(tokens: &[Spanned], end_pos: usize) -> CalcResult<Expr> {
    if tokens.is_empty() {
        return Err(CalcError::syntax(end_pos, "empty expression"));
    }
    if let Some(first_extra) = tokens.get(MAX_TOKENS) {
        return Err(CalcError::syntax(
            first_extra.pos,
            format!("expression too long (more than {} tokens)", MAX_TOKENS),
        ));
    }

    let mut parser = Parser {
        tokens,
        index: 0,
        end_pos,
        depth: 0,
    };
    let expr = parser.expr()?;

    if let Some(extra) = parser.peek() {
        let detail = match extra.token {
            Token::RightParen => "unbalanced parenthesis: unexpected ')'".to_string(),
            _ => format!("unexpected {}", describe(&extra.token)),
        };
        return Err(CalcError::syntax(extra.pos, detail));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    index: usize,
    end_pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.index)
    }

    fn peek_token(&self) -> Option<&'a Token> {
        self.peek().map(|s| &s.token)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    /// Consume the next token if it is the given operator
    fn eat_op(&mut self, op: Op) -> bool {
        if self.peek_token() == Some(&Token::Operator(op)) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Run `inner` one nesting level deeper
    fn nested<T>(&mut self, pos: usize, inner: impl FnOnce(&mut Self) -> CalcResult<T>) -> CalcResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::syntax(pos, "expression nested too deeply"));
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    /// Position of the next token, or the end of input
    fn pos(&self) -> usize {
        self.peek().map_or(self.end_pos, |s| s.pos)
    }

    fn expr(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat_op(Op::Add) {
                BinOp::Add
            } else if self.eat_op(Op::Sub) {
                BinOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.power()?;
        loop {
            let op = if self.eat_op(Op::Mul) {
                BinOp::Mul
            } else if self.eat_op(Op::Div) {
                BinOp::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.power()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn power(&mut self) -> CalcResult<Expr> {
        let base = self.unary()?;
        if self.eat_op(Op::Pow) {
            // Recursing on the right makes '^' right-associative
            let exponent = self.nested(self.pos(), Self::power)?;
            return Ok(Expr::binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    /// A run of signs folds into at most one negation
    fn unary(&mut self) -> CalcResult<Expr> {
        let mut negate = false;
        loop {
            if self.eat_op(Op::Sub) {
                negate = !negate;
            } else if !self.eat_op(Op::Add) {
                break;
            }
        }
        let operand = self.postfix()?;
        Ok(if negate {
            Expr::UnaryMinus(Box::new(operand))
        } else {
            operand
        })
    }

    fn postfix(&mut self) -> CalcResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.peek_token() {
                Some(Token::Operator(Op::Percent)) => {
                    self.index += 1;
                    expr = Expr::Percent(Box::new(expr));
                }
                Some(Token::Bang) => {
                    self.index += 1;
                    expr = Expr::Call(Function::Factorial, Box::new(expr));
                }
                _ => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> CalcResult<Expr> {
        let Some(spanned) = self.next() else {
            return Err(CalcError::syntax(self.end_pos, "unexpected end of expression"));
        };

        match &spanned.token {
            Token::Number(v) => Ok(Expr::Literal(*v)),
            Token::LeftParen => {
                let inner = self.nested(spanned.pos, Self::expr)?;
                match self.next() {
                    Some(Spanned {
                        token: Token::RightParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(CalcError::syntax(
                        other.pos,
                        format!("expected ')' but found {}", describe(&other.token)),
                    )),
                    None => Err(CalcError::syntax(
                        self.end_pos,
                        format!("unbalanced parenthesis: '(' at position {} is never closed", spanned.pos),
                    )),
                }
            }
            Token::Ident(name) => self.identifier(name, spanned.pos),
            other => Err(CalcError::syntax(
                spanned.pos,
                format!("expected a number but found {}", describe(other)),
            )),
        }
    }

    /// Function application or named constant
    fn identifier(&mut self, name: &str, pos: usize) -> CalcResult<Expr> {
        if let Ok(function) = Function::from_name(name) {
            let arg = self.nested(pos, Self::primary)?;
            return Ok(Expr::Call(function, Box::new(arg)));
        }
        if let Some(constant) = constant_by_symbol(name) {
            return Ok(Expr::Literal(constant.value));
        }
        if self.peek_token() == Some(&Token::LeftParen) {
            return Err(CalcError::unknown_function(name));
        }
        Err(CalcError::syntax(pos, format!("unknown identifier '{}'", name)))
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(v) => format!("number {}", v),
        Token::Operator(op) => format!("'{}'", op.symbol()),
        Token::LeftParen => "'('".to_string(),
        Token::RightParen => "')'".to_string(),
        Token::Ident(name) => format!("'{}'", name),
        Token::Bang => "'!'".to_string(),
    }
}
