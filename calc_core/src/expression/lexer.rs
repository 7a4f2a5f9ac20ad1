//! Preprocessing and tokenization.
//!
//! Positions are character offsets into the caller's text, so they
//! survive whitespace removal and glyph normalization.

use crate::errors::{CalcError, CalcResult};

/// Arithmetic operator symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Percent,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
            Op::Percent => '%',
        }
    }
}

/// A lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Op),
    LeftParen,
    RightParen,
    /// Function or constant name; `√` lexes as `sqrt`
    Ident(String),
    /// Postfix factorial
    Bang,
}

/// A token with the position of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Strip whitespace and map display glyphs to canonical operators.
///
/// Each surviving character is paired with its offset in `text`.
pub fn preprocess(text: &str) -> Vec<(char, usize)> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(pos, c)| {
            let c = match c {
                '÷' => '/',
                '×' | '·' => '*',
                '−' => '-',
                other => other,
            };
            (c, pos)
        })
        .collect()
}

/// Turn preprocessed characters into tokens
pub fn tokenize(chars: &[(char, usize)]) -> CalcResult<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (c, pos) = chars[i];
        let token = match c {
            '0'..='9' | '.' => {
                let (number, next) = lex_number(chars, i)?;
                i = next;
                tokens.push(Spanned {
                    token: Token::Number(number),
                    pos,
                });
                continue;
            }
            '+' => Token::Operator(Op::Add),
            '-' => Token::Operator(Op::Sub),
            '*' => Token::Operator(Op::Mul),
            '/' => Token::Operator(Op::Div),
            '^' => Token::Operator(Op::Pow),
            '%' => Token::Operator(Op::Percent),
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '!' => Token::Bang,
            '√' => Token::Ident("sqrt".to_string()),
            c if c.is_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].0.is_alphabetic() {
                    i += 1;
                }
                let name: String = chars[start..i].iter().map(|(c, _)| c).collect();
                tokens.push(Spanned {
                    token: Token::Ident(name),
                    pos,
                });
                continue;
            }
            other => {
                return Err(CalcError::syntax(pos, format!("unexpected character '{}'", other)));
            }
        };
        tokens.push(Spanned { token, pos });
        i += 1;
    }

    Ok(tokens)
}

/// Lex a decimal literal with optional fraction and exponent.
///
/// Returns the value and the index just past the literal.
fn lex_number(chars: &[(char, usize)], start: usize) -> CalcResult<(f64, usize)> {
    let digit_at = |i: usize| chars.get(i).is_some_and(|(c, _)| c.is_ascii_digit());

    let mut i = start;
    while i < chars.len() && (chars[i].0.is_ascii_digit() || chars[i].0 == '.') {
        i += 1;
    }

    // Exponent only when digits follow, so "2e" stays a number and the constant e
    if let Some(&(c, _)) = chars.get(i) {
        if c == 'e' || c == 'E' {
            let signed = matches!(chars.get(i + 1), Some(('+' | '-', _)));
            let digits_from = if signed { i + 2 } else { i + 1 };
            if digit_at(digits_from) {
                i = digits_from;
                while digit_at(i) {
                    i += 1;
                }
            }
        }
    }

    let literal: String = chars[start..i].iter().map(|(c, _)| c).collect();
    let pos = chars[start].1;
    literal
        .parse::<f64>()
        .map(|value| (value, i))
        .map_err(|_| CalcError::syntax(pos, format!("malformed number '{}'", literal)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> CalcResult<Vec<Token>> {
        tokenize(&preprocess(text)).map(|v| v.into_iter().map(|s| s.token).collect())
    }

    #[test]
    fn test_preprocess_keeps_positions() {
        let chars = preprocess(" 6 ÷ 2");
        assert_eq!(chars, vec![('6', 1), ('/', 3), ('2', 5)]);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(
            lex("2×3−1").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Operator(Op::Mul),
                Token::Number(3.0),
                Token::Operator(Op::Sub),
                Token::Number(1.0),
            ]
        );
        assert_eq!(
            lex("√9").unwrap(),
            vec![Token::Ident("sqrt".to_string()), Token::Number(9.0)]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(lex("2.").unwrap(), vec![Token::Number(2.0)]);
        assert_eq!(lex("1e3").unwrap(), vec![Token::Number(1000.0)]);
        assert_eq!(lex("2.5E-3").unwrap(), vec![Token::Number(0.0025)]);
        assert_eq!(
            lex("2e").unwrap(),
            vec![Token::Number(2.0), Token::Ident("e".to_string())]
        );
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(lex("1.2.3"), Err(CalcError::syntax(0, "malformed number '1.2.3'")));
        assert!(lex(".").is_err());
    }

    #[test]
    fn test_unknown_character_position() {
        let err = lex("1 + 2 $ 3").unwrap_err();
        assert_eq!(err.position(), Some(6));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            lex("sin30").unwrap(),
            vec![Token::Ident("sin".to_string()), Token::Number(30.0)]
        );
        assert_eq!(lex("π").unwrap(), vec![Token::Ident("π".to_string())]);
    }
}
