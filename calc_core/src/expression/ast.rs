//! Expression tree and its evaluation.

use crate::angle::AngleMode;
use crate::errors::{CalcError, CalcResult};
use crate::functions::Function;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed expression. Built once per evaluation and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    UnaryMinus(Box<Expr>),
    BinaryOp(BinOp, Box<Expr>, Box<Expr>),
    /// Operand divided by 100
    Percent(Box<Expr>),
    Call(Function, Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinaryOp(op, Box::new(lhs), Box::new(rhs))
    }

    /// Evaluate the tree; trig calls read angles in `angle_mode`
    pub fn eval(&self, angle_mode: AngleMode) -> CalcResult<f64> {
        match self {
            Expr::Literal(v) => Ok(*v),
            Expr::UnaryMinus(inner) => Ok(-inner.eval(angle_mode)?),
            Expr::Percent(inner) => Ok(inner.eval(angle_mode)? / 100.0),
            Expr::Call(function, arg) => function.apply(arg.eval(angle_mode)?, angle_mode),
            Expr::BinaryOp(op, lhs, rhs) => {
                let l = lhs.eval(angle_mode)?;
                let r = rhs.eval(angle_mode)?;
                match op {
                    BinOp::Add => Ok(l + r),
                    BinOp::Sub => Ok(l - r),
                    BinOp::Mul => Ok(l * r),
                    BinOp::Div => divide(l, r),
                    BinOp::Pow => power(l, r),
                }
            }
        }
    }
}

/// Division; a divisor of exactly zero is an error rather than infinity
pub fn divide(lhs: f64, rhs: f64) -> CalcResult<f64> {
    if rhs == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(lhs / rhs)
}

/// Exponentiation `base ^ exponent`.
///
/// A negative base with a non-integer exponent has no real result.
pub fn power(base: f64, exponent: f64) -> CalcResult<f64> {
    let result = base.powf(exponent);
    if result.is_nan() && !base.is_nan() && !exponent.is_nan() {
        return Err(CalcError::domain(
            "^",
            format!("{} ^ {} has no real result", base, exponent),
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: f64) -> Expr {
        Expr::Literal(v)
    }

    #[test]
    fn test_eval_tree() {
        // -(2 + 3) * 4%
        let expr = Expr::binary(
            BinOp::Mul,
            Expr::UnaryMinus(Box::new(Expr::binary(BinOp::Add, lit(2.0), lit(3.0)))),
            Expr::Percent(Box::new(lit(4.0))),
        );
        assert!((expr.eval(AngleMode::Degrees).unwrap() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(divide(1.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(divide(1.0, -0.0), Err(CalcError::DivisionByZero));
        assert_eq!(divide(1.0, 4.0).unwrap(), 0.25);
    }

    #[test]
    fn test_power() {
        assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
        assert_eq!(power(4.0, 0.5).unwrap(), 2.0);
        assert!(matches!(power(-8.0, 1.0 / 3.0), Err(CalcError::DomainError { .. })));
        assert!(power(f64::NAN, 2.0).unwrap().is_nan());
    }

    #[test]
    fn test_call_uses_angle_mode() {
        let expr = Expr::Call(Function::Cos, Box::new(lit(100.0)));
        assert!(expr.eval(AngleMode::Gradians).unwrap().abs() < 1e-12);
    }
}
