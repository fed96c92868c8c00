//! Expression tree for the restricted formula grammar.
//!
//! This module defines the closed [`Expr`] type that formulas are compiled
//! into. The tree is built recursively using `Box<Expr>` for nested
//! expressions and covers exactly the allowed grammar: numeric constants,
//! the bound variable `x`, the arithmetic operators, and the whitelisted
//! unary functions. Because no other node kind exists, evaluation cannot
//! reach names, attributes, or side effects outside this set.
//!
//! Evaluation is a direct recursive walk binding `x` to the supplied value.
//! It returns `Result` rather than a raw float: real-domain violations
//! (`log` of a non-positive number, `sqrt` of a negative number, division
//! by an exact zero, fractional powers of negative bases) are reported as
//! [`InvalidExpression`] values instead of being smuggled through as NaN.
//! Infinities produced by ordinary overflow are *not* errors; they follow
//! IEEE semantics so that divergent iterations keep running to their
//! iteration cap.

use crate::errors::InvalidExpression;

/// An expression tree node for the restricted formula grammar.
///
/// Exponentiation is split three ways, mirroring how formulas are written:
/// integer-constant exponents evaluate through `powi`, float-constant
/// exponents through `powf`, and expression exponents (e.g. `2^x`)
/// evaluate both sides first.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant floating point value
    Const(f64),
    /// The bound variable `x`
    Var,
    /// Addition of two expressions
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction of two expressions
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication of two expressions
    Mul(Box<Expr>, Box<Expr>),
    /// Division of two expressions
    Div(Box<Expr>, Box<Expr>),
    /// Negation of an expression
    Neg(Box<Expr>),
    /// Exponentiation by an integer constant
    Pow(Box<Expr>, i64),
    /// Exponentiation by a floating point constant
    PowFloat(Box<Expr>, f64),
    /// Exponentiation by another expression
    PowExpr(Box<Expr>, Box<Expr>),
    /// Exponential function
    Exp(Box<Expr>),
    /// Natural logarithm
    Ln(Box<Expr>),
    /// Square root
    Sqrt(Box<Expr>),
    /// Sine (argument in radians)
    Sin(Box<Expr>),
    /// Cosine (argument in radians)
    Cos(Box<Expr>),
    /// Tangent (argument in radians)
    Tan(Box<Expr>),
}

impl Expr {
    /// Evaluates the expression with the bound variable set to `x`.
    ///
    /// # Errors
    /// Returns [`InvalidExpression`] on a real-domain violation:
    /// `log` of a non-positive argument, `sqrt` of a negative argument,
    /// division by an exact zero, or a fractional power of a negative base.
    pub fn eval(&self, x: f64) -> Result<f64, InvalidExpression> {
        match self {
            Expr::Const(val) => Ok(*val),
            Expr::Var => Ok(x),
            Expr::Add(left, right) => Ok(left.eval(x)? + right.eval(x)?),
            Expr::Sub(left, right) => Ok(left.eval(x)? - right.eval(x)?),
            Expr::Mul(left, right) => Ok(left.eval(x)? * right.eval(x)?),
            Expr::Div(left, right) => {
                let denominator = right.eval(x)?;
                if denominator == 0.0 {
                    return Err(InvalidExpression::DivisionByZero);
                }
                Ok(left.eval(x)? / denominator)
            }
            Expr::Neg(inner) => Ok(-inner.eval(x)?),
            Expr::Pow(base, exp) => Ok(base.eval(x)?.powi(*exp as i32)),
            Expr::PowFloat(base, exp) => checked_pow(base.eval(x)?, *exp),
            Expr::PowExpr(base, exp) => checked_pow(base.eval(x)?, exp.eval(x)?),
            Expr::Exp(inner) => Ok(inner.eval(x)?.exp()),
            Expr::Ln(inner) => {
                let arg = inner.eval(x)?;
                if arg <= 0.0 {
                    return Err(InvalidExpression::LogDomain { arg });
                }
                Ok(arg.ln())
            }
            Expr::Sqrt(inner) => {
                let arg = inner.eval(x)?;
                if arg < 0.0 {
                    return Err(InvalidExpression::SqrtDomain { arg });
                }
                Ok(arg.sqrt())
            }
            Expr::Sin(inner) => Ok(inner.eval(x)?.sin()),
            Expr::Cos(inner) => Ok(inner.eval(x)?.cos()),
            Expr::Tan(inner) => Ok(inner.eval(x)?.tan()),
        }
    }
}

/// Power with a real exponent. A negative base with a non-integer exponent
/// has no real result and is a domain error rather than NaN.
fn checked_pow(base: f64, exponent: f64) -> Result<f64, InvalidExpression> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(InvalidExpression::PowDomain { base, exponent });
    }
    Ok(base.powf(exponent))
}
