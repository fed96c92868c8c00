//! Error types for the zof crate.
//!
//! This module defines the failure modes of formula handling and solving:
//!
//! - `ConvertError`: the parsed operator tree contains something outside the
//!   allowed symbol set
//! - `InvalidExpression`: a formula fails to parse, convert, or evaluate
//!   within its real domain
//! - `SolveError`: a solve call fails before or during iteration
//!
//! Degenerate iteration steps (near-zero denominators, vanishing
//! derivatives) are deliberately *not* errors; a solver halts and reports
//! them through [`Termination::DegenerateStep`](crate::report::Termination).

use evalexpr::{DefaultNumericTypes, EvalexprError};
use thiserror::Error;

/// Errors raised while converting a parsed operator tree into the internal
/// expression representation.
///
/// The conversion enforces the closed symbol set: the variable `x`, the
/// constants `pi` and `e`, and the unary functions `sin`, `cos`, `tan`,
/// `exp`, `log`, `sqrt`. Anything else in the tree is rejected here.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An identifier other than `x`, `pi`, or `e`
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
    /// A function call outside the whitelist
    #[error("unsupported function: {0}")]
    UnsupportedFunction(String),
    /// An operator with no arithmetic meaning (assignment, comparison,
    /// logic, tuples, statement chains, ...)
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),
    /// A literal that is not an integer or float
    #[error("expected numeric constant, got {0}")]
    NonNumericConstant(String),
    /// A whitelisted function applied to anything but a single argument
    #[error("function {0} expects exactly one argument")]
    MalformedCall(String),
    /// The tree root does not hold exactly one expression
    #[error("expected a single expression")]
    NotAnExpression,
}

/// Errors raised when a formula fails to parse or to produce a real value.
///
/// This is the evaluator's single caller-facing error kind: syntax errors,
/// disallowed symbols, and real-domain violations all surface here. A
/// domain failure is always reported, never coerced to a default value,
/// since a silent NaN would corrupt downstream convergence tests.
#[derive(Debug, Error)]
pub enum InvalidExpression {
    /// The formula text failed to parse
    #[error("failed to parse formula")]
    Parse(#[from] EvalexprError<DefaultNumericTypes>),
    /// The parsed tree contains a construct outside the allowed symbol set
    #[error("formula rejected")]
    Convert(#[from] ConvertError),
    /// `log` applied to a non-positive argument
    #[error("log of non-positive value {arg}")]
    LogDomain { arg: f64 },
    /// `sqrt` applied to a negative argument
    #[error("square root of negative value {arg}")]
    SqrtDomain { arg: f64 },
    /// A fractional power of a negative base
    #[error("non-integer power of negative base: {base}^{exponent}")]
    PowDomain { base: f64, exponent: f64 },
    /// Division by an exact zero inside the formula
    #[error("division by zero in formula")]
    DivisionByZero,
}

/// A method name that matches none of the six supported solvers.
#[derive(Debug, Error)]
#[error("unknown method: {0}")]
pub struct UnknownMethod(pub String);

/// Errors raised by the `solve_*` entry points.
///
/// Configuration variants are rejected before the first iteration;
/// expression failures can also occur mid-iteration, in which case the
/// partial trace is dropped and the error returned instead.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The formula failed to parse or evaluate
    #[error(transparent)]
    Expression(#[from] InvalidExpression),
    /// `tol` must be finite and strictly positive
    #[error("invalid tolerance: must be finite and > 0, got {got}")]
    InvalidTolerance { got: f64 },
    /// `max_iter` must be at least 1
    #[error("invalid max_iter: must be >= 1, got {got}")]
    InvalidMaxIter { got: usize },
}
