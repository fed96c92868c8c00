//! Formula compilation, evaluation, and numerical differentiation.
//!
//! This module provides the core [`Formula`] type which represents a
//! single-variable mathematical expression over the bound variable `x`.
//! A formula is compiled on creation: the text is parsed by evalexpr and
//! converted into the crate's closed [`Expr`](crate::expr::Expr) tree, so
//! every later evaluation is a plain tree walk with no user text involved.
//!
//! # Example
//!
//! ```
//! use zof::Formula;
//!
//! let f = Formula::new("x^3 - x - 2").unwrap();
//! assert_eq!(f.eval(2.0).unwrap(), 4.0);
//! ```
//!
//! Derivatives are numerical only, by central difference with a fixed step.
//! One-shot helpers [`evaluate`] and [`derivative`] compile, evaluate, and
//! discard a formula in a single call for callers that hold only the text.

use evalexpr::build_operator_tree;

use crate::convert::build_ast;
use crate::errors::InvalidExpression;
use crate::expr::Expr;

/// Central-difference step. Fixed by design; callers needing a different
/// accuracy/step tradeoff are outside this crate's scope.
const H: f64 = 1e-7;

/// A compiled single-variable formula.
///
/// Holds the original text and the converted expression tree. The symbol
/// set is closed: the variable `x`, the constants `pi` and `e`, the unary
/// functions `sin`, `cos`, `tan`, `exp`, `log`, `sqrt`, numeric literals,
/// and the operators `+ - * / ^`. Both `^` and `**` denote exponentiation;
/// `**` is normalized to `^` before parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    text: String,
    ast: Expr,
}

impl Formula {
    /// Compiles a formula from its textual form.
    ///
    /// # Arguments
    /// * `text` - The formula as written by the user (e.g. `"x^3 - x - 2"`)
    ///
    /// # Returns
    /// * `Result<Self, InvalidExpression>` - The compiled formula or an error
    ///
    /// # Example
    /// ```
    /// # use zof::Formula;
    /// let f = Formula::new("sin(x) - x/2").unwrap();
    /// assert!(f.eval(0.0).unwrap().abs() < 1e-15);
    /// ```
    ///
    /// # Errors
    /// Returns [`InvalidExpression`] if the text fails to parse or contains
    /// anything outside the allowed symbol set.
    pub fn new(text: &str) -> Result<Self, InvalidExpression> {
        // Normalize the `**` power notation to the parser's `^` operator.
        // This is the only textual rewriting performed.
        let normalized = text.replace("**", "^");
        let node = build_operator_tree(&normalized)?;
        let ast = build_ast(&node)?;
        Ok(Self {
            text: text.to_string(),
            ast,
        })
    }

    /// Evaluates the formula at the given value of `x`.
    ///
    /// # Errors
    /// Returns [`InvalidExpression`] on a real-domain violation at this
    /// particular `x` (e.g. `log` of a non-positive number).
    pub fn eval(&self, x: f64) -> Result<f64, InvalidExpression> {
        self.ast.eval(x)
    }

    /// Approximates the derivative at `x` by central difference,
    /// `(f(x+h) - f(x-h)) / (2h)` with fixed `h = 1e-7`.
    ///
    /// # Example
    /// ```
    /// # use zof::Formula;
    /// let f = Formula::new("x^2").unwrap();
    /// let df = f.derivative_at(3.0).unwrap();
    /// assert!((df - 6.0).abs() < 1e-5);
    /// ```
    ///
    /// # Errors
    /// Propagates evaluator failures from either sample point unchanged.
    pub fn derivative_at(&self, x: f64) -> Result<f64, InvalidExpression> {
        Ok((self.eval(x + H)? - self.eval(x - H)?) / (2.0 * H))
    }

    /// The formula text as supplied by the caller.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Compiles and evaluates a formula at `x` in one call.
///
/// The formula is compiled fresh on every call and discarded afterwards;
/// nothing is cached. Callers evaluating the same formula repeatedly should
/// build a [`Formula`] once instead.
///
/// # Example
/// ```
/// let y = zof::evaluate("x^2", 3.0).unwrap();
/// assert_eq!(y, 9.0);
/// ```
///
/// # Errors
/// Returns [`InvalidExpression`] for syntax errors, disallowed symbols, or
/// domain errors at this `x`.
pub fn evaluate(formula: &str, x: f64) -> Result<f64, InvalidExpression> {
    Formula::new(formula)?.eval(x)
}

/// Compiles a formula and approximates its derivative at `x` by central
/// difference with fixed `h = 1e-7`.
///
/// # Errors
/// Returns [`InvalidExpression`] for syntax errors, disallowed symbols, or
/// domain errors at either sample point.
pub fn derivative(formula: &str, x: f64) -> Result<f64, InvalidExpression> {
    Formula::new(formula)?.derivative_at(x)
}
