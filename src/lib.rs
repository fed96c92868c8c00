//! Root finding for user-supplied formulas, with full iteration traces.
//!
//! This crate finds a zero-crossing of a single-variable real function
//! using one of six classical iterative methods: bisection, regula falsi,
//! secant, Newton-Raphson, fixed-point iteration, and modified secant.
//! The function is supplied as text over a fixed, safe symbol set (the
//! variable `x`, the constants `pi` and `e`, and the functions `sin`,
//! `cos`, `tan`, `exp`, `log`, `sqrt`); it is parsed into a closed
//! expression tree and never executed as code.
//!
//! # Features
//!
//! - Restricted formula evaluator with structured errors for syntax,
//!   symbol, and domain failures
//! - Central-difference numerical differentiation
//! - Six solvers sharing one driver, each returning the complete pass-by-
//!   pass trace alongside the root estimate
//! - Three-way termination reporting: converged, degenerate step, or
//!   iteration limit
//!
//! # Example
//!
//! ```rust
//! use zof::{solve_bisection, Termination};
//!
//! let result = solve_bisection("x^3 - x - 2", 1.0, 2.0, 1e-6, 50).unwrap();
//! assert_eq!(result.termination, Termination::Converged);
//! assert!((result.root - 1.5213797).abs() < 1e-6);
//!
//! // every pass is recorded
//! for record in &result.iterations {
//!     println!("{record}");
//! }
//! ```

pub use errors::{ConvertError, InvalidExpression, SolveError, UnknownMethod};
pub use formula::{derivative, evaluate, Formula};
pub use methods::{
    solve_bisection, solve_fixed_point, solve_modified_secant, solve_newton_raphson,
    solve_regula_falsi, solve_secant,
};
pub use report::{IterationRecord, MethodKind, SolveResult, Termination};

pub mod prelude {
    pub use crate::errors::{InvalidExpression, SolveError};
    pub use crate::formula::{derivative, evaluate, Formula};
    pub use crate::methods::{
        solve_bisection, solve_fixed_point, solve_modified_secant, solve_newton_raphson,
        solve_regula_falsi, solve_secant,
    };
    pub use crate::report::{IterationRecord, MethodKind, SolveResult, Termination};
}

/// Conversion from parsed operator trees to the internal AST
pub mod convert;
/// Error types for the various failure modes
pub mod errors;
/// Expression tree representation and evaluation
pub mod expr;
/// Formula compilation, evaluation, and numerical differentiation
pub mod formula;
/// The six solver methods and their shared driver
pub mod methods;
/// Iteration records, termination reasons, and solve results
pub mod report;
