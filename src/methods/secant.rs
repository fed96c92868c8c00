//! Secant method from two initial estimates; no bracket required.

use crate::errors::{InvalidExpression, SolveError};
use crate::formula::Formula;
use crate::methods::{run, Step, StepOutcome, SINGULAR_THRESHOLD};
use crate::report::{IterationRecord, MethodKind, SolveResult};

/// Finds a root of `formula` by secant iteration from `x0` and `x1`.
///
/// Each pass computes `x2 = x1 - f(x1)*(x1 - x0) / (f(x1) - f(x0))`.
/// Convergence when `|f(x2)| < tol` or `|x2 - x1| < tol`.
///
/// # Errors
/// * [`SolveError::InvalidTolerance`] / [`SolveError::InvalidMaxIter`] on
///   bad configuration
/// * [`SolveError::Expression`] if the formula fails to parse or evaluate
///
/// # Note
/// When `|f(x1) - f(x0)|` falls below `1e-12` the update is undefined and
/// the method halts with
/// [`Termination::DegenerateStep`](crate::report::Termination), keeping
/// the current estimate. Convergence is superlinear (~1.618) near a simple
/// root.
pub fn solve_secant(
    formula: &str,
    x0: f64,
    x1: f64,
    tol: f64,
    max_iter: usize,
) -> Result<SolveResult, SolveError> {
    run(MethodKind::Secant, tol, max_iter, || {
        Ok(Secant {
            f: Formula::new(formula)?,
            x0,
            x1,
            tol,
        })
    })
}

struct Secant {
    f: Formula,
    x0: f64,
    x1: f64,
    tol: f64,
}

impl Step for Secant {
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression> {
        let f0 = self.f.eval(self.x0)?;
        let f1 = self.f.eval(self.x1)?;

        if (f1 - f0).abs() < SINGULAR_THRESHOLD {
            return Ok(StepOutcome::Degenerate);
        }

        let x2 = self.x1 - f1 * (self.x1 - self.x0) / (f1 - f0);
        let f_x2 = self.f.eval(x2)?;
        let error = (x2 - self.x1).abs();

        let record = IterationRecord::Secant {
            iteration,
            x0: self.x0,
            x1: self.x1,
            x2,
            f_x2,
            error,
        };
        let converged = f_x2.abs() < self.tol || error < self.tol;

        self.x0 = self.x1;
        self.x1 = x2;

        Ok(StepOutcome::Pass {
            record,
            error,
            root: converged.then_some(x2),
        })
    }

    fn best(&self) -> f64 {
        self.x1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Termination;

    #[test]
    fn test_parabola() {
        let result = solve_secant("x^2 - 4", 1.0, 3.0, 1e-10, 50).unwrap();
        assert!(result.converged);
        assert!((result.root - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_constant_function_degenerates() {
        // f has no root and no slope; the very first update divides by zero
        let result = solve_secant("5", 0.0, 1.0, 1e-6, 50).unwrap();
        assert!(!result.converged);
        assert_eq!(result.termination, Termination::DegenerateStep);
        assert_eq!(result.root, 1.0);
        assert!(result.iterations.is_empty());
    }

    #[test]
    fn test_cubic() {
        let result = solve_secant("x**3 - x - 2", 1.0, 2.0, 1e-8, 50).unwrap();
        assert!(result.converged);
        assert!((result.root - 1.5213797).abs() < 1e-6);
    }
}
