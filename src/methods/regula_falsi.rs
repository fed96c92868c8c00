//! Regula falsi (false position): secant-style interpolation inside a
//! maintained bracket.

use crate::errors::{InvalidExpression, SolveError};
use crate::formula::Formula;
use crate::methods::{run, Step, StepOutcome};
use crate::report::{IterationRecord, MethodKind, SolveResult};

/// Finds a root of `formula` by false position over the bracket `[a, b]`.
///
/// Each pass interpolates `c = (a*f(b) - b*f(a)) / (f(b) - f(a))` and
/// narrows the bracket with the same replacement rule as bisection.
/// Convergence when `|f(c)| < tol` or the step `|c - c_prev| < tol`, with
/// `c_prev` starting at `a`.
///
/// # Errors
/// * [`SolveError::InvalidTolerance`] / [`SolveError::InvalidMaxIter`] on
///   bad configuration
/// * [`SolveError::Expression`] if the formula fails to parse or evaluate
///
/// # Note
/// Like bisection, the bracket is presumed to contain a sign change and is
/// not checked upfront.
pub fn solve_regula_falsi(
    formula: &str,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> Result<SolveResult, SolveError> {
    run(MethodKind::RegulaFalsi, tol, max_iter, || {
        Ok(RegulaFalsi {
            f: Formula::new(formula)?,
            a,
            b,
            c: a,
            c_prev: a,
            tol,
        })
    })
}

struct RegulaFalsi {
    f: Formula,
    a: f64,
    b: f64,
    c: f64,
    c_prev: f64,
    tol: f64,
}

impl Step for RegulaFalsi {
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression> {
        let f_a = self.f.eval(self.a)?;
        let f_b = self.f.eval(self.b)?;
        let c = (self.a * f_b - self.b * f_a) / (f_b - f_a);
        let f_c = self.f.eval(c)?;
        let error = (c - self.c_prev).abs();
        self.c = c;

        let record = IterationRecord::Bracket {
            iteration,
            a: self.a,
            b: self.b,
            c,
            f_c,
            error,
        };
        let converged = f_c.abs() < self.tol || error < self.tol;

        // Same replacement rule as bisection.
        if f_a * f_c < 0.0 {
            self.b = c;
        } else {
            self.a = c;
        }
        self.c_prev = c;

        Ok(StepOutcome::Pass {
            record,
            error,
            root: converged.then_some(c),
        })
    }

    fn best(&self) -> f64 {
        self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Termination;

    #[test]
    fn test_cubic_scenario() {
        let result = solve_regula_falsi("x^3 - x - 2", 1.0, 2.0, 1e-6, 100).unwrap();
        assert!(result.converged);
        assert_eq!(result.termination, Termination::Converged);
        assert!((result.root - 1.5213797).abs() < 1e-5);
    }

    #[test]
    fn test_first_step_error_measured_from_a() {
        // f(1) = -2, f(2) = 4, so c1 = (1*4 - 2*(-2)) / 6 = 4/3
        let result = solve_regula_falsi("x^3 - x - 2", 1.0, 2.0, 1e-6, 100).unwrap();
        let first = &result.iterations[0];
        assert!((first.estimate() - 4.0 / 3.0).abs() < 1e-12);
        assert!((first.error() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_root() {
        let result = solve_regula_falsi("exp(x) - 3", 0.0, 2.0, 1e-8, 100).unwrap();
        assert!(result.converged);
        assert!((result.root - 3f64.ln()).abs() < 1e-6);
    }
}
