//! Bisection method over a bracket presumed to contain a sign change.

use crate::errors::{InvalidExpression, SolveError};
use crate::formula::Formula;
use crate::methods::{run, Step, StepOutcome};
use crate::report::{IterationRecord, MethodKind, SolveResult};

/// Finds a root of `formula` by repeated bracket halving.
///
/// # Arguments
/// * `formula` - The function f(x) as text
/// * `a` - Left bracket endpoint
/// * `b` - Right bracket endpoint
/// * `tol` - Convergence tolerance, finite and > 0
/// * `max_iter` - Iteration cap, >= 1
///
/// # Returns
/// A [`SolveResult`] with one bracket record per pass. Convergence when
/// `|f(c)| < tol` or the half-width `(b-a)/2 < tol`.
///
/// # Errors
/// * [`SolveError::InvalidTolerance`] / [`SolveError::InvalidMaxIter`] on
///   bad configuration
/// * [`SolveError::Expression`] if the formula fails to parse or evaluate
///
/// # Note
/// The bracket is presumed to contain a sign change; it is not checked
/// upfront. A same-sign bracket exhausts its iterations rather than error.
/// Convergence is linear but unconditional on a valid bracket.
pub fn solve_bisection(
    formula: &str,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> Result<SolveResult, SolveError> {
    run(MethodKind::Bisection, tol, max_iter, || {
        Ok(Bisection {
            f: Formula::new(formula)?,
            a,
            b,
            c: (a + b) / 2.0,
            tol,
        })
    })
}

struct Bisection {
    f: Formula,
    a: f64,
    b: f64,
    c: f64,
    tol: f64,
}

impl Step for Bisection {
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression> {
        let c = (self.a + self.b) / 2.0;
        let f_c = self.f.eval(c)?;
        let f_a = self.f.eval(self.a)?;
        let error = (self.b - self.a).abs() / 2.0;
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

        // Sign change in [a, c] moves b; otherwise the root is in [c, b].
        if f_a * f_c < 0.0 {
            self.b = c;
        } else {
            self.a = c;
        }

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
        let result = solve_bisection("x**3 - x - 2", 1.0, 2.0, 1e-6, 50).unwrap();
        assert!(result.converged);
        assert_eq!(result.termination, Termination::Converged);
        assert!((result.root - 1.5213797).abs() < 1e-6);
        assert!(!result.iterations.is_empty());
    }

    #[test]
    fn test_negative_root() {
        let result = solve_bisection("x^2 - 4", -3.0, -1.0, 1e-8, 60).unwrap();
        assert!(result.converged);
        assert!((result.root + 2.0).abs() < 1e-7);
    }

    #[test]
    fn test_trigonometric_root() {
        let result = solve_bisection("sin(x)", 2.0, 4.0, 1e-9, 60).unwrap();
        assert!((result.root - std::f64::consts::PI).abs() < 1e-8);
    }

    #[test]
    fn test_final_record_triggers_convergence() {
        let result = solve_bisection("x^3 - x - 2", 1.0, 2.0, 1e-6, 50).unwrap();
        let last = result.iterations.last().unwrap();
        assert!(last.value().abs() < 1e-6 || last.error() < 1e-6);
    }

    #[test]
    fn test_exhaustion_reports_best_estimate() {
        // two passes cannot reach 1e-12 on a unit bracket
        let result = solve_bisection("x^3 - x - 2", 1.0, 2.0, 1e-12, 2).unwrap();
        assert!(!result.converged);
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.iterations.len(), 2);
        assert!(result.root.is_finite());
    }
}
