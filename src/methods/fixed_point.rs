//! Fixed-point iteration `x = g(x)`.

use crate::errors::{InvalidExpression, SolveError};
use crate::formula::Formula;
use crate::methods::{run, Step, StepOutcome};
use crate::report::{IterationRecord, MethodKind, SolveResult};

/// Iterates `x_next = g(x)` from `x0` until the step shrinks below `tol`.
///
/// The formula is interpreted as the iteration function g(x), not as a
/// function whose zero is sought: a solution is a fixed point `x = g(x)`.
/// Consequently the only convergence test is the step difference
/// `|x_next - x| < tol`; there is no independent function value to test.
///
/// # Errors
/// * [`SolveError::InvalidTolerance`] / [`SolveError::InvalidMaxIter`] on
///   bad configuration
/// * [`SolveError::Expression`] if the formula fails to parse or evaluate
///
/// # Note
/// The iteration diverges whenever `|g'(x)| >= 1` near the fixed point.
/// Divergence is not detected explicitly; the solve runs to its iteration
/// cap and reports `converged = false`.
pub fn solve_fixed_point(
    formula: &str,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<SolveResult, SolveError> {
    run(MethodKind::FixedPoint, tol, max_iter, || {
        Ok(FixedPoint {
            g: Formula::new(formula)?,
            x: x0,
            tol,
        })
    })
}

struct FixedPoint {
    g: Formula,
    x: f64,
    tol: f64,
}

impl Step for FixedPoint {
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression> {
        let g_x = self.g.eval(self.x)?;
        let x_next = g_x;
        let error = (x_next - self.x).abs();

        let record = IterationRecord::FixedPoint {
            iteration,
            x: self.x,
            g_x,
            x_next,
            error,
        };
        let converged = error < self.tol;

        self.x = x_next;

        Ok(StepOutcome::Pass {
            record,
            error,
            root: converged.then_some(x_next),
        })
    }

    fn best(&self) -> f64 {
        self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Termination;

    #[test]
    fn test_cosine_fixed_point() {
        let result = solve_fixed_point("cos(x)", 0.5, 1e-6, 100).unwrap();
        assert!(result.converged);
        assert!((result.root - 0.7390851332151607).abs() < 1e-5);
    }

    #[test]
    fn test_linear_contraction() {
        // g(x) = x/2 + 1 contracts to the fixed point 2
        let result = solve_fixed_point("x/2 + 1", 0.0, 1e-8, 60).unwrap();
        assert!(result.converged);
        assert!((result.root - 2.0).abs() < 1e-7);
    }

    #[test]
    fn test_divergent_iteration_exhausts() {
        // |g'(x)| > 1 for any positive x, so the iterates blow up; the
        // intermediate overflow to infinity must not abort the solve
        let result = solve_fixed_point("2^x", 1.0, 1e-6, 30).unwrap();
        assert!(!result.converged);
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.iterations.len(), 30);
    }

    #[test]
    fn test_step_difference_is_the_only_test() {
        // g(x) = x + 0.5: every g(x) is far from zero, but the step is
        // constant, so the solve must exhaust rather than converge
        let result = solve_fixed_point("x + 0.5", 0.0, 0.4, 10).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations.len(), 10);
    }
}
