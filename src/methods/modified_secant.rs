//! Modified secant method: a one-point secant with a proportional
//! perturbation instead of a second estimate.

use crate::errors::{InvalidExpression, SolveError};
use crate::formula::Formula;
use crate::methods::{run, Step, StepOutcome, SINGULAR_THRESHOLD};
use crate::report::{IterationRecord, MethodKind, SolveResult};

/// Finds a root of `formula` from `x0` using a perturbed secant slope.
///
/// Each pass samples `f(x)` and `f(x + delta*x)` and updates
/// `x_next = x - f(x)*delta*x / (f(x + delta*x) - f(x))`. Convergence when
/// `|f(x)| < tol` or `|x_next - x| < tol`.
///
/// Precondition: `x0 != 0`. The perturbation is proportional to `x`, so a
/// zero guess collapses it to nothing; the call is not rejected, but its
/// first denominator is zero and the method halts immediately with
/// [`Termination::DegenerateStep`](crate::report::Termination).
///
/// # Errors
/// * [`SolveError::InvalidTolerance`] / [`SolveError::InvalidMaxIter`] on
///   bad configuration
/// * [`SolveError::Expression`] if the formula fails to parse or evaluate
///
/// # Note
/// A denominator magnitude below `1e-12` halts the method with the current
/// estimate. `delta` around `0.01` is a common choice.
pub fn solve_modified_secant(
    formula: &str,
    x0: f64,
    delta: f64,
    tol: f64,
    max_iter: usize,
) -> Result<SolveResult, SolveError> {
    run(MethodKind::ModifiedSecant, tol, max_iter, || {
        Ok(ModifiedSecant {
            f: Formula::new(formula)?,
            x: x0,
            delta,
            tol,
        })
    })
}

struct ModifiedSecant {
    f: Formula,
    x: f64,
    delta: f64,
    tol: f64,
}

impl Step for ModifiedSecant {
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression> {
        let f_x = self.f.eval(self.x)?;
        let f_x_shifted = self.f.eval(self.x + self.delta * self.x)?;
        let denominator = f_x_shifted - f_x;

        if denominator.abs() < SINGULAR_THRESHOLD {
            return Ok(StepOutcome::Degenerate);
        }

        let x_next = self.x - f_x * self.delta * self.x / denominator;
        let error = (x_next - self.x).abs();

        let record = IterationRecord::ModifiedSecant {
            iteration,
            x: self.x,
            f_x,
            f_x_shifted,
            x_next,
            error,
        };
        let converged = f_x.abs() < self.tol || error < self.tol;

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
    fn test_square_root_of_two() {
        let result = solve_modified_secant("x^2 - 2", 1.0, 0.01, 1e-8, 50).unwrap();
        assert!(result.converged);
        assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_constant_function_degenerates() {
        let result = solve_modified_secant("3", 1.0, 0.01, 1e-6, 50).unwrap();
        assert!(!result.converged);
        assert_eq!(result.termination, Termination::DegenerateStep);
        assert_eq!(result.root, 1.0);
    }

    #[test]
    fn test_zero_guess_degenerates_immediately() {
        // the perturbation delta*x collapses at x = 0
        let result = solve_modified_secant("x^2 - 2", 0.0, 0.01, 1e-6, 50).unwrap();
        assert!(!result.converged);
        assert_eq!(result.termination, Termination::DegenerateStep);
        assert!(result.iterations.is_empty());
    }

    #[test]
    fn test_cubic() {
        let result = solve_modified_secant("x^3 - x - 2", 1.5, 0.01, 1e-8, 50).unwrap();
        assert!(result.converged);
        assert!((result.root - 1.5213797).abs() < 1e-6);
    }
}
