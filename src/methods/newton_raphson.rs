//! Newton-Raphson iteration with a numerical derivative.

use crate::errors::{InvalidExpression, SolveError};
use crate::formula::Formula;
use crate::methods::{run, Step, StepOutcome, SINGULAR_THRESHOLD};
use crate::report::{IterationRecord, MethodKind, SolveResult};

/// Finds a root of `formula` by Newton-Raphson iteration from `x0`.
///
/// # Arguments
/// * `formula` - The function f(x) as text
/// * `x0` - Initial guess
/// * `tol` - Convergence tolerance, finite and > 0
/// * `max_iter` - Iteration cap, >= 1
///
/// # Returns
/// A [`SolveResult`] recording `x`, `f(x)`, `f'(x)`, and the updated
/// estimate per pass. The derivative is the central difference
/// `(f(x+h) - f(x-h)) / (2h)` with fixed `h = 1e-7`; there is no symbolic
/// differentiation. Convergence when `|f(x)| < tol` or
/// `|x_new - x| < tol`.
///
/// # Errors
/// * [`SolveError::InvalidTolerance`] / [`SolveError::InvalidMaxIter`] on
///   bad configuration
/// * [`SolveError::Expression`] if the formula fails to parse or evaluate
///   (the derivative samples `x - h` and `x + h`, which can leave the
///   formula's domain even when `x` itself is inside it)
///
/// # Note
/// A derivative magnitude below `1e-12` halts the method with
/// [`Termination::DegenerateStep`](crate::report::Termination) and the
/// current estimate. Convergence is quadratic near a simple root but the
/// iteration may diverge from a poor `x0`.
pub fn solve_newton_raphson(
    formula: &str,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<SolveResult, SolveError> {
    run(MethodKind::NewtonRaphson, tol, max_iter, || {
        Ok(NewtonRaphson {
            f: Formula::new(formula)?,
            x: x0,
            tol,
        })
    })
}

struct NewtonRaphson {
    f: Formula,
    x: f64,
    tol: f64,
}

impl Step for NewtonRaphson {
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression> {
        let f_x = self.f.eval(self.x)?;
        let df_x = self.f.derivative_at(self.x)?;

        if df_x.abs() < SINGULAR_THRESHOLD {
            return Ok(StepOutcome::Degenerate);
        }

        let x_next = self.x - f_x / df_x;
        let error = (x_next - self.x).abs();

        let record = IterationRecord::Newton {
            iteration,
            x: self.x,
            f_x,
            df_x,
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
