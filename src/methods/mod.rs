//! The six root-finding methods and their shared iteration driver.
//!
//! Each method lives in its own module and contributes three things: an
//! update rule, a convergence test, and (for the secant family and
//! Newton-Raphson) a degenerate-step guard. Everything else - argument
//! validation, the pass counter, the trace vector, and termination
//! classification - is owned by the [`run`] driver, so the per-method
//! table stays auditable in one place per method instead of six
//! copy-pasted loops.
//!
//! Driver policy, identical for all methods:
//!
//! - `tol` and `max_iter` are validated before the formula is even parsed.
//! - A pass records its [`IterationRecord`] *before* its convergence test,
//!   so the finished trace always shows the state that triggered (or
//!   failed to trigger) termination.
//! - A degenerate halt occurs before the pass records anything; the pass
//!   never completes.
//! - Exhausting `max_iter` is not an error: the result carries
//!   `converged = false` with the best estimate and the last error.

use crate::errors::{InvalidExpression, SolveError};
use crate::report::{IterationRecord, MethodKind, SolveResult, Termination};

pub mod bisection;
pub mod fixed_point;
pub mod modified_secant;
pub mod newton_raphson;
pub mod regula_falsi;
pub mod secant;

pub use bisection::solve_bisection;
pub use fixed_point::solve_fixed_point;
pub use modified_secant::solve_modified_secant;
pub use newton_raphson::solve_newton_raphson;
pub use regula_falsi::solve_regula_falsi;
pub use secant::solve_secant;

/// Threshold below which a denominator or derivative counts as zero.
pub(crate) const SINGULAR_THRESHOLD: f64 = 1e-12;

/// Outcome of one solver pass.
pub(crate) enum StepOutcome {
    /// The pass completed: its record, its error, and `Some(root)` when the
    /// method's convergence test passed.
    Pass {
        record: IterationRecord,
        error: f64,
        root: Option<f64>,
    },
    /// The update rule hit a near-zero denominator; halt with the current
    /// best estimate.
    Degenerate,
}

/// One iterative method: the update rule and convergence test, with the
/// loop bookkeeping factored out into [`run`].
pub(crate) trait Step {
    /// Runs one pass at the given 1-based iteration index.
    fn step(&mut self, iteration: usize) -> Result<StepOutcome, InvalidExpression>;

    /// The best root estimate available so far.
    fn best(&self) -> f64;
}

/// Drives a method to termination.
///
/// `build` parses the formula and constructs the method state; it runs
/// after configuration validation so bad `tol`/`max_iter` values are
/// rejected first. If a degenerate halt lands before any pass completes,
/// the result's error field is infinite - no error estimate exists yet.
pub(crate) fn run<S, F>(
    method: MethodKind,
    tol: f64,
    max_iter: usize,
    build: F,
) -> Result<SolveResult, SolveError>
where
    S: Step,
    F: FnOnce() -> Result<S, InvalidExpression>,
{
    if !(tol.is_finite() && tol > 0.0) {
        return Err(SolveError::InvalidTolerance { got: tol });
    }
    if max_iter == 0 {
        return Err(SolveError::InvalidMaxIter { got: max_iter });
    }

    let mut state = build()?;
    let mut records = Vec::new();
    let mut last_error = f64::INFINITY;

    for iteration in 1..=max_iter {
        match state.step(iteration)? {
            StepOutcome::Degenerate => {
                return Ok(SolveResult {
                    method,
                    root: state.best(),
                    error: last_error,
                    converged: false,
                    termination: Termination::DegenerateStep,
                    iterations: records,
                });
            }
            StepOutcome::Pass {
                record,
                error,
                root,
            } => {
                records.push(record);
                last_error = error;
                if let Some(root) = root {
                    return Ok(SolveResult {
                        method,
                        root,
                        error,
                        converged: true,
                        termination: Termination::Converged,
                        iterations: records,
                    });
                }
            }
        }
    }

    Ok(SolveResult {
        method,
        root: state.best(),
        error: last_error,
        converged: false,
        termination: Termination::IterationLimit,
        iterations: records,
    })
}
