//! The iteration trace and solve result model shared by all six methods.
//!
//! Every solver produces the same terminal shape: a [`SolveResult`] holding
//! the method identifier, the ordered sequence of [`IterationRecord`]s, the
//! best root estimate, the final error magnitude, and a three-way
//! [`Termination`] telling the caller *why* the iteration stopped. Front
//! ends are expected to distinguish all three outcomes rather than collapse
//! them into one message; the information is already computed here.
//!
//! `Display` renders the classic fixed-width iteration table, one row per
//! record, so a terminal front end only has to print the value. With the
//! `serde` feature enabled the whole model serializes directly for JSON
//! front ends.

use std::fmt;
use std::str::FromStr;

use colored::Colorize;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::UnknownMethod;

/// The six supported root-finding methods, named as front ends dispatch
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MethodKind {
    Bisection,
    RegulaFalsi,
    Secant,
    NewtonRaphson,
    FixedPoint,
    ModifiedSecant,
}

impl MethodKind {
    /// The wire name of the method (e.g. `"regula_falsi"`).
    pub const fn name(self) -> &'static str {
        match self {
            MethodKind::Bisection => "bisection",
            MethodKind::RegulaFalsi => "regula_falsi",
            MethodKind::Secant => "secant",
            MethodKind::NewtonRaphson => "newton_raphson",
            MethodKind::FixedPoint => "fixed_point",
            MethodKind::ModifiedSecant => "modified_secant",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MethodKind {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bisection" => Ok(MethodKind::Bisection),
            "regula_falsi" => Ok(MethodKind::RegulaFalsi),
            "secant" => Ok(MethodKind::Secant),
            "newton_raphson" => Ok(MethodKind::NewtonRaphson),
            "fixed_point" => Ok(MethodKind::FixedPoint),
            "modified_secant" => Ok(MethodKind::ModifiedSecant),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// The method's convergence test was satisfied
    Converged,
    /// A near-zero denominator or derivative halted the method early;
    /// the result carries the best estimate reached so far
    DegenerateStep,
    /// `max_iter` passes ran without satisfying the convergence test
    IterationLimit,
}

/// One pass of a solver loop.
///
/// Field layouts follow the update formulas: bisection and regula falsi
/// share the bracket layout, the open methods record their own stencils.
/// Records are appended in iteration order, before the convergence test of
/// the pass they describe, so a finished trace always shows the state that
/// triggered (or failed to trigger) termination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum IterationRecord {
    /// Bisection / regula falsi pass over the bracket `[a, b]`
    Bracket {
        iteration: usize,
        a: f64,
        b: f64,
        c: f64,
        f_c: f64,
        error: f64,
    },
    /// Secant pass over the stencil `(x0, x1)`
    Secant {
        iteration: usize,
        x0: f64,
        x1: f64,
        x2: f64,
        f_x2: f64,
        error: f64,
    },
    /// Newton-Raphson pass at `x`
    Newton {
        iteration: usize,
        x: f64,
        f_x: f64,
        df_x: f64,
        x_next: f64,
        error: f64,
    },
    /// Fixed-point pass `x_next = g(x)`
    FixedPoint {
        iteration: usize,
        x: f64,
        g_x: f64,
        x_next: f64,
        error: f64,
    },
    /// Modified secant pass at `x` with perturbed sample `f(x + delta*x)`
    ModifiedSecant {
        iteration: usize,
        x: f64,
        f_x: f64,
        f_x_shifted: f64,
        x_next: f64,
        error: f64,
    },
}

impl IterationRecord {
    /// 1-based index of the pass.
    pub fn iteration(&self) -> usize {
        match *self {
            IterationRecord::Bracket { iteration, .. }
            | IterationRecord::Secant { iteration, .. }
            | IterationRecord::Newton { iteration, .. }
            | IterationRecord::FixedPoint { iteration, .. }
            | IterationRecord::ModifiedSecant { iteration, .. } => iteration,
        }
    }

    /// The newest root estimate produced by the pass.
    pub fn estimate(&self) -> f64 {
        match *self {
            IterationRecord::Bracket { c, .. } => c,
            IterationRecord::Secant { x2, .. } => x2,
            IterationRecord::Newton { x_next, .. } => x_next,
            IterationRecord::FixedPoint { x_next, .. } => x_next,
            IterationRecord::ModifiedSecant { x_next, .. } => x_next,
        }
    }

    /// The function value recorded by the pass - the quantity the method's
    /// convergence test inspects. For fixed-point iteration this is `g(x)`,
    /// which by construction equals the next estimate.
    pub fn value(&self) -> f64 {
        match *self {
            IterationRecord::Bracket { f_c, .. } => f_c,
            IterationRecord::Secant { f_x2, .. } => f_x2,
            IterationRecord::Newton { f_x, .. } => f_x,
            IterationRecord::FixedPoint { g_x, .. } => g_x,
            IterationRecord::ModifiedSecant { f_x, .. } => f_x,
        }
    }

    /// The estimated error for the pass.
    pub fn error(&self) -> f64 {
        match *self {
            IterationRecord::Bracket { error, .. }
            | IterationRecord::Secant { error, .. }
            | IterationRecord::Newton { error, .. }
            | IterationRecord::FixedPoint { error, .. }
            | IterationRecord::ModifiedSecant { error, .. } => error,
        }
    }
}

impl fmt::Display for IterationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            IterationRecord::Bracket {
                iteration,
                a,
                b,
                c,
                f_c,
                error,
            } => write!(
                f,
                "{:<6} {:<14.8} {:<14.8} {:<14.8} {:<14.6e} {:<14.6e}",
                iteration, a, b, c, f_c, error
            ),
            IterationRecord::Secant {
                iteration,
                x0,
                x1,
                x2,
                f_x2,
                error,
            } => write!(
                f,
                "{:<6} {:<14.8} {:<14.8} {:<14.8} {:<14.6e} {:<14.6e}",
                iteration, x0, x1, x2, f_x2, error
            ),
            IterationRecord::Newton {
                iteration,
                x,
                f_x,
                df_x,
                x_next,
                error,
            } => write!(
                f,
                "{:<6} {:<14.8} {:<14.6e} {:<14.6e} {:<14.8} {:<14.6e}",
                iteration, x, f_x, df_x, x_next, error
            ),
            IterationRecord::FixedPoint {
                iteration,
                x,
                g_x,
                x_next,
                error,
            } => write!(
                f,
                "{:<6} {:<14.8} {:<14.8} {:<14.8} {:<14.6e}",
                iteration, x, g_x, x_next, error
            ),
            IterationRecord::ModifiedSecant {
                iteration,
                x,
                f_x,
                f_x_shifted,
                x_next,
                error,
            } => write!(
                f,
                "{:<6} {:<14.8} {:<14.6e} {:<14.6e} {:<14.8} {:<14.6e}",
                iteration, x, f_x, f_x_shifted, x_next, error
            ),
        }
    }
}

/// Terminal result of one solve call.
///
/// `root` is the best available estimate even when the method did not
/// converge; `error` is the final error magnitude as defined by the
/// method's own error formula. `converged` always equals
/// `termination == Termination::Converged` and is kept as a plain field so
/// serialized results carry the flag directly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveResult {
    /// The method that produced this result
    pub method: MethodKind,
    /// Best root estimate
    pub root: f64,
    /// Final error magnitude
    pub error: f64,
    /// Whether the convergence test was satisfied
    pub converged: bool,
    /// Why the iteration stopped
    pub termination: Termination,
    /// The full ordered trace, one record per pass
    pub iterations: Vec<IterationRecord>,
}

impl SolveResult {
    /// Column header matching this result's record layout.
    fn table_header(&self) -> String {
        match self.method {
            MethodKind::Bisection | MethodKind::RegulaFalsi => format!(
                "{:<6} {:<14} {:<14} {:<14} {:<14} {:<14}",
                "Iter", "a", "b", "c", "f(c)", "Error"
            ),
            MethodKind::Secant => format!(
                "{:<6} {:<14} {:<14} {:<14} {:<14} {:<14}",
                "Iter", "x_n-1", "x_n", "x_n+1", "f(x_n+1)", "Error"
            ),
            MethodKind::NewtonRaphson => format!(
                "{:<6} {:<14} {:<14} {:<14} {:<14} {:<14}",
                "Iter", "x_n", "f(x_n)", "f'(x_n)", "x_n+1", "Error"
            ),
            MethodKind::FixedPoint => format!(
                "{:<6} {:<14} {:<14} {:<14} {:<14}",
                "Iter", "x_n", "g(x_n)", "x_n+1", "Error"
            ),
            MethodKind::ModifiedSecant => format!(
                "{:<6} {:<14} {:<14} {:<14} {:<14} {:<14}",
                "Iter", "x_n", "f(x_n)", "f(x_n+dx)", "x_n+1", "Error"
            ),
        }
    }
}

impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", "Method:".cyan(), self.method)?;
        let header = self.table_header();
        writeln!(f, "{}", header.cyan())?;
        writeln!(f, "{}", "-".repeat(header.len()))?;
        if !self.iterations.is_empty() {
            writeln!(f, "{}", self.iterations.iter().join("\n"))?;
        }
        match self.termination {
            Termination::Converged => {
                writeln!(f, "\n{} {:.8}", "Root found:".green(), self.root)?;
                writeln!(f, "Final error: {:.8e}", self.error)?;
                writeln!(f, "Iterations: {}", self.iterations.len())
            }
            Termination::DegenerateStep => {
                writeln!(
                    f,
                    "\n{} best estimate: {:.8}",
                    "Degenerate step encountered;".red(),
                    self.root
                )
            }
            Termination::IterationLimit => {
                writeln!(
                    f,
                    "\n{} approximate root: {:.8}",
                    "Max iterations reached;".yellow(),
                    self.root
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names_round_trip() {
        for method in [
            MethodKind::Bisection,
            MethodKind::RegulaFalsi,
            MethodKind::Secant,
            MethodKind::NewtonRaphson,
            MethodKind::FixedPoint,
            MethodKind::ModifiedSecant,
        ] {
            assert_eq!(method.name().parse::<MethodKind>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method_name() {
        assert!("brent".parse::<MethodKind>().is_err());
    }

    #[test]
    fn test_record_accessors() {
        let record = IterationRecord::Bracket {
            iteration: 3,
            a: 1.0,
            b: 2.0,
            c: 1.5,
            f_c: -0.25,
            error: 0.5,
        };
        assert_eq!(record.iteration(), 3);
        assert_eq!(record.estimate(), 1.5);
        assert_eq!(record.value(), -0.25);
        assert_eq!(record.error(), 0.5);
    }

    #[test]
    fn test_fixed_point_value_is_next_estimate() {
        let record = IterationRecord::FixedPoint {
            iteration: 1,
            x: 0.5,
            g_x: 0.87758,
            x_next: 0.87758,
            error: 0.37758,
        };
        assert_eq!(record.value(), record.estimate());
    }

    #[test]
    fn test_display_includes_every_row() {
        let result = SolveResult {
            method: MethodKind::Bisection,
            root: 1.5,
            error: 0.5,
            converged: false,
            termination: Termination::IterationLimit,
            iterations: vec![
                IterationRecord::Bracket {
                    iteration: 1,
                    a: 1.0,
                    b: 2.0,
                    c: 1.5,
                    f_c: -0.25,
                    error: 0.5,
                },
                IterationRecord::Bracket {
                    iteration: 2,
                    a: 1.5,
                    b: 2.0,
                    c: 1.75,
                    f_c: 0.3,
                    error: 0.25,
                },
            ],
        };
        let rendered = result.to_string();
        assert!(rendered.matches("1.50000000").count() >= 2);
        assert!(rendered.contains("Max iterations reached"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let result = SolveResult {
            method: MethodKind::Secant,
            root: 2.0,
            error: 1e-9,
            converged: true,
            termination: Termination::Converged,
            iterations: vec![IterationRecord::Secant {
                iteration: 1,
                x0: 1.0,
                x1: 3.0,
                x2: 2.0,
                f_x2: 0.0,
                error: 1.0,
            }],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"secant\""));
        let back: SolveResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
