//! Solver and evaluator benchmarks.
//!
//! Two groups:
//!
//! 1. `formula_eval` compares evaluating a compiled [`Formula`] against a
//!    hand-written Rust closure for the same function, which bounds the
//!    interpretation overhead of the expression tree.
//! 2. `solvers` runs each of the six methods end to end on a cubic with a
//!    known root, measuring a whole solve including trace construction.
//!
//! Run with: `cargo bench --bench solvers`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use zof::{
    solve_bisection, solve_fixed_point, solve_modified_secant, solve_newton_raphson,
    solve_regula_falsi, solve_secant, Formula,
};

const CUBIC: &str = "x^3 - x - 2";

fn direct_cubic(x: f64) -> f64 {
    x * x * x - x - 2.0
}

fn benchmark_formula_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula_eval");
    let f = Formula::new(CUBIC).unwrap();

    group.bench_function("compiled_formula", |bench| {
        bench.iter(|| f.eval(black_box(1.5)).unwrap())
    });
    group.bench_function("direct_rust", |bench| {
        bench.iter(|| direct_cubic(black_box(1.5)))
    });
    group.bench_function("compile_and_eval", |bench| {
        bench.iter(|| zof::evaluate(black_box(CUBIC), black_box(1.5)).unwrap())
    });

    group.finish();
}

fn benchmark_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solvers");

    group.bench_function("bisection", |bench| {
        bench.iter(|| solve_bisection(black_box(CUBIC), 1.0, 2.0, 1e-10, 100).unwrap())
    });
    group.bench_function("regula_falsi", |bench| {
        bench.iter(|| solve_regula_falsi(black_box(CUBIC), 1.0, 2.0, 1e-10, 100).unwrap())
    });
    group.bench_function("secant", |bench| {
        bench.iter(|| solve_secant(black_box(CUBIC), 1.0, 2.0, 1e-10, 100).unwrap())
    });
    group.bench_function("newton_raphson", |bench| {
        bench.iter(|| solve_newton_raphson(black_box(CUBIC), 1.5, 1e-10, 100).unwrap())
    });
    group.bench_function("fixed_point", |bench| {
        // x = (x + 2)^(1/3) is the contraction form of the same cubic
        bench.iter(|| solve_fixed_point(black_box("(x + 2)^(1/3)"), 1.5, 1e-10, 100).unwrap())
    });
    group.bench_function("modified_secant", |bench| {
        bench.iter(|| solve_modified_secant(black_box(CUBIC), 1.5, 0.01, 1e-10, 100).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_formula_eval, benchmark_solvers);
criterion_main!(benches);
