use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Instant;

use RustedPartials::calculator::derivative_presenter::compute_all;
use RustedPartials::calculator::expression_analyzer::extract_variables;
use RustedPartials::calculator::session::CalculatorSession;
use RustedPartials::symbolic::symbolic_traits::NativeEngine;

const EXPRESSIONS: [&str; 3] = [
    "x^2 + y",
    "sin(x*y) + cos(y*z) / sqrt(x + z)",
    "x^y * log(x + y^2) - tan(3*x*z)^2 + e^(x*y*z)",
];

fn bench_compute_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse and differentiate");
    for (i, text) in EXPRESSIONS.iter().enumerate() {
        let variables = extract_variables(text);
        group.bench_function(format!("expression {}", i), |b| {
            b.iter(|| compute_all(&NativeEngine, black_box(text), &variables))
        });
    }
    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut session = CalculatorSession::default();
    session.type_text(EXPRESSIONS[2]);
    c.bench_function("session submit", |b| {
        b.iter(|| session.submit(black_box(Instant::now())))
    });
}

criterion_group!(benches, bench_compute_all, bench_submit);
criterion_main!(benches);
