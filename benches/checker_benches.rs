use criterion::{criterion_group, criterion_main, Criterion};
use MathCheck::checker::compare::check_answer_equivalence;

fn bench_text_fast_path(c: &mut Criterion) {
    c.bench_function("exact text match", |b| {
        b.iter(|| check_answer_equivalence("42", "42"))
    });
}

fn bench_latex_fraction(c: &mut Criterion) {
    c.bench_function("LaTeX fraction vs plain", |b| {
        b.iter(|| check_answer_equivalence("\\frac{3}{4}", "3/4"))
    });
}

fn bench_symbolic_comparison(c: &mut Criterion) {
    c.bench_function("commutative polynomial", |b| {
        b.iter(|| check_answer_equivalence("x^2 + 2*x + 1", "1 + 2*x + x^2"))
    });
}

criterion_group!(
    benches,
    bench_text_fast_path,
    bench_latex_fraction,
    bench_symbolic_comparison
);
criterion_main!(benches);
