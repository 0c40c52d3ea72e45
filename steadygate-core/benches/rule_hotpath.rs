use criterion::{black_box, criterion_group, criterion_main, Criterion};
use steadygate_core::RuleSet;

fn bench_production_rules(c: &mut Criterion) {
    let rules = RuleSet::production();

    c.bench_function("identifier_accept", |b| {
        b.iter(|| rules.identifier.evaluate(black_box(Some("Stephen John Limb"))))
    });

    c.bench_function("identifier_reject_punctuation", |b| {
        b.iter(|| rules.identifier.evaluate(black_box(Some("@StephenLimb"))))
    });

    c.bench_function("email_accept", |b| {
        b.iter(|| rules.email.evaluate(black_box(Some("abc.def@mail-archive.com"))))
    });

    c.bench_function("email_reject", |b| {
        b.iter(|| rules.email.evaluate(black_box(Some("abc..def@mail.com"))))
    });
}

criterion_group!(benches, bench_production_rules);
criterion_main!(benches);
