//! Feedback evaluation and guess lookup over a realistic catalog size.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use uniguess::catalog::{Catalog, University};
use uniguess::game::feedback::Feedback;
use uniguess::game::round::{Round, RoundConfig};

fn bench_catalog(size: usize) -> Catalog {
    let tags = ["Private", "Public", "Research", "Urban", "Rural", "Large", "Small", "STEM"];
    let mut rng = rand::thread_rng();
    let universities = (0..size)
        .map(|i| {
            let picked: Vec<&str> = tags.iter().copied().filter(|_| rng.gen_bool(0.5)).collect();
            University::new(
                format!("University Number {i}"),
                rng.gen_range(1..=size as u32),
                rng.gen_range(1..=size as u32),
                ["CA", "NY", "MA", "TX"][i % 4],
                picked.join(";"),
                format!("https://u{i}.edu"),
            )
        })
        .collect();
    Catalog::new(universities).expect("non-empty catalog")
}

fn feedback_benchmark(c: &mut Criterion) {
    let catalog = bench_catalog(100);
    let mystery = catalog.get(0).cloned().expect("mystery");

    c.bench_function("feedback_evaluate_100", |b| {
        b.iter(|| {
            for guess in catalog.iter() {
                black_box(Feedback::evaluate(guess, &mystery));
            }
        })
    });
}

fn guess_benchmark(c: &mut Criterion) {
    let catalog = Arc::new(bench_catalog(100));

    c.bench_function("submit_guess_last_entry", |b| {
        b.iter(|| {
            let mut round = Round::new(catalog.clone(), RoundConfig::default());
            black_box(round.submit_guess("number 99").ok())
        })
    });
}

criterion_group!(benches, feedback_benchmark, guess_benchmark);
criterion_main!(benches);
