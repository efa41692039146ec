//! Benchmarks for mailscrub cleaning performance.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic mail threads built from a fixed seed, so runs are
//! comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mailscrub::{normalize_text, CleanerOptions, ContentCleaner};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PARAGRAPHS: &[&str] = &[
    "Please confirm the invoice INV-1001 before Friday.",
    "The revised price for model X200 is ₹12,499 effective 01/04/2025.",
    "| SKU | Qty | Price |\n|-----|-----|-------|\n| A1 | 10 | 500 |",
    "Hope you are doing well.",
    "Thanks and regards,\nRavi",
    "From: Ravi Kumar <ravi@vendor.in>\nSent: Monday, 3 March 2025\nTo: team@shop.com\nSubject: Update",
    "Cc: ops@vendor.com, sales@vendor.com,\n    accounts@vendor.com",
    "On Mon, 3 Mar 2025 at 14:02, Ravi Kumar <ravi@vendor.in> wrote:",
    "This message is confidential and legally protected. Any disclosure is prohibited.",
    "This e-mail message may contain confidential information. Nothing in it is \
     confirmation of any transaction or contract.",
    "[Quoted text hidden]",
    "https://mail.google.com/mail/u/0/?ik=abc&view=pt",
];

/// Creates a synthetic thread with the given number of paragraphs.
fn create_thread(paragraph_count: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..paragraph_count)
        .filter_map(|_| PARAGRAPHS.choose(&mut rng).copied())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Benchmark the full pipeline at various thread sizes.
fn bench_clean(c: &mut Criterion) {
    let cleaner = ContentCleaner::new(CleanerOptions::default()).unwrap();
    let mut group = c.benchmark_group("clean");

    for para_count in [10, 100, 500, 1000].iter() {
        let thread = create_thread(*para_count, 42);

        group.throughput(Throughput::Bytes(thread.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", para_count),
            &thread,
            |b, thread| {
                b.iter(|| cleaner.clean(black_box(thread)));
            },
        );
    }

    group.finish();
}

/// Benchmark parallel batch cleaning.
fn bench_clean_batch(c: &mut Criterion) {
    let cleaner = ContentCleaner::new(CleanerOptions::default()).unwrap();
    let mut group = c.benchmark_group("clean_batch");

    for doc_count in [10, 100].iter() {
        let docs: Vec<String> = (0..*doc_count)
            .map(|i| create_thread(50, i as u64))
            .collect();

        group.bench_with_input(BenchmarkId::new("documents", doc_count), &docs, |b, docs| {
            b.iter(|| cleaner.clean_batch(black_box(docs)));
        });
    }

    group.finish();
}

/// Benchmark normalization alone.
fn bench_normalize(c: &mut Criterion) {
    let thread = create_thread(500, 7);

    c.bench_function("normalize_500", |b| {
        b.iter(|| normalize_text(black_box(&thread)));
    });
}

criterion_group!(benches, bench_normalize, bench_clean, bench_clean_batch);
criterion_main!(benches);
