//! Benchmarks for topicize segmentation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run over synthetic documents with a fixed mix of
//! heading and body sizes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use topicize::{analyze, segment, segment_with, Document, ImageMap, Page, SegmentOptions, Topicize};

/// Creates a synthetic document with the given number of pages.
///
/// Every eighth page opens with an H1-sized line; each page carries a
/// subheading and thirty body lines in the modal size.
fn create_test_document(page_count: usize) -> Document {
    let mut doc = Document::new();
    for p in 0..page_count {
        let mut page = Page::new();
        if p % 8 == 0 {
            page = page.with_text(format!("Chapter {}", p / 8 + 1), 20.0);
        }
        page = page.with_text(format!("Section on page {}", p), 14.0);
        for l in 0..30 {
            page = page.with_text(
                format!(
                    "Body line {} on page {} with enough words to feel real.",
                    l, p
                ),
                10.0,
            );
        }
        doc = doc.with_page(page);
    }
    doc
}

/// Benchmark threshold inference over the full span population.
fn bench_threshold_analysis(c: &mut Criterion) {
    let doc = create_test_document(50);

    c.bench_function("analyze_50_pages", |b| {
        b.iter(|| analyze(black_box(&doc)));
    });
}

/// Benchmark segmentation at various document sizes.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for page_count in [8, 40, 160].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| segment(black_box(&doc), "bench"));
        });
    }

    group.finish();
}

/// Benchmark the two classification strategies against each other.
fn bench_strategies(c: &mut Criterion) {
    let doc = create_test_document(40);
    let images = ImageMap::new();
    let line_max = SegmentOptions::new();
    let per_span = SegmentOptions::new().per_span();

    c.bench_function("strategy_line_max", |b| {
        b.iter(|| segment_with(black_box(&doc), "bench", &images, &line_max));
    });

    c.bench_function("strategy_per_span", |b| {
        b.iter(|| segment_with(black_box(&doc), "bench", &images, &per_span));
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = Topicize::new()
                .per_span()
                .with_min_topic_chars(50)
                .with_tag("Bench");
        });
    });
}

criterion_group!(
    benches,
    bench_threshold_analysis,
    bench_segmentation,
    bench_strategies,
    bench_builder_creation,
);
criterion_main!(benches);
