//! Benchmarks for outline generation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the engine over synthetic layout documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use autotoc::{
    BBox, Block, Color, LayoutDocument, Line, OutlineEngine, OutlineOptions, Page, TextRun,
};

fn line(text: &str, size: f32, y: f32) -> Line {
    Line::new(
        vec![TextRun::new(text, size, Color::BLACK).unwrap()],
        BBox::new(72.0, y, 540.0, y + size),
    )
    .unwrap()
}

/// Creates a synthetic document: a chapter heading, two sections and body
/// text on every page, plus a running header and a page stamp.
fn create_test_document(page_count: u32) -> LayoutDocument {
    let mut doc = LayoutDocument::with_page_count(page_count);

    for index in 0..page_count {
        let mut page = Page::letter(index);
        page.add_block(Block::with_lines(vec![line(
            "Benchmark Corporation",
            18.0,
            20.0,
        )]));

        let mut y = 80.0;
        let mut lines = vec![line(&format!("Chapter {}", index + 1), 24.0, y)];
        for section in 1..=2 {
            y += 40.0;
            lines.push(line(&format!("Section {}.{}", index + 1, section), 16.0, y));
            for _ in 0..10 {
                y += 14.0;
                lines.push(line(
                    "Body text for outline benchmark measurement, repeated per page.",
                    10.0,
                    y,
                ));
            }
        }
        lines.push(line(
            &format!("Page {} of {}", index + 1, page_count),
            10.0,
            700.0,
        ));
        page.add_block(Block::with_lines(lines));
        doc.add_page(page);
    }

    doc
}

/// Benchmark font statistics alone.
fn bench_font_statistics(c: &mut Criterion) {
    let doc = create_test_document(50);
    let engine = OutlineEngine::default();

    c.bench_function("font_statistics_50_pages", |b| {
        b.iter(|| engine.analyze(black_box(&doc)));
    });
}

/// Benchmark full generation at various sizes, parallel and sequential.
fn bench_outline_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_generation");
    let parallel = OutlineEngine::default();
    let sequential = OutlineEngine::new(OutlineOptions::new().sequential()).unwrap();

    for page_count in [10, 100, 500].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| parallel.generate(black_box(&doc)));
        });
        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            b.iter(|| sequential.generate(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark JSON layout parsing.
fn bench_layout_parsing(c: &mut Criterion) {
    let json = create_test_document(50).to_json().unwrap();

    c.bench_function("layout_json_50_pages", |b| {
        b.iter(|| LayoutDocument::from_json(black_box(&json)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_font_statistics,
    bench_outline_generation,
    bench_layout_parsing,
);
criterion_main!(benches);
