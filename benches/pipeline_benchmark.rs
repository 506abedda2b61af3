//! Benchmarks for foreword pipeline performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise truncation and markdown parsing with
//! synthetic book-sized inputs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use foreword::{ContentTruncator, InlineFormatter, MarkdownParser};

/// Creates page-tagged body text of roughly the given size.
fn create_book_text(target_chars: usize) -> String {
    let mut text = String::with_capacity(target_chars + 128);
    let mut page = 1;
    while text.len() < target_chars {
        text.push_str(&format!("[Page {}]\n", page));
        for _ in 0..40 {
            text.push_str("The quick brown fox jumps over the lazy dog. ");
        }
        text.push_str("\n\n");
        page += 1;
    }
    text
}

/// Creates a markdown document with the given number of sections, each
/// mixing headings, emphasis, lists, and a table.
fn create_markdown(sections: usize) -> String {
    let mut md = String::new();
    for i in 1..=sections {
        md.push_str(&format!("## Section {}\n\n", i));
        md.push_str("A paragraph with **bold** and *italic* content spanning the line.\n\n");
        md.push_str("- first item\n- second item\n\n");
        md.push_str("| Col A | Col B |\n|---|---|\n| 1 | 2 |\n\n");
    }
    md
}

/// Benchmark PDF signature detection.
fn bench_detection(c: &mut Criterion) {
    let pdf_data = b"%PDF-1.7\n%minimal header for detection";
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| foreword::detect::is_pdf_bytes(black_box(pdf_data)));
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| foreword::detect::is_pdf_bytes(black_box(non_pdf_data)));
    });
}

/// Benchmark head/tail truncation at various input sizes.
fn bench_truncation(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncation");

    let small = create_book_text(50_000);
    let truncator = ContentTruncator::new();
    group.bench_function("under_budget_passthrough", |b| {
        b.iter(|| truncator.truncate(black_box(&small)));
    });

    for size in [200_000, 1_000_000].iter() {
        let text = create_book_text(*size);
        let bounded = ContentTruncator::with_budget(50_000);

        group.bench_function(format!("{}_chars", size), |b| {
            b.iter(|| bounded.truncate(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark markdown parsing at various document sizes.
fn bench_markdown_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_parsing");

    for sections in [10, 100].iter() {
        let md = create_markdown(*sections);
        let parser = MarkdownParser::new();

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| parser.parse(black_box(&md)));
        });
    }

    group.finish();
}

/// Benchmark inline marker resolution on a marker-dense line.
fn bench_inline_formatting(c: &mut Criterion) {
    let formatter = InlineFormatter::new();
    let line = "Mix of **bold**, *italic*, `code`, ~~strike~~, <u>under</u>, \
                x<sup>2</sup> and H~2~O in one line of prose.";

    c.bench_function("inline_format", |b| {
        b.iter(|| formatter.format(black_box(line)));
    });
}

criterion_group!(
    benches,
    bench_detection,
    bench_truncation,
    bench_markdown_parsing,
    bench_inline_formatting,
);
criterion_main!(benches);
