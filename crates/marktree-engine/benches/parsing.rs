use criterion::{Criterion, criterion_group, criterion_main};
use marktree_engine::parsing::inline::parse_inline;
use marktree_engine::{parse, parse_single_line};
mod common;

fn bench_full_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    group.bench_function("parse_repeated_blocks", |b| {
        b.iter(|| {
            let tree = parse(std::hint::black_box(&content));
            std::hint::black_box(tree);
        });
    });

    let large = common::generate_large_document();
    group.bench_function("parse_large_document", |b| {
        b.iter(|| {
            let tree = parse(std::hint::black_box(&large));
            std::hint::black_box(tree);
        });
    });

    let tree = parse(&large);
    group.bench_function("to_markdown_large_document", |b| {
        b.iter(|| std::hint::black_box(tree.to_markdown()));
    });

    group.finish();
}

fn bench_line_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_parsing");

    group.bench_function("parse_single_line", |b| {
        b.iter(|| {
            let node = parse_single_line(std::hint::black_box("  - [ ] a *task* with `code`"));
            std::hint::black_box(node);
        });
    });

    group.bench_function("parse_inline", |b| {
        b.iter(|| {
            let segments = parse_inline(std::hint::black_box(
                "mix of **bold**, *italic*, ~~gone~~, <sub>x</sub> and [a link](https://x.io)",
            ));
            std::hint::black_box(segments);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_parse, bench_line_parsing);
criterion_main!(benches);
