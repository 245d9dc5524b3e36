//! Benchmarks for the legacy codec and translation resolution.
//!
//! Run with: `cargo bench --package mctext --bench legacy_bench`

use std::collections::HashMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mctext::legacy::{decode, encode, replace_codes, strip_codes};
use mctext::{Color, Message, MessageBuilder, Resolver, Style};

// ============================================================================
// Test Data Generation
// ============================================================================

/// A typical server MOTD line.
const MOTD: &str = "§6§lMy Server §r§7- §aSurvival §7| §bCreative §7| §c§nPvP§r ";

fn generate_legacy(target_size: usize) -> String {
    let repeats = (target_size / MOTD.len()).max(1);
    MOTD.repeat(repeats)
}

/// A root with `width` styled children, each with one plain grandchild.
fn generate_tree(width: usize) -> Message {
    let palette = Color::NAMED;
    let children = (0..width).map(|i| {
        let style = Style::new()
            .color(palette[i % palette.len()])
            .decoration(mctext::Decoration::ALL[i % 5], i % 3 == 0);
        MessageBuilder::text(format!("part{i} "))
            .style(style)
            .and_then(|b| b.append(Message::of("tail ")))
            .and_then(|b| b.build())
            .unwrap()
    });
    MessageBuilder::empty().append_all(children).unwrap().build().unwrap()
}

// ============================================================================
// Codec Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_decode");
    for size in [1_000, 10_000, 100_000] {
        let text = generate_legacy(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("motd", size), &text, |b, text| {
            b.iter(|| decode(black_box(text), '§'));
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_encode");
    for width in [10, 100, 1_000] {
        let tree = generate_tree(width);
        group.bench_with_input(BenchmarkId::new("tree", width), &tree, |b, tree| {
            b.iter(|| encode(black_box(tree), '§'));
        });
    }
    group.finish();
}

fn bench_strip_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_strings");
    let text = generate_legacy(100_000);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("strip_codes/100K", |b| {
        b.iter(|| strip_codes(black_box(&text), '§'));
    });
    group.bench_function("replace_codes/100K", |b| {
        b.iter(|| replace_codes(black_box(&text), '§', '&'));
    });
    group.finish();
}

// ============================================================================
// Resolver Benchmarks
// ============================================================================

fn bench_resolve(c: &mut Criterion) {
    let lookup: HashMap<&str, &str> = [("wrap", "[{0}]"), ("pair", "%s and %s")].into();
    let mut nested = Message::of("core");
    for _ in 0..7 {
        nested = MessageBuilder::translatable("wrap", [nested]).build().unwrap();
    }
    let styled_pair = MessageBuilder::translatable(
        "pair",
        [
            MessageBuilder::text("a").color(Color::Red).unwrap().build().unwrap(),
            Message::of("b"),
        ],
    )
    .build()
    .unwrap();
    let resolver = Resolver::new();

    let mut group = c.benchmark_group("resolve");
    group.bench_function("nested_7", |b| {
        b.iter(|| resolver.resolve(black_box(&nested), &lookup));
    });
    group.bench_function("styled_pair", |b| {
        b.iter(|| resolver.resolve(black_box(&styled_pair), &lookup));
    });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_strip_replace, bench_resolve);
criterion_main!(benches);
