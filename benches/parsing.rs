//! Benchmarks for chatlens parsing and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- report`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatlens::Record;
use chatlens::config::AnalysisConfig;
use chatlens::core::analysis::{Heatmap, basic_stats, most_active, most_common_words};
use chatlens::core::output::to_jsonl;
use chatlens::core::{FilterConfig, Report};
use chatlens::parser::ChatParser;
use chatlens::parsing::TimestampPreset;

// =============================================================================
// Test Data Generators
// =============================================================================

const SENDERS: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];
const WORDS: [&str; 12] = [
    "pizza", "tonight", "meeting", "weekend", "sure", "thanks", "haha", "train", "late", "coffee",
    "movie", "later",
];

/// Android-style export with media, links, system events and multi-line bodies.
fn generate_android_export(count: usize) -> String {
    let mut out = String::with_capacity(count * 48);
    for i in 0..count {
        let day = i / 200 % 28 + 1;
        let month = i / 5_600 % 12 + 1;
        let hour = i / 9 % 24;
        let minute = i % 60;
        let ts = format!("{day:02}/{month:02}/23, {hour:02}:{minute:02}");
        let sender = SENDERS[i % SENDERS.len()];

        match i % 50 {
            0 => out.push_str(&format!("{ts} - {sender} added Erin\n")),
            1 | 2 => out.push_str(&format!("{ts} - {sender}: <Media omitted>\n")),
            3 => out.push_str(&format!("{ts} - {sender}: look https://example.com/{i}\n")),
            4 => out.push_str(&format!("{ts} - {sender}: first line\nsecond line {i}\n")),
            _ => {
                let a = WORDS[i % WORDS.len()];
                let b = WORDS[(i * 7) % WORDS.len()];
                out.push_str(&format!("{ts} - {sender}: {a} {b} message {i}\n"));
            }
        }
    }
    out
}

fn generate_records(count: usize) -> Vec<Record> {
    ChatParser::new()
        .parse_str(&generate_android_export(count))
        .unwrap()
        .into_records()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = ChatParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_android_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let chat = parser.parse_str(black_box(txt)).unwrap();
                black_box(chat)
            });
        });
    }
    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let txt = generate_android_export(1_000);
    c.bench_function("detect_preset", |b| {
        b.iter(|| black_box(TimestampPreset::detect(black_box(&txt))));
    });
}

// =============================================================================
// Aggregation Benchmarks
// =============================================================================

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");
    let stop_words = AnalysisConfig::default().resolve_stop_words().unwrap();

    for size in [1_000_usize, 10_000, 100_000] {
        let records = generate_records(size);
        let selection: Vec<&Record> = records.iter().collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("basic_stats", size), &selection, |b, s| {
            b.iter(|| black_box(basic_stats(black_box(s))));
        });
        group.bench_with_input(BenchmarkId::new("most_active", size), &selection, |b, s| {
            b.iter(|| black_box(most_active(black_box(s), 5)));
        });
        group.bench_with_input(BenchmarkId::new("common_words", size), &selection, |b, s| {
            b.iter(|| {
                black_box(most_common_words(
                    black_box(s),
                    &stop_words,
                    "<Media omitted>",
                    20,
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("heatmap", size), &selection, |b, s| {
            b.iter(|| black_box(Heatmap::build(black_box(s))));
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let config = AnalysisConfig::default();
    let overall = FilterConfig::new();
    let alice = FilterConfig::new().with_sender("Alice");

    for size in [1_000_usize, 10_000, 100_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("overall", size), &records, |b, records| {
            b.iter(|| black_box(Report::build(black_box(records), &overall, &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("sender", size), &records, |b, records| {
            b.iter(|| black_box(Report::build(black_box(records), &alice, &config).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output_jsonl(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_jsonl");

    for size in [100_usize, 1_000, 10_000] {
        let records = generate_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(to_jsonl(black_box(records)).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = ChatParser::new();
    let config = AnalysisConfig::default();
    let filter = FilterConfig::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_android_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                // parse -> report
                let chat = parser.parse_str(black_box(txt)).unwrap();
                let report = Report::build(&chat.records, &filter, &config).unwrap();
                black_box(report)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_parse,
    bench_detect,
    bench_views,
    bench_report,
    bench_output_jsonl,
    bench_full_pipeline,
);

criterion_main!(benches);
