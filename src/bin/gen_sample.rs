//! Sample chat export generator for benchmarking and manual testing.
//!
//! Usage: cargo run --features gen-test --bin gen_sample -- [messages] [output] [layout]
//! Example: cargo run --features gen-test --bin gen_sample -- 100000 sample_chat.txt android
//!
//! Layouts: `android` (`01/01/23, 10:00 - `) and `us` (`[1/1/23, 10:00:00 AM] `).

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Carol",
    "Dave",
    "Иван",
    "村上",
    "+1 555 0100",
    "🔥FireUser🔥",
];

const WORDS: &[&str] = &[
    "hello", "lunch", "meeting", "tomorrow", "weekend", "project", "coffee", "deadline", "train",
    "movie", "tonight", "photos", "birthday", "trip", "pizza", "running", "late", "great",
    "thanks", "sure", "привет", "こんにちは",
];

const EMOJIS: &[&str] = &["😀", "😂", "👍", "❤️", "🎉", "🔥", "🤔", "🙏"];

const SYSTEM_EVENTS: &[&str] = &[
    "Messages and calls are end-to-end encrypted. No one outside of this chat can read them.",
    "Alice created group \"Weekend plans\"",
    "Bob added Carol",
    "Dave left",
    "Carol changed the subject to \"Trip 2023\"",
];

#[derive(Clone, Copy)]
enum Layout {
    Android,
    Us,
}

impl Layout {
    fn stamp(self, ts: NaiveDateTime) -> String {
        match self {
            Layout::Android => format!("{} - ", ts.format("%d/%m/%y, %H:%M")),
            Layout::Us => format!("[{}] ", ts.format("%-m/%-d/%y, %-I:%M:%S %p")),
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("sample_chat.txt", String::as_str);
    let layout = match args.get(3).map_or("android", String::as_str) {
        "android" | "wa" => Layout::Android,
        "us" => Layout::Us,
        other => {
            eprintln!("Unknown layout: {}. Use 'android' or 'us'", other);
            std::process::exit(1);
        }
    };

    println!("🧪 Sample Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();

    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut ts = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();

    for i in 0..count {
        ts += Duration::minutes(rng.gen_range(1..=240));
        let line = format!("{}{}\n", layout.stamp(ts), generate_entry(&mut rng, i));
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn generate_entry(rng: &mut impl Rng, index: usize) -> String {
    let sender = SENDERS.choose(rng).copied().unwrap_or("Alice");
    let body = match index % 20 {
        0 => return SYSTEM_EVENTS.choose(rng).copied().unwrap_or("Dave left").to_string(),
        1 | 2 => "<Media omitted>".to_string(),
        3 => format!("look at this https://example.com/post/{}", index),
        4 => format!("{}\n{}\nsecond paragraph", sentence(rng, 4), sentence(rng, 6)),
        5 => format!("note: {} #{}", sentence(rng, 3), index),
        6 => {
            let n = rng.gen_range(1..6);
            (0..n).filter_map(|_| EMOJIS.choose(rng).copied()).collect()
        }
        _ => {
            let words = rng.gen_range(1..12);
            sentence(rng, words)
        }
    };
    format!("{}: {}", sender, body)
}

fn sentence(rng: &mut impl Rng, words: usize) -> String {
    (0..words)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}
