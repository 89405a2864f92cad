//! JSON Lines (JSONL) record writer.
//!
//! One object per parsed record, in parse order. Handy for feeding the
//! structured export into other tools without re-parsing the chat text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::TIMESTAMP_FORMAT;
use crate::Record;
use crate::error::Result;

#[derive(Serialize)]
struct JsonlRecord<'a> {
    timestamp: String,
    sender: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    system: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    media: bool,
}

impl<'a> JsonlRecord<'a> {
    fn from_record(record: &'a Record) -> Self {
        Self {
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            sender: record.sender_label(),
            body: &record.body,
            system: record.is_system(),
            media: record.is_media,
        }
    }
}

/// Writes records to a JSONL file.
///
/// ```jsonl
/// {"timestamp":"2023-01-01 10:00","sender":"Alice","body":"hello"}
/// {"timestamp":"2023-01-01 10:02","sender":"group_notification","body":"Bob left","system":true}
/// ```
pub fn write_jsonl(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, &JsonlRecord::from_record(record))?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[Record]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(&JsonlRecord::from_record(record))?);
        output.push('\n');
    }
    Ok(output)
}
