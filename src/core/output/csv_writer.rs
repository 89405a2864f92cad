//! CSV record writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::TIMESTAMP_FORMAT;
use crate::Record;
use crate::error::{ChatlensError, Result};

const HEADER: [&str; 4] = ["Timestamp", "Sender", "Body", "Media"];

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Body`, `Media`
/// - System notifications use the `group_notification` sender label
/// - Encoding: UTF-8
pub fn write_csv(records: &[Record], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_to(records, file)
}

/// Converts records to a CSV string.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ChatlensError::decode("CSV output", e))
}

fn write_to<W: Write>(records: &[Record], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);
    writer.write_record(HEADER)?;

    for record in records {
        writer.write_record([
            record.timestamp.format(TIMESTAMP_FORMAT).to_string().as_str(),
            record.sender_label(),
            record.body.as_str(),
            if record.is_media { "1" } else { "0" },
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ChatParser;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv_basic() {
        let chat = ChatParser::new()
            .parse_str("01/01/23, 10:00 - Alice: Hello\n01/01/23, 10:01 - Bob: Hi there")
            .unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&chat.records, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("Timestamp;Sender;Body;Media\n"));
        assert!(content.contains("2023-01-01 10:00;Alice;Hello;0"));
        assert!(content.contains("2023-01-01 10:01;Bob;Hi there;0"));
    }

    #[test]
    fn test_to_csv_quotes_delimiters() {
        let chat = ChatParser::new()
            .parse_str("01/01/23, 10:00 - Alice: a;b\n01/01/23, 10:01 - Bob: <Media omitted>")
            .unwrap();
        let csv = to_csv(&chat.records).unwrap();
        assert!(csv.contains("Alice;\"a;b\";0"));
        assert!(csv.contains("Bob;<Media omitted>;1"));
    }
}
