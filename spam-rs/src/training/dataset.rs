//! SMS dataset loading and cleaning
//!
//! Reads the two-column spam collection layout: `v1` holds the label text
//! and `v2` the message. Any further columns are ignored. Fields that are
//! not valid UTF-8 are decoded as Latin-1.

use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, SpamError};
use crate::model::{Label, LabeledMessage};

const LABEL_COLUMN: &str = "v1";
const MESSAGE_COLUMN: &str = "v2";

/// One dataset row as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row number, for error messages
    pub row: usize,
    pub label: String,
    pub message: Option<String>,
}

/// Load raw records from a CSV file
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SpamError::Dataset(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let records = read_records(file)?;
    info!(path = %path.display(), rows = records.len(), "Dataset loaded");
    Ok(records)
}

/// Read raw records from any CSV source
pub fn read_records<R: Read>(source: R) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);

    let headers = reader.byte_headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| decode_field(h).trim() == name)
            .ok_or_else(|| SpamError::Dataset(format!("Missing column '{}'", name)))
    };
    let label_idx = column(LABEL_COLUMN)?;
    let message_idx = column(MESSAGE_COLUMN)?;

    let mut records = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        let row = records.len() + 1;
        let label = record.get(label_idx).map(decode_field).unwrap_or_default();
        let message = record
            .get(message_idx)
            .map(decode_field)
            .filter(|m| !m.is_empty());

        records.push(RawRecord {
            row,
            label,
            message,
        });
    }

    Ok(records)
}

/// Decode a field as UTF-8, falling back to Latin-1
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Encode labels, drop rows without a message and drop duplicate rows
///
/// The first occurrence of a duplicate is kept and input order is
/// preserved. An unrecognized label is an error.
pub fn clean(records: Vec<RawRecord>) -> Result<Vec<LabeledMessage>> {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut messages = Vec::with_capacity(total);
    let mut missing = 0usize;

    for record in records {
        let label = Label::parse(&record.label).ok_or_else(|| {
            SpamError::Dataset(format!(
                "Row {}: unknown label '{}'",
                record.row, record.label
            ))
        })?;

        let Some(text) = record.message else {
            missing += 1;
            continue;
        };

        let message = LabeledMessage::new(label, text);
        if seen.insert(message.clone()) {
            messages.push(message);
        }
    }

    let duplicates = total - missing - messages.len();
    if missing > 0 {
        warn!(rows = missing, "Dropped rows without a message");
    }
    debug!(duplicates, kept = messages.len(), "Dataset cleaned");

    if messages.is_empty() {
        return Err(SpamError::Dataset("No usable rows after cleaning".to_string()));
    }

    Ok(messages)
}
