//! Rendering of read results, as aligned text or as JSON.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use crate::script::{Op, OpValue};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One executed operation: where it started, what it was, what it read.
#[derive(Clone, Debug, Serialize)]
pub struct Record {
    pub offset: usize,
    pub op: String,
    #[serde(flatten)]
    pub value: RecordValue,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordValue {
    Int { value: u64 },
    Bytes { len: usize, hex: String },
    Skip { len: usize },
}

impl Record {
    pub fn new(offset: usize, op: Op, value: &OpValue) -> Self {
        let value = match value {
            OpValue::Int(value) => RecordValue::Int { value: *value },
            OpValue::Bytes(bytes) => RecordValue::Bytes {
                len: bytes.len(),
                hex: hex::encode(bytes),
            },
            OpValue::Skipped(len) => RecordValue::Skip { len: *len },
        };
        Self {
            offset,
            op: op.to_string(),
            value,
        }
    }

    /// Single text line, e.g. `000003  packed-word   300 (0x12C)`.
    pub fn to_text(&self) -> String {
        let value = match &self.value {
            RecordValue::Int { value } => format!("{value} ({value:#X})"),
            RecordValue::Bytes { len, hex } if hex.is_empty() => format!("[{len} bytes]"),
            RecordValue::Bytes { len, hex } => format!("[{len} bytes] {hex}"),
            RecordValue::Skip { len } => format!("skipped {len} bytes"),
        };
        format!("{:06}  {:<13} {value}", self.offset, self.op)
    }
}

/// Full result of a `pipe read` run.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub records: Vec<Record>,
    pub end_offset: usize,
    pub remaining: usize,
}

/// Classic 16-bytes-per-line hex dump. `base` is the absolute offset of
/// `bytes[0]` and is what the left column shows.
pub fn hex_dump(bytes: &[u8], base: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let offset = base + i * 16;
        let hex = chunk
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        let _ = writeln!(out, "{offset:08x}  {hex:<47}  {ascii}");
    }
    out
}
