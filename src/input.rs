//! Newline-delimited JSON decoding.
//!
//! A line holding an object with a `body` or `attributes` key, and nothing
//! but record keys, is read as a full [`LogRecord`]. Any other JSON line is
//! taken to be the record body itself, which is what most shippers emit.

use memchr::memchr_iter;
use serde::Deserialize;

use crate::record::{LogRecord, Value};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Inputs above this size are split and decoded in parallel.
#[cfg(feature = "parallel")]
const CHUNK_BYTES: usize = 4 * 1024 * 1024;

const RECORD_KEYS: &[&str] = &["body", "attributes"];

/// Result of decoding one buffer.
#[derive(Debug, Default)]
pub struct Decoded {
    pub records: Vec<LogRecord>,
    /// Byte offsets of non-blank lines that could not be decoded.
    pub rejected: Vec<usize>,
}

#[cfg(feature = "parallel")]
impl Decoded {
    fn append(&mut self, mut other: Decoded) {
        self.records.append(&mut other.records);
        self.rejected.append(&mut other.rejected);
    }
}

pub fn decode(input: &[u8]) -> Decoded {
    decode_at(input, 0)
}

/// Decode `input`, which starts `base` bytes into the original stream.
/// Rejected line offsets are reported relative to that stream.
pub fn decode_at(input: &[u8], base: usize) -> Decoded {
    #[cfg(feature = "parallel")]
    {
        if input.len() > CHUNK_BYTES {
            return decode_parallel(input, base, CHUNK_BYTES);
        }
    }

    let mut out = Decoded::default();
    decode_chunk(input, base, &mut out);
    out
}

#[cfg(feature = "parallel")]
fn decode_parallel(input: &[u8], base: usize, chunk_bytes: usize) -> Decoded {
    let parts: Vec<Decoded> = line_aligned_ranges(input, chunk_bytes)
        .into_par_iter()
        .map(|r| {
            let mut out = Decoded::default();
            decode_chunk(&input[r.clone()], base + r.start, &mut out);
            out
        })
        .collect();

    let mut result = Decoded::default();
    for p in parts {
        result.append(p);
    }
    result
}

/// Split `bytes` into ranges of roughly `target` bytes, each ending on a
/// newline (except possibly the last).
pub fn line_aligned_ranges(bytes: &[u8], target: usize) -> Vec<std::ops::Range<usize>> {
    let len = bytes.len();
    let mut ranges = Vec::new();
    let mut start = 0usize;

    while start < len {
        let mut end = (start + target.max(1)).min(len);
        if end < len {
            // extend through the newline that finishes the current line
            end = match memchr::memchr(b'\n', &bytes[end - 1..]) {
                Some(off) => end + off,
                None => len,
            };
        }
        ranges.push(start..end);
        start = end;
    }
    ranges
}

fn decode_chunk(bytes: &[u8], base: usize, out: &mut Decoded) {
    let mut start = 0usize;
    for nl in memchr_iter(b'\n', bytes) {
        decode_line(&bytes[start..nl], base + start, out);
        start = nl + 1;
    }
    if start < bytes.len() {
        decode_line(&bytes[start..], base + start, out);
    }
}

fn decode_line(line: &[u8], offset: usize, out: &mut Decoded) {
    if line.iter().all(u8::is_ascii_whitespace) {
        return;
    }
    match decode_record(line) {
        Ok(record) => out.records.push(record),
        Err(err) => {
            tracing::warn!(offset, error = %err, "skipping undecodable line");
            out.rejected.push(offset);
        }
    }
}

/// Decode a single JSON line into a record.
///
/// An object that looks like a full record but does not decode as one
/// (extra keys, a numeric `severity`, ...) is kept whole as the body.
pub fn decode_record(line: &[u8]) -> serde_json::Result<LogRecord> {
    let json: serde_json::Value = serde_json::from_slice(line)?;
    let is_record = json
        .as_object()
        .is_some_and(|obj| RECORD_KEYS.iter().any(|k| obj.contains_key(*k)));

    if is_record {
        if let Ok(record) = LogRecord::deserialize(&json) {
            return Ok(record);
        }
    }
    Ok(LogRecord::new(serde_json::from_value::<Value>(json)?))
}
