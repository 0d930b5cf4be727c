//! Best-effort coercion of body values into timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::record::Value;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

// Epoch unit cut-overs, picked by magnitude.
const MAX_SECONDS: i64 = 100_000_000_000;
const MAX_MILLIS: i64 = 100_000_000_000_000;
const MAX_MICROS: i64 = 100_000_000_000_000_000;

/// Try to read `val` as an instant. Returns `None` for anything that does not
/// look like one; never panics.
pub fn coerce(val: &Value) -> Option<DateTime<Utc>> {
    match val {
        Value::Str(s) => from_str(s.trim()),
        Value::Int(v) => from_epoch(*v),
        Value::Double(v) => from_epoch_secs_f64(*v),
        _ => None,
    }
}

fn from_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(v) = s.parse::<i64>() {
        return from_epoch(v);
    }
    s.parse::<f64>().ok().and_then(from_epoch_secs_f64)
}

fn from_epoch(v: i64) -> Option<DateTime<Utc>> {
    let magnitude = v.unsigned_abs();
    if magnitude < MAX_SECONDS as u64 {
        DateTime::from_timestamp(v, 0)
    } else if magnitude < MAX_MILLIS as u64 {
        DateTime::from_timestamp_millis(v)
    } else if magnitude < MAX_MICROS as u64 {
        DateTime::from_timestamp_micros(v)
    } else {
        Some(DateTime::from_timestamp_nanos(v))
    }
}

fn from_epoch_secs_f64(v: f64) -> Option<DateTime<Utc>> {
    if !v.is_finite() {
        return None;
    }
    let secs = v.floor();
    if secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
        return None;
    }
    let nanos = ((v - secs) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}
