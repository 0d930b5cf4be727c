use crate::record::{LogRecord, Value};
use crate::severity::convert;

pub const SEVERITY_FIELD: &str = "severity";

/// Promote an integral `severity` body field to the record severity.
///
/// Textual severities ("warning", "E") are left in the body untouched.
pub fn promote_severity(record: &mut LogRecord) {
    let Some(body) = record.body_map_mut() else {
        return;
    };

    let raw = match body.get(SEVERITY_FIELD) {
        Some(Value::Int(v)) => *v,
        Some(Value::Str(s)) => match s.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                tracing::trace!(value = %s, "severity is not numeric, leaving it");
                return;
            }
        },
        _ => return,
    };

    body.remove(SEVERITY_FIELD);
    record.severity = convert(raw);
}
