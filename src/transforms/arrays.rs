use crate::record::{LogRecord, Value};

/// Header-style fields that upstream parsers emit as comma-joined strings.
pub const ARRAY_FIELDS: &[&str] = &[
    "http_x_forwarded_for",
    "remote",
    "remote_addr",
    "proxy_protocol_addr",
    "proxy_add_x_forwarded_for",
];

/// Turn comma-joined string fields into arrays of trimmed strings.
pub fn convert_string_arrays(record: &mut LogRecord) {
    let Some(body) = record.body_map_mut() else {
        return;
    };

    for &field in ARRAY_FIELDS {
        let Some(Value::Str(raw)) = body.get(field) else {
            continue;
        };
        let Some(items) = split_list(raw) else {
            continue;
        };
        body.insert(field.to_string(), Value::Array(items));
    }
}

/// `"[a, b]"` / `"a, b"` -> `["a", "b"]`. Blank input yields `None`.
/// Empty elements between consecutive commas are kept.
fn split_list(raw: &str) -> Option<Vec<Value>> {
    let mut s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if s.len() >= 2 && s.starts_with('[') && s.ends_with(']') {
        s = &s[1..s.len() - 1];
    }
    Some(s.split(',').map(|item| Value::from(item.trim())).collect())
}
