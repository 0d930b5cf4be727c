use crate::record::LogRecord;
use crate::timestamp::coerce;

/// Body fields that may carry the record time, highest priority first.
pub const TIMESTAMP_FIELDS: &[&str] = &["@timestamp", "timestamp", "time"];

/// Move the first coercible timestamp field out of the body and onto the record.
pub fn promote_timestamp(record: &mut LogRecord) {
    let Some(body) = record.body.as_map() else {
        return;
    };

    let found = TIMESTAMP_FIELDS
        .iter()
        .find_map(|&field| body.get(field).and_then(coerce).map(|ts| (field, ts)));

    if let Some((field, ts)) = found {
        tracing::trace!(field, %ts, "promoting timestamp");
        record.timestamp = Some(ts);
        if let Some(body) = record.body_map_mut() {
            body.remove(field);
        }
    }
}
