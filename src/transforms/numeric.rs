use crate::record::{LogRecord, Map, Value};

/// Fields that should be integers but often arrive as strings.
pub const INT_FIELDS: &[&str] = &[
    "bytes_sent",
    "code",
    "dbid",
    "http_status",
    "level",
    "org_id",
    "pid",
    "process_id",
    "process_log_line",
    "rows_examined",
    "rows_sent",
    "sessionid",
    "size",
    "slow_query_timestamp",
    "status",
    "tid",
];

/// Fields that should be floats but often arrive as strings.
pub const FLOAT_FIELDS: &[&str] = &["query_time", "lock_time"];

/// Replace numeric-looking string fields with typed values.
pub fn convert_int_and_float_fields(record: &mut LogRecord) {
    let Some(body) = record.body_map_mut() else {
        return;
    };

    convert_fields(body, INT_FIELDS, |s| s.parse::<i64>().ok().map(Value::Int));
    // NaN and infinities have no JSON form, keep the original text
    convert_fields(body, FLOAT_FIELDS, |s| {
        s.parse::<f64>().ok().filter(|v| v.is_finite()).map(Value::Double)
    });
}

fn convert_fields(body: &mut Map, fields: &[&str], parse: impl Fn(&str) -> Option<Value>) {
    for &field in fields {
        if let Some(value) = body.get_mut(field) {
            let parsed = match value {
                Value::Str(s) => parse(s.as_str()),
                _ => None,
            };
            if let Some(v) = parsed {
                *value = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(fields: &[(&str, Value)]) -> Map {
        let body: Map = fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        let mut rec = LogRecord::new(body);
        convert_int_and_float_fields(&mut rec);
        rec.body.as_map().unwrap().clone()
    }

    #[test]
    fn converts_ints() {
        let body = run(&[("size", "42".into()), ("status", "-7".into()), ("pid", "+12".into())]);
        assert_eq!(body["size"], Value::Int(42));
        assert_eq!(body["status"], Value::Int(-7));
        assert_eq!(body["pid"], Value::Int(12));
    }

    #[test]
    fn converts_floats() {
        let body = run(&[("query_time", "1.5".into()), ("lock_time", "3".into())]);
        assert_eq!(body["query_time"], Value::Double(1.5));
        assert_eq!(body["lock_time"], Value::Double(3.0));
    }

    #[test]
    fn unparsable_strings_stay() {
        let body = run(&[
            ("code", "abc".into()),
            ("size", "4.2".into()),
            ("bytes_sent", " 42".into()),
            ("http_status", "99999999999999999999".into()),
            ("query_time", "slow".into()),
            ("lock_time", "NaN".into()),
        ]);
        assert_eq!(body["code"], Value::from("abc"));
        assert_eq!(body["size"], Value::from("4.2"));
        assert_eq!(body["bytes_sent"], Value::from(" 42"));
        assert_eq!(body["http_status"], Value::from("99999999999999999999"));
        assert_eq!(body["query_time"], Value::from("slow"));
        assert_eq!(body["lock_time"], Value::from("NaN"));

        for text in ["inf", "-infinity"] {
            let body = run(&[("query_time", text.into())]);
            assert_eq!(body["query_time"], Value::from(text));
        }
    }

    #[test]
    fn typed_and_unlisted_fields_untouched() {
        let body = run(&[
            ("size", Value::Int(1)),
            ("query_time", Value::Int(2)),
            ("duration", "5".into()),
        ]);
        assert_eq!(body["size"], Value::Int(1));
        assert_eq!(body["query_time"], Value::Int(2));
        assert_eq!(body["duration"], Value::from("5"));
    }

    #[test]
    fn field_lists_are_disjoint() {
        assert!(INT_FIELDS.iter().all(|f| !FLOAT_FIELDS.contains(f)));
    }
}
