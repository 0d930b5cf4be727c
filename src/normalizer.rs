use crate::config::PipelineMetadata;
use crate::record::LogRecord;
use crate::transforms::{arrays, client, numeric, plugin, severity, timestamp};

/// Run every transform over `record`, in order. Never fails: a pass whose
/// input doesn't fit simply leaves the record as it was.
pub fn normalize(record: &mut LogRecord, pipelines: Option<&PipelineMetadata>) {
    timestamp::promote_timestamp(record);
    severity::promote_severity(record);
    plugin::add_plugin_info(record, pipelines);
    client::convert_client(record);
    arrays::convert_string_arrays(record);
    numeric::convert_int_and_float_fields(record);
}

/// Normalize a whole batch in place.
pub fn normalize_all(records: &mut [LogRecord], pipelines: Option<&PipelineMetadata>) {
    for record in records.iter_mut() {
        normalize(record, pipelines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginInfo;
    use crate::record::{AttributeValue, Map, Value};
    use crate::severity::SeverityNumber;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> LogRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn nginx_style_record() {
        let mut rec = parse(
            r#"{
                "attributes": {"plugin_id": "nginx1"},
                "body": {
                    "@timestamp": "2023-01-01T00:00:00Z",
                    "severity": "30",
                    "client": "10.0.0.1:8080",
                    "remote_addr": "[10.0.0.2, 10.0.0.3]",
                    "status": "200",
                    "bytes_sent": "512",
                    "query_time": "0.25",
                    "message": "GET /"
                }
            }"#,
        );
        let mut pipelines = PipelineMetadata::new();
        pipelines.insert("nginx1".into(), PluginInfo::named("nginx"));

        normalize(&mut rec, Some(&pipelines));

        assert_eq!(rec.timestamp, Some("2023-01-01T00:00:00Z".parse().unwrap()));
        assert_eq!(rec.severity, SeverityNumber::Info);
        assert_eq!(
            rec.attributes.get("plugin_name"),
            Some(&AttributeValue::from("nginx"))
        );
        let body = rec.body.as_map().unwrap();
        assert!(!body.contains_key("@timestamp"));
        assert!(!body.contains_key("severity"));
        assert_eq!(body["client"].as_map().unwrap()["port"], Value::Int(8080));
        assert_eq!(
            body["remote_addr"],
            Value::Array(vec!["10.0.0.2".into(), "10.0.0.3".into()])
        );
        assert_eq!(body["status"], Value::Int(200));
        assert_eq!(body["bytes_sent"], Value::Int(512));
        assert_eq!(body["query_time"], Value::Double(0.25));
        assert_eq!(body["message"], Value::from("GET /"));
    }

    #[test]
    fn non_map_body_untouched() {
        for body in [
            Value::from("client=10.0.0.1:80 severity=3"),
            Value::Int(7),
            Value::Empty,
            Value::Array(vec!["time".into()]),
        ] {
            let rec = LogRecord::new(body);
            let mut after = rec.clone();
            normalize(&mut after, None);
            assert_eq!(after, rec);
        }
    }

    #[test]
    fn second_run_changes_nothing() {
        let mut rec = parse(
            r#"{"attributes":{"plugin_id":"p"},"body":{"time":1672531200,"severity":"warning",
                "client":":443","remote":"a,,b","code":"abc","size":"1","lock_time":"2.5"}}"#,
        );
        let mut pipelines = PipelineMetadata::new();
        pipelines.insert("p".into(), PluginInfo::named("x"));

        normalize(&mut rec, Some(&pipelines));
        let once = rec.clone();
        normalize(&mut rec, Some(&pipelines));
        assert_eq!(rec, once);
    }

    #[test]
    fn batch() {
        let mut records = vec![
            LogRecord::new(Map::from([("size".to_string(), Value::from("1"))])),
            LogRecord::new(Map::from([("size".to_string(), Value::from("2"))])),
        ];
        normalize_all(&mut records, None);
        assert_eq!(records[1].body.as_map().unwrap()["size"], Value::Int(2));
    }
}
