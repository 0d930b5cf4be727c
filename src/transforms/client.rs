//! Decomposition of the combined `client` address field.
//!
//! Three patterns are tried in order, first match wins:
//!
//! | pattern            | result                         |
//! |--------------------|--------------------------------|
//! | `1.2.3.4:80`       | `{ip, port}`                   |
//! | `1.2.3.4`          | `{ip}`                         |
//! | `<anything>:80`    | `{address, port}` or `{port}`  |
//!
//! Anything else becomes `{address: <original>}`, so the field is always a
//! map once this pass has run. Octets are matched by shape only: `999.1.1.1`
//! is still an `ip`.

use regex::Regex;
use std::sync::LazyLock;

use crate::record::{LogRecord, Map, Value};

pub const CLIENT_FIELD: &str = "client";

const IP_FIELD: &str = "ip";
const PORT_FIELD: &str = "port";
const ADDRESS_FIELD: &str = "address";

static IP_PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}):([0-9]+)$").unwrap()
});
static IP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})$").unwrap());
static HOST_PORT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*):([0-9]+)$").unwrap());

/// Replace a string `client` body field with its parsed parts.
pub fn convert_client(record: &mut LogRecord) {
    let Some(body) = record.body_map_mut() else {
        return;
    };
    let Some(Value::Str(client)) = body.get(CLIENT_FIELD) else {
        return;
    };

    let parts = parse_ip_port(client);
    body.insert(CLIENT_FIELD.to_string(), Value::Map(parts));
}

/// Split `s` into ip / address / port. Never returns an empty map.
pub fn parse_ip_port(s: &str) -> Map {
    let mut out = Map::new();

    if let Some(caps) = IP_PORT_RE.captures(s) {
        match caps[2].parse::<i64>() {
            Ok(port) => {
                out.insert(IP_FIELD.to_string(), Value::from(&caps[1]));
                out.insert(PORT_FIELD.to_string(), Value::Int(port));
            }
            Err(_) => {
                out.insert(ADDRESS_FIELD.to_string(), Value::from(s));
            }
        }
        return out;
    }

    if let Some(caps) = IP_RE.captures(s) {
        out.insert(IP_FIELD.to_string(), Value::from(&caps[1]));
        return out;
    }

    if let Some(caps) = HOST_PORT_RE.captures(s) {
        match caps[2].parse::<i64>() {
            Ok(port) => {
                let host = &caps[1];
                if !host.is_empty() {
                    out.insert(ADDRESS_FIELD.to_string(), Value::from(host));
                }
                out.insert(PORT_FIELD.to_string(), Value::Int(port));
            }
            Err(_) => {
                out.insert(ADDRESS_FIELD.to_string(), Value::from(s));
            }
        }
        return out;
    }

    out.insert(ADDRESS_FIELD.to_string(), Value::from(s));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn map(fields: &[(&str, Value)]) -> Map {
        fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[rstest]
    #[case::ip_port("10.0.0.1:8080", map(&[("ip", "10.0.0.1".into()), ("port", Value::Int(8080))]))]
    #[case::bare_ip("10.0.0.1", map(&[("ip", "10.0.0.1".into())]))]
    #[case::host_port("myhost:443", map(&[("address", "myhost".into()), ("port", Value::Int(443))]))]
    #[case::port_only(":443", map(&[("port", Value::Int(443))]))]
    #[case::garbage("garbage-value", map(&[("address", "garbage-value".into())]))]
    #[case::empty("", map(&[("address", "".into())]))]
    #[case::unchecked_octets("999.999.999.999", map(&[("ip", "999.999.999.999".into())]))]
    #[case::ipv6_host("[::1]:8080", map(&[("address", "[::1]".into()), ("port", Value::Int(8080))]))]
    #[case::greedy_host("a:b:80", map(&[("address", "a:b".into()), ("port", Value::Int(80))]))]
    #[case::ip_port_overflow(
        "10.0.0.1:99999999999999999999",
        map(&[("address", "10.0.0.1:99999999999999999999".into())])
    )]
    #[case::host_port_overflow(
        "db:99999999999999999999",
        map(&[("address", "db:99999999999999999999".into())])
    )]
    #[case::trailing_colon("myhost:", map(&[("address", "myhost:".into())]))]
    #[case::non_ascii_digits("host:٤٤٣", map(&[("address", "host:٤٤٣".into())]))]
    fn parses(#[case] input: &str, #[case] want: Map) {
        assert_eq!(parse_ip_port(input), want);
    }

    #[test]
    fn replaces_string_client() {
        let mut rec = LogRecord::new(map(&[("client", "10.0.0.1:8080".into())]));
        convert_client(&mut rec);
        let client = rec.body.as_map().unwrap()["client"].as_map().unwrap();
        assert_eq!(client["ip"], Value::from("10.0.0.1"));
        assert_eq!(client["port"], Value::Int(8080));
    }

    #[test]
    fn non_string_client_untouched() {
        for v in [Value::Int(5), Value::Map(map(&[("ip", "1.1.1.1".into())]))] {
            let mut rec = LogRecord::new(map(&[("client", v)]));
            let before = rec.clone();
            convert_client(&mut rec);
            assert_eq!(rec, before);
        }
    }
}
