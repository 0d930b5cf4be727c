//! Severity levels and the mapping from the collector's raw 0-100 scale.

use serde::{Deserialize, Serialize};

/// OpenTelemetry log severity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityNumber {
    #[default]
    Unspecified = 0,
    Trace = 1,
    Trace2 = 2,
    Trace3 = 3,
    Trace4 = 4,
    Debug = 5,
    Debug2 = 6,
    Debug3 = 7,
    Debug4 = 8,
    Info = 9,
    Info2 = 10,
    Info3 = 11,
    Info4 = 12,
    Warn = 13,
    Warn2 = 14,
    Warn3 = 15,
    Warn4 = 16,
    Error = 17,
    Error2 = 18,
    Error3 = 19,
    Error4 = 20,
    Fatal = 21,
    Fatal2 = 22,
    Fatal3 = 23,
    Fatal4 = 24,
}

use SeverityNumber::*;

const TRACE_BAND: [SeverityNumber; 4] = [Trace, Trace2, Trace3, Trace4];
const DEBUG_BAND: [SeverityNumber; 4] = [Debug, Debug2, Debug3, Debug4];
const INFO_BAND: [SeverityNumber; 4] = [Info, Info2, Info3, Info4];
const WARN_BAND: [SeverityNumber; 4] = [Warn, Warn2, Warn3, Warn4];
const ERROR_BAND: [SeverityNumber; 4] = [Error, Error2, Error3, Error4];
const FATAL_BAND: [SeverityNumber; 4] = [Fatal, Fatal2, Fatal3, Fatal4];

/// Map a raw severity (Default 0, Trace 10, Debug 20, Info 30, Notice 40,
/// Warning 50, Error 60, Critical 70, Alert 80, Emergency 90,
/// Catastrophe 100) onto [`SeverityNumber`].
///
/// Values between the named levels land in the nearest band below them.
pub fn convert(raw: i64) -> SeverityNumber {
    match raw {
        i64::MIN..=0 => Unspecified,
        1..=19 => within(&TRACE_BAND, raw - 10),
        20..=29 => within(&DEBUG_BAND, raw - 20),
        30..=39 => within(&INFO_BAND, raw - 30),
        40..=49 => Info4,
        50..=59 => within(&WARN_BAND, raw - 50),
        60..=69 => within(&ERROR_BAND, raw - 60),
        70..=79 => Error3,
        80..=89 => Error4,
        90..=99 => within(&FATAL_BAND, raw - 90),
        _ => Fatal4,
    }
}

#[inline]
fn within(band: &[SeverityNumber; 4], offset: i64) -> SeverityNumber {
    match offset {
        i64::MIN..=0 => band[0],
        1..=2 => band[1],
        3 => band[2],
        _ => band[3],
    }
}
