use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde_json::Value;

use crate::models::ConversationRecord;

/// Keys probed, in order, for a record's creation time.
pub const CREATE_TIME_KEYS: [&str; 4] = ["create_time", "createTime", "create-time", "start_time"];

/// Layout of the folder-name token: `MMDDYY-HHMM`.
const DATESTAMP_FORMAT: &str = "%m%d%y-%H%M";

/// Creation instant recorded in the record, if any candidate key yields one.
///
/// Epoch values are placed in the local time zone; RFC 3339 strings keep their own
/// offset.
pub fn record_create_time(record: &ConversationRecord) -> Option<DateTime<FixedOffset>> {
    CREATE_TIME_KEYS.iter().filter_map(|key| record.get(key)).find_map(timestamp_from_value)
}

/// Creation instant of the record, or the current time when it has none.
///
/// The fallback makes folder names for such records differ between runs.
pub fn create_time_or_now(record: &ConversationRecord) -> DateTime<FixedOffset> {
    record_create_time(record).unwrap_or_else(|| Local::now().fixed_offset())
}

pub fn format_datestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format(DATESTAMP_FORMAT).to_string()
}

fn timestamp_from_value(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::Number(n) => {
            // Fractional seconds are truncated toward zero.
            let seconds = n.as_f64()? as i64;
            (seconds > 0).then(|| local_from_epoch(seconds)).flatten()
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .or_else(|| parse_epoch_strict(s).filter(|secs| *secs > 0).and_then(local_from_epoch)),
        _ => None,
    }
}

/// Parse an all-digit string as epoch seconds. Signs, whitespace and any other
/// non-digit reject the string.
pub fn parse_epoch_strict(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn local_from_epoch(seconds: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(seconds, 0).map(|utc| utc.with_timezone(&Local).fixed_offset())
}
