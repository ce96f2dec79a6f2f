//! Timestamp parsing for display and ordering.
//!
//! Timestamps arrive as free-form strings. Recognized shapes:
//! - RFC 3339 (`2024-05-01T10:00:00.123Z`, `...+02:00`)
//! - naive `YYYY-MM-DD HH:MM:SS[.f]` or with a `T` separator, read as UTC
//! - integer epoch values: 10 digits seconds, 13 millis, 16 micros, 19 nanos
//!
//! Anything else is unparseable and callers fall back to the raw string.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp string, `None` when it matches no known shape.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return parse_epoch(raw);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_epoch(digits: &str) -> Option<DateTime<Utc>> {
    let value: i64 = digits.parse().ok()?;
    match digits.len() {
        10 => DateTime::from_timestamp(value, 0),
        13 => DateTime::from_timestamp_millis(value),
        16 => DateTime::from_timestamp_micros(value),
        19 => Some(DateTime::from_timestamp_nanos(value)),
        _ => None,
    }
}

/// Time-of-day shown next to a message; the raw string when unparseable.
pub fn format_time_of_day(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

/// ISO-8601 form with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(
            parse_timestamp("2024-05-01T12:00:00+02:00"),
            Some(utc(2024, 5, 1, 10, 0, 0))
        );
    }

    #[test]
    fn test_naive_formats() {
        assert_eq!(
            parse_timestamp("2024-05-01 10:00:05"),
            Some(utc(2024, 5, 1, 10, 0, 5))
        );
        assert!(parse_timestamp("2024-05-01T10:00:05.250").is_some());
    }

    #[test]
    fn test_epoch_lengths() {
        let expected = Some(utc(2023, 11, 14, 22, 13, 20));
        assert_eq!(parse_timestamp("1700000000"), expected);
        assert_eq!(parse_timestamp("1700000000000"), expected);
        assert_eq!(parse_timestamp("1700000000000000"), expected);
        assert_eq!(parse_timestamp("1700000000000000000"), expected);
    }

    #[test]
    fn test_short_numbers_are_not_timestamps() {
        assert_eq!(parse_timestamp("200"), None);
        assert_eq!(parse_timestamp("486"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day("2024-05-01T10:20:30Z"), "10:20:30");
        assert_eq!(format_time_of_day("not a date"), "not a date");
    }

    #[test]
    fn test_to_iso() {
        assert_eq!(to_iso(&utc(2024, 5, 1, 10, 0, 0)), "2024-05-01T10:00:00.000Z");
    }
}
