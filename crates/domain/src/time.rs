//! Timestamp codec for the service's fixed textual format.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Wire format for all timestamps, interpreted in GMT.
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Parses a wire timestamp.
///
/// Returns `None` when the text does not match the fixed format; a bad
/// timestamp is never an error.
#[must_use]
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp in the wire format.
#[must_use]
pub fn format_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DATETIME_FORMAT).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_format_round_trip() {
        let parsed = parse_datetime("2015/04/14 09:30:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2015/04/14 09:30:00");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert_eq!(parse_datetime("2015-04-14T09:30:00Z"), None);
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime(""), None);
    }
}
