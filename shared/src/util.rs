use chrono::{NaiveDate, SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with millisecond precision (`2025-01-31T08:15:00.123Z`).
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Keep at most `max` characters of `value`.
///
/// Counts chars rather than bytes so a multi-byte value never splits mid-character.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso8601_shape() {
        let ts = now_iso8601();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2025-01-31T08:15:00.123Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ab", 4), "ab");
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }
}
