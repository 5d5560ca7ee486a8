use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Rendered for timestamps that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Appended to truncated strings
const ELLIPSIS: &str = "...";

/// Date-time layouts accepted without a UTC offset (read as local time)
const LOCAL_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Format an ISO-8601 timestamp for display in the local timezone,
/// e.g. `3/5/2024, 10:00:00 AM`. The result depends on the machine's timezone.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso.trim()) {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    for layout in LOCAL_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    // Date-only forms are UTC midnight
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

/// Escape the five HTML-significant characters.
///
/// Replacements run one after another over the whole string, so input that
/// is already escaped gets escaped again (`&amp;` becomes `&amp;amp;`).
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Cut a string to `max_len` characters and append `...` when it was longer.
/// A truncated result is `max_len + 3` characters long.
pub fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_strings_unchanged() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello", 5), "Hello");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_long_strings() {
        assert_eq!(truncate("Hello World", 5), "Hello...");
        assert_eq!(truncate("Hello World", 0), "...");
        // Result exceeds max_len by the ellipsis
        assert_eq!(truncate("abcdef", 4).chars().count(), 7);
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("héllo wörld", 7), "héllo w...");
        assert_eq!(truncate("日本語テキスト", 3), "日本語...");
        assert_eq!(truncate("日本語", 3), "日本語");
    }

    #[test]
    fn test_escape_html_all_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_every_occurrence() {
        assert_eq!(escape_html("<<>>&&"), "&lt;&lt;&gt;&gt;&amp;&amp;");
        assert_eq!(escape_html("plain text, 100% safe"), "plain text, 100% safe");
    }

    #[test]
    fn test_escape_html_not_idempotent() {
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html(&escape_html("&")), "&amp;amp;");
        assert_eq!(escape_html(&escape_html("<")), "&amp;lt;");
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("not a date"), INVALID_DATE);
        assert_eq!(format_date(""), INVALID_DATE);
        assert_eq!(format_date("2024-13-45"), INVALID_DATE);
    }

    #[test]
    fn test_format_date_same_instant_same_output() {
        let utc = format_date("2024-03-05T10:00:00Z");
        let offset = format_date("2024-03-05T12:00:00+02:00");
        assert_eq!(utc, offset);
        assert!(utc.contains("2024"));
        assert!(utc.ends_with("AM") || utc.ends_with("PM"));
    }

    #[test]
    fn test_format_date_date_only_is_utc_midnight() {
        assert_eq!(format_date("2024-03-05"), format_date("2024-03-05T00:00:00Z"));
    }

    #[test]
    fn test_format_date_without_offset_is_local() {
        let naive = NaiveDate::from_ymd_opt(2024, 7, 1)
            .and_then(|d| d.and_hms_opt(15, 4, 5))
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string();
        assert_eq!(format_date("2024-07-01T15:04:05.123456"), expected);
        assert_eq!(expected, "7/1/2024, 3:04:05 PM");
    }
}
