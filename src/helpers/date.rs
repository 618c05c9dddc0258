//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a front-matter date string in the formats authors actually use
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM D, YYYY") // -> "January 5, 2024"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Human-readable post date, e.g. "January 5, 2024".
/// Empty input stays empty and unparseable input is returned as written.
pub fn format_display_date(date: &str, format: &str) -> String {
    match parse_date_string(date) {
        Some(dt) => format_date(&dt, format),
        None => date.trim().to_string(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first; each token is replaced by a placeholder so a
    // later, shorter token cannot match inside an earlier replacement.
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'outer: while !rest.is_empty() {
        for (from, to) in replacements {
            if let Some(tail) = rest.strip_prefix(from) {
                result.push_str(to);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            result.push(c);
        }
        rest = chars.as_str();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date_string("2024-01-15"), Some(expected));
        assert_eq!(parse_date_string("2024/01/15"), Some(expected));
        assert_eq!(parse_date_string(" 2024-01-15 "), Some(expected));

        let with_time = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(with_time.format("%H:%M").to_string(), "10:30");

        let rfc = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(rfc.format("%H:%M").to_string(), "08:30");
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date_string(""), None);
        assert_eq!(parse_date_string("someday"), None);
        assert_eq!(parse_date_string("2024-13-40"), None);
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-01-05", "MMMM D, YYYY"), "January 5, 2024");
        assert_eq!(format_display_date("2024-01-05", "YYYY/MM/DD"), "2024/01/05");
        assert_eq!(format_display_date("", "MMMM D, YYYY"), "");
        assert_eq!(format_display_date("soon", "MMMM D, YYYY"), "soon");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(moment_to_chrono_format("MMMM D, YYYY"), "%B %-d, %Y");
    }
}
