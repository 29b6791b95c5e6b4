//! Lexical timestamp parsing for clock punches.
//!
//! Punch timestamps arrive from the physical time clock in several loosely
//! structured shapes: `2026-01-07T16:44:45Z`, `2026-01-07 16:44:45`, or CSV
//! exports with the date embedded somewhere in the field. The calendar date
//! and time-of-day are extracted lexically. The displayed clock time IS the
//! facility wall-clock time; no timezone conversion is ever applied.

use chrono::{Datelike, Duration, NaiveDate, Utc};

lazy_static::lazy_static! {
    static ref DATE_REGEX: regex::Regex = regex::Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    static ref TIME_REGEX: regex::Regex = regex::Regex::new(r"\d{1,2}:\d{2}").unwrap();
}

/// A punch timestamp reduced to its lexical parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchStamp {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time, `HH:MM`. Empty when the raw value carried no time.
    pub time_of_day: String,
}

/// Extracts the calendar date and time-of-day from a raw punch timestamp.
///
/// The canonical layout (`YYYY-MM-DD` + `T` or space + `HH:MM[:SS][Z]`) is
/// sliced directly; anything else falls back to scanning for a `YYYY-MM-DD`
/// and the first `HH:MM` anywhere in the string.
///
/// Returns `None` when no date pattern exists. A missing time-of-day is not
/// an error; the caller sees an empty string (which reads as minute 0).
pub fn parse_timestamp(raw: &str) -> Option<PunchStamp> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();

    // Fast path: separators exactly where the canonical layout puts them.
    if bytes.len() >= 16
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && (bytes[10] == b'T' || bytes[10] == b' ')
    {
        let date = &raw[..10];
        let time = &raw[11..16];
        if is_date_shaped(date) && is_time_shaped(time) {
            return Some(PunchStamp {
                date: date.to_string(),
                time_of_day: time.to_string(),
            });
        }
    }

    // Fallback: the date may be embedded anywhere.
    let date = DATE_REGEX.find(raw)?.as_str().to_string();
    let time_of_day = TIME_REGEX
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    Some(PunchStamp { date, time_of_day })
}

/// Converts an `HH:MM` string to minutes since midnight.
///
/// Missing or non-numeric components count as 0, so `""` is minute 0 and
/// `"9"` is 540.
pub fn time_of_day_to_minutes(hhmm: &str) -> i32 {
    let mut parts = hhmm.split(':');
    let hours = parts
        .next()
        .and_then(|p| p.trim().parse::<i32>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|p| p.trim().parse::<i32>().ok())
        .unwrap_or(0);
    hours * 60 + minutes
}

/// Normalizes a stored time-of-day (`"09:00:00"` or `"09:00"`) to `HH:MM`.
pub fn hhmm(raw: &str) -> String {
    raw.get(..5).unwrap_or(raw).to_string()
}

/// Lexical range bounds for one calendar month.
///
/// Returns `(first-day, first-day-of-next-month)` as bare `YYYY-MM-DD`
/// strings. ISO-formatted timestamps compare lexically against these bounds,
/// regardless of which separator variant the clock produced.
pub fn month_bounds(month: &str) -> Option<(String, String)> {
    let (y, m) = month.split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let mon: u32 = m.parse().ok()?;
    if !(1..=12).contains(&mon) || !(1900..=9999).contains(&year) {
        return None;
    }
    let (next_year, next_mon) = if mon == 12 { (year + 1, 1) } else { (year, mon + 1) };
    Some((
        format!("{year:04}-{mon:02}-01"),
        format!("{next_year:04}-{next_mon:02}-01"),
    ))
}

/// The calendar day after `day`, as `YYYY-MM-DD`.
pub fn next_day(day: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    Some((date + Duration::days(1)).format("%Y-%m-%d").to_string())
}

/// The current calendar month, `YYYY-MM`.
pub fn current_month() -> String {
    let now = Utc::now();
    format!("{:04}-{:02}", now.year(), now.month())
}

fn is_date_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

fn is_time_shaped(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[2] == b':'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_with_t_and_z() {
        let stamp = parse_timestamp("2026-01-07T16:44:45Z").unwrap();
        assert_eq!(stamp.date, "2026-01-07");
        assert_eq!(stamp.time_of_day, "16:44");
    }

    #[test]
    fn test_parse_space_separated() {
        let stamp = parse_timestamp("2026-01-07 16:44:45").unwrap();
        assert_eq!(stamp.date, "2026-01-07");
        assert_eq!(stamp.time_of_day, "16:44");
    }

    #[test]
    fn test_parse_no_seconds() {
        let stamp = parse_timestamp("2024-03-01 09:14").unwrap();
        assert_eq!(stamp.date, "2024-03-01");
        assert_eq!(stamp.time_of_day, "09:14");
    }

    #[test]
    fn test_parse_embedded_date() {
        // CSV export style: date buried mid-field
        let stamp = parse_timestamp("checked 2024-03-05 at 08:55 by device").unwrap();
        assert_eq!(stamp.date, "2024-03-05");
        assert_eq!(stamp.time_of_day, "08:55");
    }

    #[test]
    fn test_parse_date_only() {
        let stamp = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(stamp.date, "2024-03-05");
        assert_eq!(stamp.time_of_day, "");
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp("garbage").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("12:30").is_none());
    }

    #[test]
    fn test_parse_no_timezone_math() {
        // A trailing Z must not shift the wall clock.
        let stamp = parse_timestamp("2026-01-07T23:59:00Z").unwrap();
        assert_eq!(stamp.date, "2026-01-07");
        assert_eq!(stamp.time_of_day, "23:59");
    }

    #[test]
    fn test_parse_leading_whitespace() {
        let stamp = parse_timestamp("  2026-01-07T08:00:00Z").unwrap();
        assert_eq!(stamp.date, "2026-01-07");
        assert_eq!(stamp.time_of_day, "08:00");
    }

    #[test]
    fn test_time_of_day_to_minutes() {
        assert_eq!(time_of_day_to_minutes("09:00"), 540);
        assert_eq!(time_of_day_to_minutes("00:00"), 0);
        assert_eq!(time_of_day_to_minutes("23:59"), 1439);
        assert_eq!(time_of_day_to_minutes("9:05"), 545);
    }

    #[test]
    fn test_time_of_day_to_minutes_lenient() {
        assert_eq!(time_of_day_to_minutes(""), 0);
        assert_eq!(time_of_day_to_minutes("9"), 540);
        assert_eq!(time_of_day_to_minutes("xx:30"), 30);
        assert_eq!(time_of_day_to_minutes("10:xx"), 600);
    }

    #[test]
    fn test_hhmm_truncates_seconds() {
        assert_eq!(hhmm("09:00:00"), "09:00");
        assert_eq!(hhmm("18:30"), "18:30");
        assert_eq!(hhmm(""), "");
    }

    #[test]
    fn test_month_bounds() {
        let (start, end) = month_bounds("2024-03").unwrap();
        assert_eq!(start, "2024-03-01");
        assert_eq!(end, "2024-04-01");
    }

    #[test]
    fn test_month_bounds_december_rolls_over() {
        let (start, end) = month_bounds("2025-12").unwrap();
        assert_eq!(start, "2025-12-01");
        assert_eq!(end, "2026-01-01");
    }

    #[test]
    fn test_month_bounds_invalid() {
        assert!(month_bounds("2024-13").is_none());
        assert!(month_bounds("2024").is_none());
        assert!(month_bounds("garbage").is_none());
    }

    #[test]
    fn test_month_bounds_contain_both_separator_variants() {
        // Lexical comparison must include punches regardless of separator.
        let (start, end) = month_bounds("2024-03").unwrap();
        for ts in ["2024-03-01 00:00:01", "2024-03-01T00:00:01Z", "2024-03-31 23:59:59"] {
            assert!(ts >= start.as_str() && ts < end.as_str(), "{ts} outside bounds");
        }
        assert!("2024-02-29 23:59:59" < start.as_str());
        assert!("2024-04-01 00:00:00" >= end.as_str());
    }

    #[test]
    fn test_next_day() {
        assert_eq!(next_day("2024-03-01").unwrap(), "2024-03-02");
        assert_eq!(next_day("2024-02-29").unwrap(), "2024-03-01");
        assert_eq!(next_day("2024-12-31").unwrap(), "2025-01-01");
        assert!(next_day("2024-02-30").is_none());
    }

    #[test]
    fn test_current_month_shape() {
        let month = current_month();
        assert_eq!(month.len(), 7);
        assert_eq!(&month[4..5], "-");
    }
}
