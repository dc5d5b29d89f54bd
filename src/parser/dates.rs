use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use regex::Regex;

static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(second|sec|minute|min|hour|day|week|month|year)s?\s+ago$")
        .expect("hardcoded regex pattern is valid")
});

/// `n` units as a delta. `None` when it does not fit in a `TimeDelta`.
fn relative_delta(n: i64, unit: &str) -> Option<TimeDelta> {
    match unit {
        "second" | "sec" => TimeDelta::try_seconds(n),
        "minute" | "min" => TimeDelta::try_minutes(n),
        "hour" => TimeDelta::try_hours(n),
        "day" => TimeDelta::try_days(n),
        "week" => TimeDelta::try_weeks(n),
        "month" => TimeDelta::try_days(n.checked_mul(30)?),
        _ => TimeDelta::try_days(n.checked_mul(365)?),
    }
}

/// Parse a chapter row date such as `"Jan 15,2024"`, `"3 hours ago"` or `"Yesterday"`.
///
/// Relative forms are resolved against `now`. Returns `None` for anything else.
pub fn parse_date(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let lower = text.to_ascii_lowercase();

    match lower.as_str() {
        "" => return None,
        "today" | "just now" => return Some(now),
        "yesterday" => return now.checked_sub_signed(TimeDelta::days(1)),
        _ => {}
    }

    if let Some(caps) = RELATIVE.captures(&text) {
        let n: i64 = caps[1].parse().ok()?;
        let delta = relative_delta(n, &caps[2].to_ascii_lowercase())?;
        return now.checked_sub_signed(delta);
    }

    // "Jan 15,2024" on the chapter list; other pages put a space after the comma.
    let normalized = text.replace(", ", ",");
    ["%b %d,%Y", "%B %d,%Y", "%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap() }

    #[test]
    fn absolute_dates() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_date("Jan 15,2024", now()), Some(expected));
        assert_eq!(parse_date(" Jan 15, 2024 ", now()), Some(expected));
        assert_eq!(parse_date("January 15,2024", now()), Some(expected));
    }

    #[test]
    fn relative_dates() {
        assert_eq!(parse_date("Today", now()), Some(now()));
        assert_eq!(parse_date("Yesterday", now()), Some(now() - Duration::days(1)));
        assert_eq!(parse_date("5 hours ago", now()), Some(now() - Duration::hours(5)));
        assert_eq!(parse_date("1 minute ago", now()), Some(now() - Duration::minutes(1)));
        assert_eq!(parse_date("2 Weeks ago", now()), Some(now() - Duration::weeks(2)));
    }

    #[test]
    fn out_of_range_relative_dates_are_none() {
        assert_eq!(parse_date("300000000 days ago", now()), None);
        assert_eq!(parse_date("9223372036854775807 years ago", now()), None);
        assert_eq!(parse_date("99999999999999999999 hours ago", now()), None);
        assert_eq!(parse_date("400000 years ago", now()), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_date("", now()), None);
        assert_eq!(parse_date("sometime soon", now()), None);
    }
}
