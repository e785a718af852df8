use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use regex::Regex;

use crate::record::DATE_FORMAT;

static HOURS_AGO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*h ago").unwrap());
static DAYS_AGO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\s*d ago").unwrap());

/// Resolve the feed's time label ("3h ago", "2d ago", "Jan 5") to a calendar
/// date, relative to `now`. Anything unparseable resolves to `now`'s date.
///
/// Month/day labels carry no year and are placed in `now`'s year, so "Dec 31"
/// read in early January lands in the wrong year.
pub fn post_date(raw: &str, now: DateTime<Utc>) -> NaiveDate {
    let raw = raw.trim();
    if raw.contains("h ago") {
        return ago(raw, &HOURS_AGO_RE, TimeDelta::try_hours, now);
    }
    if raw.contains("d ago") {
        return ago(raw, &DAYS_AGO_RE, TimeDelta::try_days, now);
    }
    NaiveDate::parse_from_str(&format!("{} {}", raw, now.year()), "%b %d %Y")
        .unwrap_or_else(|_| now.date_naive())
}

fn ago(
    raw: &str,
    re: &Regex,
    delta: fn(i64) -> Option<TimeDelta>,
    now: DateTime<Utc>,
) -> NaiveDate {
    re.captures(raw)
        .and_then(|c| c[1].parse::<i64>().ok())
        .and_then(delta)
        .and_then(|d| now.checked_sub_signed(d))
        .unwrap_or(now)
        .date_naive()
}

/// `post_date` rendered as DD/MM/YYYY.
pub fn convert_post_time(raw: &str, now: DateTime<Utc>) -> String {
    format_date(post_date(raw, now))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// The feed renders the time label with a trailing " in" before the
/// category link; drop it.
pub fn clean_time_label(raw: &str) -> String {
    raw.replace(" in", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn hours_same_day() {
        assert_eq!(convert_post_time("5h ago", at("2024-01-10T12:00:00Z")), "10/01/2024");
    }

    #[test]
    fn hours_cross_midnight() {
        assert_eq!(convert_post_time("5h ago", at("2024-01-10T03:00:00Z")), "09/01/2024");
    }

    #[test]
    fn days_ago() {
        let now = at("2024-03-02T08:00:00Z");
        assert_eq!(convert_post_time("2d ago", now), "29/02/2024");
        assert_eq!(convert_post_time("0d ago", now), "02/03/2024");
        assert_eq!(convert_post_time("45d ago", now), "17/01/2024");
    }

    #[test]
    fn relative_matches_subtraction() {
        let now = at("2024-06-15T17:30:00Z");
        for n in [0i64, 1, 17, 18, 24, 100] {
            let expected = (now - TimeDelta::hours(n)).date_naive();
            assert_eq!(post_date(&format!("{}h ago", n), now), expected);
        }
        for n in [0i64, 1, 15, 365] {
            let expected = (now - TimeDelta::days(n)).date_naive();
            assert_eq!(post_date(&format!("{}d ago", n), now), expected);
        }
    }

    #[test]
    fn month_day_uses_current_year() {
        let now = at("2024-07-01T00:00:00Z");
        assert_eq!(convert_post_time("Mar 3", now), "03/03/2024");
        assert_eq!(convert_post_time("Jan 15", now), "15/01/2024");
        assert_eq!(convert_post_time("Feb 29", now), "29/02/2024");
    }

    #[test]
    fn year_boundary_is_not_corrected() {
        let now = at("2024-01-02T10:00:00Z");
        assert_eq!(convert_post_time("Dec 31", now), "31/12/2024");
    }

    #[test]
    fn unparseable_falls_back_to_now() {
        let now = at("2023-05-20T09:00:00Z");
        for raw in ["", "N/A", "yesterday", "Xh ago", "about 5h ago", "Feb 29", "Foo 3"] {
            assert_eq!(convert_post_time(raw, now), "20/05/2023", "input {:?}", raw);
        }
    }

    #[test]
    fn huge_offsets_fall_back_to_now() {
        let now = at("2023-05-20T09:00:00Z");
        assert_eq!(convert_post_time("99999999999999999999h ago", now), "20/05/2023");
        assert_eq!(convert_post_time("9999999999999d ago", now), "20/05/2023");
    }

    #[test]
    fn time_label_cleanup() {
        assert_eq!(clean_time_label("3h ago in"), "3h ago");
        assert_eq!(clean_time_label("  Jan 5 in "), "Jan 5");
    }

    #[test]
    fn date_round_trip_format() {
        let d = parse_date("09/01/2024").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
        assert_eq!(format_date(d), "09/01/2024");
        assert!(parse_date("2024-01-09").is_none());
    }
}
