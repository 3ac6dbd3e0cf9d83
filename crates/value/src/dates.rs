//! Parsing of human-entered dates and times
//!
//! Dates are found anywhere in the text using the environment's date format
//! to decide the order of the parts, e.g. `Born on 18.7.79` with
//! `DD-MM-YYYY`. Separators may be any of `-`, `.`, `/`, `\`, `_` or space.
//! Two digit years are placed in the current century unless that would put
//! them in the future, in which case the previous century is used.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::environment::{DateFormat, Environment};
use crate::error::ValueError;
use crate::temporal::DateTime;

static DAY_FIRST_OR_MONTH_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{1,2})[-.\\/_ ]([0-9]{1,2})[-.\\/_ ]([0-9]{4}|[0-9]{2})\b")
        .expect("valid regex")
});

static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{4}|[0-9]{2})[-.\\/_ ]([0-9]{1,2})[-.\\/_ ]([0-9]{1,2})\b")
        .expect("valid regex")
});

static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{1,2})(?::?([0-9]{2})(?::([0-9]{2})(?:\.([0-9]+))?)?)?\W*([aApP][mM])?\b")
        .expect("valid regex")
});

/// ISO 8601 local datetimes without an offset
const ISO_LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A date found in text, with where it ended
struct DateMatch {
    date: NaiveDate,
    end: usize,
}

fn pattern_for(format: DateFormat) -> &'static Regex {
    match format {
        DateFormat::YearMonthDay => &*YEAR_FIRST,
        DateFormat::MonthDayYear | DateFormat::DayMonthYear => &*DAY_FIRST_OR_MONTH_FIRST,
    }
}

/// Expand a two digit year relative to the current year
fn expand_year(year: &str, current_year: i32) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    if year.len() != 2 {
        return Some(value);
    }
    let century = current_year / 100 * 100;
    if value > current_year % 100 {
        Some(century - 100 + value)
    } else {
        Some(century + value)
    }
}

fn date_from_captures(caps: &Captures<'_>, format: DateFormat, current_year: i32) -> Option<NaiveDate> {
    let (year, month, day) = match format {
        DateFormat::YearMonthDay => (&caps[1], &caps[2], &caps[3]),
        DateFormat::MonthDayYear => (&caps[3], &caps[1], &caps[2]),
        DateFormat::DayMonthYear => (&caps[3], &caps[2], &caps[1]),
    };
    let year = expand_year(year, current_year)?;
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn find_date(env: &Environment, text: &str, format: DateFormat) -> Option<DateMatch> {
    let current_year = env.now().year();
    pattern_for(format).captures_iter(text).find_map(|caps| {
        let date = date_from_captures(&caps, format, current_year)?;
        let end = caps.get(0)?.end();
        Some(DateMatch { date, end })
    })
}

/// Find the first believable date in `text`, reading it in the environment's date format
pub fn parse_date(env: &Environment, text: &str) -> Result<NaiveDate, ValueError> {
    find_date(env, text, env.date_format())
        .map(|m| m.date)
        .ok_or_else(|| ValueError::conversion(format!("\"{text}\""), "date"))
}

/// Find the first believable time of day in `text`
///
/// Accepts `10`, `1030`, `10:30`, `10:30:45`, `10:30:45.123` with an optional
/// `am`/`pm` suffix. `24:00` is midnight.
pub fn parse_time(text: &str) -> Result<NaiveTime, ValueError> {
    TIME_OF_DAY
        .captures_iter(text)
        .find_map(|caps| time_from_captures(&caps))
        .ok_or_else(|| ValueError::conversion(format!("\"{text}\""), "time"))
}

fn time_from_captures(caps: &Captures<'_>) -> Option<NaiveTime> {
    let part = |i: usize| caps.get(i).map(|m| m.as_str());

    let mut hour: u32 = part(1)?.parse().ok()?;
    let minute: u32 = part(2).map_or(Some(0), |m| m.parse().ok())?;
    let second: u32 = part(3).map_or(Some(0), |s| s.parse().ok())?;
    let nanos: u32 = match part(4) {
        Some(frac) => {
            let mut digits: String = frac.chars().take(9).collect();
            while digits.len() < 9 {
                digits.push('0');
            }
            digits.parse().ok()?
        }
        None => 0,
    };

    if let Some(meridiem) = part(5) {
        if hour == 0 || hour > 12 {
            return None;
        }
        let pm = meridiem.eq_ignore_ascii_case("pm");
        if pm && hour < 12 {
            hour += 12;
        } else if !pm && hour == 12 {
            hour = 0;
        }
    }
    if hour == 24 {
        if minute != 0 || second != 0 || nanos != 0 {
            return None;
        }
        hour = 0;
    }

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

/// Parse a datetime from text
///
/// Tries RFC 3339, then ISO local datetimes, then a date in the environment's
/// format followed by an optional time, then an ISO date. Local values are
/// placed in the environment's timezone. When no time is found the time is
/// midnight, or the current time of day if `fill_time` is set.
pub fn parse_datetime(env: &Environment, text: &str, fill_time: bool) -> Result<DateTime, ValueError> {
    let trimmed = text.trim();
    let tz = env.timezone();

    if let Some(dt) = DateTime::parse_rfc3339(trimmed) {
        return Ok(dt);
    }
    for pattern in ISO_LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(DateTime::from_local(naive.date(), naive.time(), tz));
        }
    }

    let found = find_date(env, trimmed, env.date_format()).or_else(|| {
        (env.date_format() != DateFormat::YearMonthDay)
            .then(|| find_date(env, trimmed, DateFormat::YearMonthDay))
            .flatten()
    });
    let Some(DateMatch { date, end }) = found else {
        return Err(ValueError::conversion(format!("\"{text}\""), "datetime"));
    };

    let time = match parse_time(&trimmed[end..]) {
        Ok(time) => time,
        Err(_) if fill_time => env.now().time(),
        Err(_) => NaiveTime::MIN,
    };

    Ok(DateTime::from_local(date, time, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::FixedClock;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn env(format: DateFormat) -> Environment {
        Environment::builder()
            .date_format(format)
            .clock(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 15, 4, 5).unwrap()))
            .build()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(DateFormat::YearMonthDay, "2024-03-05", ymd(2024, 3, 5))]
    #[case(DateFormat::YearMonthDay, "on 1979/7/18!", ymd(1979, 7, 18))]
    #[case(DateFormat::DayMonthYear, "18.07.1979", ymd(1979, 7, 18))]
    #[case(DateFormat::DayMonthYear, "born 5 3 2020", ymd(2020, 3, 5))]
    #[case(DateFormat::MonthDayYear, "7/18/1979", ymd(1979, 7, 18))]
    #[case(DateFormat::MonthDayYear, "03_05_2024", ymd(2024, 3, 5))]
    fn test_parse_date(#[case] format: DateFormat, #[case] text: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(&env(format), text).unwrap(), expected);
    }

    #[rstest]
    #[case("18-07-79", ymd(1979, 7, 18))]
    #[case("18-07-24", ymd(2024, 7, 18))]
    #[case("01-01-25", ymd(1925, 1, 1))]
    #[case("01-01-05", ymd(2005, 1, 1))]
    fn test_two_digit_years(#[case] text: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date(&env(DateFormat::DayMonthYear), text).unwrap(), expected);
    }

    #[test]
    fn test_skips_unbelievable_dates() {
        let env = env(DateFormat::DayMonthYear);
        assert_eq!(parse_date(&env, "40-40-2020 or 02-03-2020").unwrap(), ymd(2020, 3, 2));
        assert!(parse_date(&env, "31-02-2020").is_err());
        assert!(parse_date(&env, "no date here").is_err());
    }

    #[rstest]
    #[case("10", 10, 0, 0, 0)]
    #[case("10:30", 10, 30, 0, 0)]
    #[case("1030", 10, 30, 0, 0)]
    #[case("10:30:45", 10, 30, 45, 0)]
    #[case("10:30:45.123", 10, 30, 45, 123_000_000)]
    #[case("4:30 pm", 16, 30, 0, 0)]
    #[case("4PM", 16, 0, 0, 0)]
    #[case("12:15 am", 0, 15, 0, 0)]
    #[case("12:15 pm", 12, 15, 0, 0)]
    #[case("24:00", 0, 0, 0, 0)]
    #[case("at 9:05 tonight", 9, 5, 0, 0)]
    fn test_parse_time(
        #[case] text: &str,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: u32,
        #[case] nano: u32,
    ) {
        let expected = NaiveTime::from_hms_nano_opt(hour, minute, second, nano).unwrap();
        assert_eq!(parse_time(text).unwrap(), expected);
    }

    #[rstest]
    #[case("25:00")]
    #[case("10:75")]
    #[case("24:30")]
    #[case("noon")]
    fn test_parse_time_rejects(#[case] text: &str) {
        assert!(parse_time(text).is_err());
    }

    #[test]
    fn test_parse_datetime() {
        let env = env(DateFormat::DayMonthYear);

        let dt = parse_datetime(&env, "2018-04-11T13:24:30.123456+02:00", false).unwrap();
        assert_eq!(dt.render(), "2018-04-11T13:24:30.123456+02:00");

        let dt = parse_datetime(&env, "2018-04-11T13:24:30", false).unwrap();
        assert_eq!(dt.render(), "2018-04-11T13:24:30.000000Z");

        let dt = parse_datetime(&env, "11.04.2018 1:24 pm", false).unwrap();
        assert_eq!(dt.render(), "2018-04-11T13:24:00.000000Z");

        let dt = parse_datetime(&env, "11.04.2018", false).unwrap();
        assert_eq!(dt.render(), "2018-04-11T00:00:00.000000Z");

        let dt = parse_datetime(&env, "11.04.2018", true).unwrap();
        assert_eq!(dt.render(), "2018-04-11T15:04:05.000000Z");

        let dt = parse_datetime(&env, "2018-04-11", false).unwrap();
        assert_eq!(dt.render(), "2018-04-11T00:00:00.000000Z");

        assert!(parse_datetime(&env, "tomorrow", false).is_err());
    }

    #[test]
    fn test_parse_datetime_in_timezone() {
        let env = Environment::builder()
            .timezone(chrono_tz::America::Los_Angeles)
            .build();
        let dt = parse_datetime(&env, "2024-01-15 10:00", false).unwrap();
        assert_eq!(dt.render(), "2024-01-15T10:00:00.000000-08:00");
    }
}
