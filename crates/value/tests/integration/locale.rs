//! Locale sensitive conversions driven by environment configuration

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rivulet_value::{
    DateFormat, Environment, FixedClock, Value, format, to_date, to_datetime,
    to_datetime_with_time_fill, to_json, to_number, to_time, write_internal_json,
};
use rstest::rstest;

fn env_from(json: &str) -> Environment {
    Environment::from_json(json).unwrap()
}

#[rstest]
#[case(r#"{}"#, "1,234.56", "1234.56")]
#[case(r#"{}"#, "l2O", "120")]
#[case(r#"{"number_format": {"decimal_symbol": ",", "digit_grouping_symbol": "."}}"#, "1.234,56", "1234.56")]
#[case(r#"{"number_format": {"decimal_symbol": ",", "digit_grouping_symbol": " "}}"#, "1 234,5", "1234.5")]
fn test_fuzzy_numbers(#[case] config: &str, #[case] input: &str, #[case] expected: &str) {
    let env = env_from(config);
    let parsed = to_number(&env, Some(&Value::text(input))).unwrap();
    assert_eq!(parsed.render(), expected);
}

#[rstest]
#[case("YYYY-MM-DD", "2020-03-05")]
#[case("DD-MM-YYYY", "05.03.2020")]
#[case("MM-DD-YYYY", "3/5/2020")]
fn test_dates_in_each_format(#[case] date_format: &str, #[case] input: &str) {
    let env = env_from(&format!(r#"{{"date_format": "{date_format}"}}"#));
    let date = to_date(&env, Some(&Value::text(input))).unwrap();
    assert_eq!(date.render(), "2020-03-05");
}

#[test]
fn test_time_parsing_with_meridiem() {
    let env = Environment::default();
    let time = to_time(&env, Some(&Value::text("it's 5:45 PM"))).unwrap();
    assert_eq!(time.render(), "17:45:00.000000");
}

#[test]
fn test_time_fill_uses_clock() {
    let env = Environment::builder()
        .date_format(DateFormat::DayMonthYear)
        .timezone(chrono_tz::Africa::Kigali)
        .clock(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 8, 15, 0).unwrap()))
        .build();
    let text = Value::text("25/12/2023");

    let midnight = to_datetime(&env, Some(&text)).unwrap();
    assert_eq!(midnight.render(), "2023-12-25T00:00:00.000000+02:00");

    let filled = to_datetime_with_time_fill(&env, Some(&text)).unwrap();
    assert_eq!(filled.render(), "2023-12-25T10:15:00.000000+02:00");
}

#[test]
fn test_datetime_json_divergence() {
    let env = env_from(r#"{"timezone": "America/Guayaquil", "date_format": "DD-MM-YYYY"}"#);
    let value = Value::DateTime(
        to_datetime(&env, Some(&Value::text("2018-04-11T18:24:30.123456Z"))).unwrap(),
    );

    assert_eq!(value.render(), "2018-04-11T18:24:30.123456Z");
    assert_eq!(
        write_internal_json(Some(&value)).unwrap(),
        r#""2018-04-11T18:24:30.123456Z""#
    );
    assert_eq!(
        to_json(&env, Some(&value)).unwrap(),
        r#""2018-04-11T13:24:30.123456-05:00""#
    );
    assert_eq!(format(&env, Some(&value)), "11-04-2018 13:24");
}
