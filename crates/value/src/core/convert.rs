//! The conversion engine
//!
//! Every `to_*` function follows the same steps:
//!
//! 1. nil converts to the zero of the target type (dates and datetimes have
//!    no sensible zero and fail instead)
//! 2. an error value is returned unchanged as the `Err`
//! 3. a value already of the target type is passed through
//! 4. otherwise the cross-type rules of the target are tried, failing with
//!    `unable to convert <describe> to a <type>`
//!
//! Objects with a default value convert as their default for the scalar
//! targets.

use chrono::NaiveTime;

use crate::collections::{Array, Object};
use crate::core::display::describe;
use crate::core::value::Value;
use crate::dates;
use crate::environment::Environment;
use crate::error::{ValueError, XError, XResult};
use crate::scalar::{Number, Text};
use crate::temporal::{Date, DateTime, TimeOfDay};

fn conversion_error(value: Option<&Value>, target: &'static str) -> XError {
    let description = describe(value);
    tracing::trace!(value = %description, target, "conversion failed");
    XError::new(ValueError::conversion(description, target))
}

/// Convert to text, the canonical render of any value
pub fn to_text(_env: &Environment, value: Option<&Value>) -> XResult<Text> {
    match value {
        None => Ok(Text::empty()),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::Text(t)) => Ok(t.clone()),
        Some(other) => Ok(Text::from(other.render())),
    }
}

/// Convert to a boolean, the truthiness of any value
pub fn to_boolean(_env: &Environment, value: Option<&Value>) -> XResult<bool> {
    match value {
        None => Ok(false),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(other) => Ok(other.truthy()),
    }
}

/// Convert to a number
///
/// Text is parsed fuzzily using the environment's number format.
pub fn to_number(env: &Environment, value: Option<&Value>) -> XResult<Number> {
    match value {
        None => Ok(Number::ZERO),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::Number(n)) => Ok(*n),
        Some(Value::Text(t)) => Number::parse_fuzzy(t, env.number_format()).map_err(|err| {
            tracing::trace!(value = %t.describe(), error = %err, "number parse failed");
            XError::new(err)
        }),
        Some(Value::Object(o)) if o.has_default() => to_number(env, o.default_value()),
        Some(_) => Err(conversion_error(value, "number")),
    }
}

/// Convert to a number, then to the integer part if it fits in an `i32`
pub fn to_integer(env: &Environment, value: Option<&Value>) -> XResult<i32> {
    to_number(env, value)?.to_i32().map_err(XError::new)
}

/// Convert to a date
///
/// Text is parsed using the environment's date format.
pub fn to_date(env: &Environment, value: Option<&Value>) -> XResult<Date> {
    match value {
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::Date(d)) => Ok(*d),
        Some(Value::DateTime(dt)) => Ok(dt.date()),
        Some(Value::Text(t)) => dates::parse_date(env, t)
            .map(Date::new)
            .map_err(|_| conversion_error(value, "date")),
        Some(Value::Object(o)) if o.has_default() => to_date(env, o.default_value()),
        _ => Err(conversion_error(value, "date")),
    }
}

/// Convert to a time of day
///
/// Whole numbers 0 to 23 are read as that hour, 24 as midnight.
pub fn to_time(env: &Environment, value: Option<&Value>) -> XResult<TimeOfDay> {
    match value {
        None => Ok(TimeOfDay::ZERO),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::Time(t)) => Ok(*t),
        Some(Value::DateTime(dt)) => Ok(dt.time()),
        Some(Value::Number(n)) => n
            .to_i32()
            .ok()
            .filter(|hour| n.trunc() == *n && (0..=24).contains(hour))
            .and_then(|hour| NaiveTime::from_hms_opt(hour.unsigned_abs() % 24, 0, 0))
            .map(TimeOfDay::new)
            .ok_or_else(|| conversion_error(value, "time")),
        Some(Value::Text(t)) => dates::parse_time(t)
            .map(TimeOfDay::new)
            .map_err(|_| conversion_error(value, "time")),
        Some(Value::Object(o)) if o.has_default() => to_time(env, o.default_value()),
        Some(_) => Err(conversion_error(value, "time")),
    }
}

/// Convert to a datetime
///
/// Dates become midnight in the environment's timezone, text is parsed with
/// a missing time read as midnight.
pub fn to_datetime(env: &Environment, value: Option<&Value>) -> XResult<DateTime> {
    datetime(env, value, false)
}

/// Like [`to_datetime`] but text without a time takes the current time of day
pub fn to_datetime_with_time_fill(env: &Environment, value: Option<&Value>) -> XResult<DateTime> {
    datetime(env, value, true)
}

fn datetime(env: &Environment, value: Option<&Value>, fill_time: bool) -> XResult<DateTime> {
    match value {
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::DateTime(dt)) => Ok(*dt),
        Some(Value::Date(d)) => Ok(DateTime::from_local(d.naive(), NaiveTime::MIN, env.timezone())),
        Some(Value::Text(t)) => dates::parse_datetime(env, t, fill_time)
            .map_err(|_| conversion_error(value, "datetime")),
        Some(Value::Object(o)) if o.has_default() => datetime(env, o.default_value(), fill_time),
        _ => Err(conversion_error(value, "datetime")),
    }
}

/// Convert to an object, only objects convert
pub fn to_object(_env: &Environment, value: Option<&Value>) -> XResult<Object> {
    match value {
        None => Ok(Object::new()),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::Object(o)) => Ok(o.clone()),
        Some(_) => Err(conversion_error(value, "object")),
    }
}

/// Convert to an array, only arrays convert
pub fn to_array(_env: &Environment, value: Option<&Value>) -> XResult<Array> {
    match value {
        None => Ok(Array::new()),
        Some(Value::Error(e)) => Err(e.clone()),
        Some(Value::Array(a)) => Ok(a.clone()),
        Some(_) => Err(conversion_error(value, "array")),
    }
}
