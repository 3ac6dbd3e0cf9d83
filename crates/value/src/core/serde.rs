//! JSON forms of values
//!
//! There are two encoders:
//!
//! - internal JSON, the [`Serialize`] impl, used for persistence. It is
//!   lossless for everything except functions (encoded as their name). A
//!   top-level error can't be written; errors nested in arrays or objects are
//!   dropped (`null` in arrays, omitted from objects).
//! - exported JSON, [`to_json`], produced for expressions. Datetimes are shown
//!   in the environment's timezone and nested errors are dropped the same way.
//!
//! [`read_value`] and [`from_json_value`] decode JSON back into values.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::collections::object::DEFAULT_KEY;
use crate::collections::{Array, Object};
use crate::core::value::Value;
use crate::environment::Environment;
use crate::error::{ValueError, XError, XResult};
use crate::scalar::{Number, Text};

// ==================== Internal JSON ====================

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Goes through serde_json's own number type so the digits are written verbatim
        let number = serde_json::Number::from_str(&self.render()).map_err(S::Error::custom)?;
        number.serialize(serializer)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(t) => serializer.serialize_str(t),
            Self::Number(n) => n.serialize(serializer),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Date(d) => serializer.serialize_str(&d.render()),
            Self::Time(t) => serializer.serialize_str(&t.render()),
            Self::DateTime(dt) => serializer.serialize_str(&dt.render()),
            Self::Array(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for item in a.iter() {
                    match item {
                        None | Some(Self::Error(_)) => seq.serialize_element(&())?,
                        Some(value) => seq.serialize_element(value)?,
                    }
                }
                seq.end()
            }
            Self::Object(o) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in o.iter() {
                    match value {
                        Some(Self::Error(_)) => {}
                        None => map.serialize_entry(key, &())?,
                        Some(value) => map.serialize_entry(key, value)?,
                    }
                }
                if o.marshal_default()
                    && let Some(default) = o.default_value()
                    && !default.is_error()
                {
                    map.serialize_entry(DEFAULT_KEY, default)?;
                }
                map.end()
            }
            Self::Error(e) => Err(S::Error::custom(format!(
                "unable to serialize error value: {e}"
            ))),
            Self::Function(f) => serializer.serialize_str(f.name()),
        }
    }
}

/// Internal JSON of a possibly nil value
pub fn write_internal_json(value: Option<&Value>) -> Result<String, ValueError> {
    serde_json::to_string(&value).map_err(|err| ValueError::serialization(err.to_string()))
}

// ==================== Exported JSON ====================

struct Exported<'a> {
    env: &'a Environment,
    value: &'a Value,
}

impl Serialize for Exported<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.value {
            Value::DateTime(dt) => {
                serializer.serialize_str(&dt.in_timezone(self.env.timezone()).render())
            }
            Value::Array(a) => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for item in a.iter() {
                    match item {
                        None | Some(Value::Error(_)) => seq.serialize_element(&())?,
                        Some(value) => seq.serialize_element(&self.nested(value))?,
                    }
                }
                seq.end()
            }
            Value::Object(o) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in o.iter() {
                    match value {
                        Some(Value::Error(_)) => {}
                        None => map.serialize_entry(key, &())?,
                        Some(value) => map.serialize_entry(key, &self.nested(value))?,
                    }
                }
                if o.marshal_default()
                    && let Some(default) = o.default_value()
                    && !default.is_error()
                {
                    map.serialize_entry(DEFAULT_KEY, &self.nested(default))?;
                }
                map.end()
            }
            other => other.serialize(serializer),
        }
    }
}

impl<'a> Exported<'a> {
    fn nested(&self, value: &'a Value) -> Self {
        Self {
            env: self.env,
            value,
        }
    }
}

impl Value {
    /// Exported JSON of this value
    pub fn to_json(&self, env: &Environment) -> XResult<String> {
        if let Self::Error(e) = self {
            return Err(e.clone());
        }
        serde_json::to_string(&Exported { env, value: self })
            .map_err(|err| XError::new(ValueError::serialization(err.to_string())))
    }
}

/// Exported JSON of a possibly nil value, nil is `null`
pub fn to_json(env: &Environment, value: Option<&Value>) -> XResult<String> {
    value.map_or_else(|| Ok("null".to_string()), |v| v.to_json(env))
}

// ==================== Decoding ====================

/// Decode a value from JSON bytes, `null` is nil
pub fn read_value(data: &[u8]) -> Result<Option<Value>, ValueError> {
    let json: serde_json::Value =
        serde_json::from_slice(data).map_err(|err| ValueError::serialization(err.to_string()))?;
    from_json_value(&json)
}

/// Convert parsed JSON to a value, `null` is nil
pub fn from_json_value(json: &serde_json::Value) -> Result<Option<Value>, ValueError> {
    Ok(match json {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
        serde_json::Value::Number(n) => Some(Value::Number(number_from_json(n)?)),
        serde_json::Value::String(s) => Some(Value::Text(Text::from(s.as_str()))),
        serde_json::Value::Array(items) => {
            let items = items
                .iter()
                .map(from_json_value)
                .collect::<Result<Vec<_>, _>>()?;
            Some(Value::Array(Array::from_vec(items)))
        }
        serde_json::Value::Object(entries) => {
            let mut builder = Object::builder();
            for (key, value) in entries {
                builder = match from_json_value(value)? {
                    Some(value) => builder.insert(key.as_str(), value),
                    None => builder.insert_nil(key.as_str()),
                };
            }
            Some(Value::Object(builder.build()))
        }
    })
}

fn number_from_json(n: &serde_json::Number) -> Result<Number, ValueError> {
    let digits = n.to_string();
    let parsed = if digits.contains(['e', 'E']) {
        Decimal::from_scientific(&digits)
    } else {
        Decimal::from_str(&digits)
    };
    parsed
        .map(Number::new)
        .map_err(|_| ValueError::serialization(format!("number {digits} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use crate::temporal::{Date, DateTime, TimeOfDay};
    use pretty_assertions::assert_eq;

    fn internal(value: &Value) -> String {
        write_internal_json(Some(value)).unwrap()
    }

    #[test]
    fn test_internal_scalars() {
        assert_eq!(write_internal_json(None).unwrap(), "null");
        assert_eq!(internal(&Value::text("a\"b")), r#""a\"b""#);
        assert_eq!(internal(&Value::Number(Number::parse("123.4500").unwrap())), "123.45");
        assert_eq!(
            internal(&Value::Number(Number::parse("0.1234567890123456789").unwrap())),
            "0.1234567890123456789"
        );
        assert_eq!(internal(&Value::from(true)), "true");
        assert_eq!(
            internal(&Value::Date(Date::from_ymd(2020, 1, 2).unwrap())),
            r#""2020-01-02""#
        );
        assert_eq!(
            internal(&Value::Time(TimeOfDay::from_hms_nano(8, 5, 0, 0).unwrap())),
            r#""08:05:00.000000""#
        );
        let noop = Function::new("noop", |_: &Environment, _: &[Option<Value>]| None);
        assert_eq!(internal(&Value::Function(noop)), r#""noop""#);
    }

    #[test]
    fn test_internal_collections() {
        let obj = Object::builder()
            .insert("b", Value::from(1))
            .insert("a", Value::array([Value::text("x")]))
            .insert_nil("c")
            .build();
        assert_eq!(
            internal(&Value::Object(obj)),
            r#"{"b":1,"a":["x"],"c":null}"#
        );
        let arr = Value::Array(Array::from_vec(vec![None, Some(Value::from(2))]));
        assert_eq!(internal(&arr), "[null,2]");
    }

    #[test]
    fn test_internal_default_only_when_marked() {
        let base = Object::builder()
            .insert("x", Value::from(1))
            .default_value(Value::text("d"));
        assert_eq!(internal(&Value::Object(base.clone().build())), r#"{"x":1}"#);
        assert_eq!(
            internal(&Value::Object(base.marshal_default(true).build())),
            r#"{"x":1,"__default__":"d"}"#
        );
    }

    #[test]
    fn test_internal_drops_nested_errors() {
        let err = write_internal_json(Some(&Value::error_msg("boom"))).unwrap_err();
        assert!(matches!(err, ValueError::Serialization(_)));

        let nested = Value::array([Value::from(1), Value::error_msg("boom")]);
        assert_eq!(internal(&nested), "[1,null]");

        let contact = Object::builder()
            .insert("name", Value::text("Bob"))
            .insert("age", Value::error_msg("unable to convert \"x\" to a number"))
            .insert("tags", nested)
            .default_value(Value::error_msg("boom"))
            .marshal_default(true)
            .build();
        assert_eq!(
            internal(&Value::Object(contact)),
            r#"{"name":"Bob","tags":[1,null]}"#
        );
    }

    #[test]
    fn test_exported_json() {
        let env = Environment::builder()
            .timezone(chrono_tz::America::Guayaquil)
            .build();
        let dt = Value::DateTime(DateTime::parse_rfc3339("2018-04-11T18:24:30Z").unwrap());

        assert_eq!(internal(&dt), r#""2018-04-11T18:24:30.000000Z""#);
        assert_eq!(dt.to_json(&env).unwrap(), r#""2018-04-11T13:24:30.000000-05:00""#);
        assert_eq!(to_json(&env, None).unwrap(), "null");

        let boom = XError::msg("boom");
        assert_eq!(to_json(&env, Some(&Value::Error(boom.clone()))).unwrap_err(), boom);

        let arr = Value::array([Value::from(1), Value::Error(boom.clone()), dt.clone()]);
        assert_eq!(
            arr.to_json(&env).unwrap(),
            r#"[1,null,"2018-04-11T13:24:30.000000-05:00"]"#
        );

        let obj = Value::Object(
            Object::builder()
                .insert("ok", Value::text("yes"))
                .insert("bad", Value::Error(boom))
                .build(),
        );
        assert_eq!(obj.to_json(&env).unwrap(), r#"{"ok":"yes"}"#);
    }

    #[test]
    fn test_read_value() {
        let value = read_value(br#"{"name":"Bob","age":33.50,"tags":["a",null],"ok":true,"big":1e3}"#)
            .unwrap()
            .unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["name", "age", "tags", "ok", "big"]);
        assert_eq!(obj.get("age"), Some(Some(&Value::Number(Number::parse("33.5").unwrap()))));
        assert_eq!(obj.get("big"), Some(Some(&Value::from(1000))));
        assert_eq!(
            obj.get("tags"),
            Some(Some(&Value::Array(Array::from_vec(vec![Some(Value::text("a")), None]))))
        );

        assert_eq!(read_value(b"null").unwrap(), None);
        assert!(read_value(b"{not json").is_err());
    }

    #[test]
    fn test_round_trip_bytes() {
        let json = r#"{"a":[1,2.5,"x",null,{"b":false}],"c":"d"}"#;
        let value = read_value(json.as_bytes()).unwrap();
        assert_eq!(write_internal_json(value.as_ref()).unwrap(), json);
    }
}
