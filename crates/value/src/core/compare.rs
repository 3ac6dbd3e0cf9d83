//! Equality and ordering
//!
//! Equality is type strict: values of different kinds are never equal, so
//! `1` and `"1"` differ. Ordering is only defined between values of the same
//! orderable kind.

use std::cmp::Ordering;

use crate::core::display::describe;
use crate::core::value::Value;
use crate::error::{ValueError, XError, XResult};

/// Whether two possibly nil values are equal
pub fn equals(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Order two possibly nil values
///
/// An error operand is returned unchanged, left first. Nil only compares to
/// nil. Arrays, objects and functions have no order.
pub fn compare(a: Option<&Value>, b: Option<&Value>) -> XResult<Ordering> {
    if let Some(Value::Error(e)) = a {
        return Err(e.clone());
    }
    if let Some(Value::Error(e)) = b {
        return Err(e.clone());
    }

    let ordering = match (a, b) {
        (None, None) => Some(Ordering::Equal),
        (Some(Value::Boolean(x)), Some(Value::Boolean(y))) => Some(x.cmp(y)),
        (Some(Value::Number(x)), Some(Value::Number(y))) => Some(x.cmp(y)),
        (Some(Value::Text(x)), Some(Value::Text(y))) => Some(x.as_str().cmp(y.as_str())),
        (Some(Value::Date(x)), Some(Value::Date(y))) => Some(x.cmp(y)),
        (Some(Value::Time(x)), Some(Value::Time(y))) => Some(x.cmp(y)),
        (Some(Value::DateTime(x)), Some(Value::DateTime(y))) => Some(x.cmp(y)),
        _ => None,
    };

    ordering.ok_or_else(|| {
        let (left, right) = (describe(a), describe(b));
        tracing::trace!(%left, %right, "comparison failed");
        XError::new(ValueError::comparison(left, right))
    })
}

/// Whether a value is empty: nil, or text, array or object of length zero
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::Text(t)) => t.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(_) => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }
}
