//! The Value enum
//!
//! One closed set of runtime types. Every variant is cheap to clone: scalars
//! are small or `Arc`-backed and collections share their storage.

use rust_decimal::Decimal;

use crate::collections::{Array, Object};
use crate::core::kind::ValueKind;
use crate::error::{ValueError, XError};
use crate::function::Function;
use crate::scalar::{Number, Text};
use crate::temporal::{Date, DateTime, TimeOfDay};

/// Any non-nil value of the expression language
#[derive(Debug, Clone)]
pub enum Value {
    /// UTF-8 text
    Text(Text),

    /// Arbitrary precision decimal
    Number(Number),

    /// `true` or `false`
    Boolean(bool),

    /// Calendar date
    Date(Date),

    /// Time of day
    Time(TimeOfDay),

    /// Instant with display offset
    DateTime(DateTime),

    /// Ordered list of possibly nil values
    Array(Array),

    /// Property map, possibly lazy
    Object(Object),

    /// A failure flowing through computation
    Error(XError),

    /// A named callable
    Function(Function),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a text value
    pub fn text(s: impl Into<Text>) -> Self {
        Self::Text(s.into())
    }

    /// Create a number value
    pub fn number(n: impl Into<Number>) -> Self {
        Self::Number(n.into())
    }

    /// Create a boolean value
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Create an error value
    pub fn error(err: impl Into<XError>) -> Self {
        Self::Error(err.into())
    }

    /// Create an error value from a message
    pub fn error_msg(msg: impl Into<String>) -> Self {
        Self::Error(XError::msg(msg))
    }

    /// Create an array from non-nil values
    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Array(Array::from_values(values))
    }

    // ==================== Type checks ====================

    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Number(_) => ValueKind::Number,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Error(_) => ValueKind::Error,
            Self::Function(_) => ValueKind::Function,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    // ==================== Accessors ====================

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&XError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

// ==================== From implementations ====================

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Self::Text(t)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(Text::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(Text::from(s))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Number(Number::new(d))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Number(Number::from_i64(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Number(Number::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Self::Date(d)
    }
}

impl From<TimeOfDay> for Value {
    fn from(t: TimeOfDay) -> Self {
        Self::Time(t)
    }
}

impl From<DateTime> for Value {
    fn from(dt: DateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<XError> for Value {
    fn from(e: XError) -> Self {
        Self::Error(e)
    }
}

impl From<ValueError> for Value {
    fn from(e: ValueError) -> Self {
        Self::Error(XError::new(e))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}
