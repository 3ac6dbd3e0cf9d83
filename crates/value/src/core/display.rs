//! Describing, rendering and formatting values
//!
//! - `describe` is a short label for error messages
//! - `render` is the canonical, locale independent text form
//! - `format` is the pretty form for display to end users, using the
//!   environment's formats
//!
//! The free functions accept `Option<&Value>` and handle nil.

use std::fmt;

use crate::core::value::Value;
use crate::environment::Environment;

impl Value {
    /// Short label used in error messages
    ///
    /// Text is quoted, numbers and booleans show their value, everything
    /// else its kind.
    pub fn describe(&self) -> String {
        match self {
            Self::Text(t) => t.describe(),
            Self::Number(n) => n.render(),
            Self::Boolean(b) => b.to_string(),
            other => other.kind().name().to_string(),
        }
    }

    /// Whether this value counts as true in a condition
    pub fn truthy(&self) -> bool {
        match self {
            Self::Text(t) => t.truthy(),
            Self::Number(n) => n.truthy(),
            Self::Boolean(b) => *b,
            Self::Date(d) => d.truthy(),
            Self::Time(t) => t.truthy(),
            Self::DateTime(dt) => dt.truthy(),
            Self::Array(a) => a.truthy(),
            Self::Object(o) => o.truthy(),
            Self::Error(_) => false,
            Self::Function(_) => true,
        }
    }

    /// Canonical text form
    pub fn render(&self) -> String {
        match self {
            Self::Text(t) => t.as_str().to_string(),
            Self::Number(n) => n.render(),
            Self::Boolean(b) => b.to_string(),
            Self::Date(d) => d.render(),
            Self::Time(t) => t.render(),
            Self::DateTime(dt) => dt.render(),
            Self::Array(a) => a.render(),
            Self::Object(o) => o.render(),
            Self::Error(e) => e.message(),
            Self::Function(f) => f.name().to_string(),
        }
    }

    /// Pretty form using the environment's formats
    pub fn format(&self, env: &Environment) -> String {
        match self {
            Self::Number(n) => n.format(env.number_format()),
            Self::Date(d) => d.format(env),
            Self::Time(t) => t.format(env),
            Self::DateTime(dt) => dt.format(env),
            Self::Array(a) => a.format(env),
            Self::Object(o) => o.format(env),
            other => other.render(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Describe a possibly nil value, nil is `null`
pub fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "null".to_string(), Value::describe)
}

/// Truthiness of a possibly nil value, nil is false
pub fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(Value::truthy)
}

/// Render a possibly nil value, nil is empty
pub fn render(value: Option<&Value>) -> String {
    value.map(Value::render).unwrap_or_default()
}

/// Format a possibly nil value, nil is empty
pub fn format(env: &Environment, value: Option<&Value>) -> String {
    value.map(|v| v.format(env)).unwrap_or_default()
}
