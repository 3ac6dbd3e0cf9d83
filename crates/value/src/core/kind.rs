//! Value kinds
//!
//! `ValueKind` is a lightweight classification of a [`Value`], used for
//! describing values in errors and for dispatch in tests and tooling.

use std::fmt::{self, Display, Formatter};

use crate::core::Value;

/// The kind of a value, with `Nil` for absence
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ValueKind {
    Nil,
    Text,
    Number,
    Boolean,
    Date,
    Time,
    DateTime,
    Array,
    Object,
    Error,
    Function,
}

impl ValueKind {
    /// Kind of a possibly nil value
    pub fn of(value: Option<&Value>) -> Self {
        value.map_or(Self::Nil, Value::kind)
    }

    /// Lowercase name used in messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Nil => "null",
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Array => "array",
            Self::Object => "object",
            Self::Error => "error",
            Self::Function => "function",
        }
    }

    /// Whether values of this kind have a total order among themselves
    pub const fn is_orderable(&self) -> bool {
        matches!(
            self,
            Self::Nil
                | Self::Text
                | Self::Number
                | Self::Boolean
                | Self::Date
                | Self::Time
                | Self::DateTime
        )
    }

    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::DateTime)
    }

    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
