//! Value domain of the Rivulet expression language
//!
//! Expressions such as `contact.fields.age + 1` are evaluated against a small,
//! closed set of dynamically typed values: text, number, boolean, date, time,
//! datetime, array, object, error and function. Nil is absence, written as
//! `Option<Value>`.
//!
//! The crate provides:
//!
//! - the [`Value`] enum and its uniform interface (`describe`, `truthy`,
//!   `render`, `format`)
//! - the conversion engine ([`to_number`], [`to_datetime`], ...), driven by an
//!   [`Environment`] for locale and timezone conventions
//! - type strict equality and ordering ([`equals`], [`compare`])
//! - internal JSON for persistence and exported JSON for expressions
//! - lifted operators and property/index resolution
//!
//! Failures are values: a conversion that fails produces an [`XError`], which
//! flows through operators as [`Value::Error`] instead of aborting evaluation.
//!
//! ```
//! use rivulet_value::prelude::*;
//!
//! let env = Environment::default();
//! let sum = ops::add(&env, Some(&Value::text("1O")), Some(&Value::from(5)));
//! assert_eq!(render(sum.as_ref()), "15");
//!
//! let failed = ops::divide(&env, sum.as_ref(), Some(&Value::from(0)));
//! assert_eq!(render(failed.as_ref()), "division by zero");
//! ```
#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod collections;
pub mod core;
pub mod dates;
pub mod environment;
pub mod error;
pub mod function;
pub mod scalar;
pub mod temporal;

// Re-export core types
pub use crate::core::compare::{compare, equals, is_empty};
pub use crate::core::convert::{
    to_array, to_boolean, to_date, to_datetime, to_datetime_with_time_fill, to_integer,
    to_number, to_object, to_text, to_time,
};
pub use crate::core::display::{describe, format, render, truthy};
pub use crate::core::ops;
pub use crate::core::ops::OperatorRegistry;
pub use crate::core::serde::{from_json_value, read_value, to_json, write_internal_json};
pub use crate::core::traits::{Indexable, Lengthable, Resolvable, index, resolve};
pub use crate::core::{Value, ValueKind};

// Re-export scalar, temporal and collection types
pub use collections::{Array, Object, ObjectBuilder};
pub use environment::{
    Clock, DateFormat, Environment, EnvironmentBuilder, EnvironmentConfig, EnvironmentError,
    FixedClock, NumberFormat, SystemClock, TimeFormat,
};
pub use error::{ValueError, XError, XResult};
pub use function::Function;
pub use scalar::{Number, Text};
pub use temporal::{Date, DateTime, TimeOfDay};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Array, Function, Number, Object, Text, Value, ValueError, XError, XResult};
    pub use crate::{Date, DateTime, TimeOfDay};
    pub use crate::{Environment, OperatorRegistry};
    pub use crate::{describe, format, render, truthy};
    pub use crate::{compare, equals, ops};
}
