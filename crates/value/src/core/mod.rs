//! Core building blocks of the value domain
//!
//! ### [`value`] - The Value enum
//!
//! The closed set of runtime types. Nil is not a variant: APIs take and
//! return `Option<Value>` / `Option<&Value>`, `None` being nil.
//!
//! ### [`display`] - describe, truthy, render, format
//!
//! The uniform interface every value implements, plus free functions that
//! handle the nil case.
//!
//! ### [`convert`] - The conversion engine
//!
//! Coercion of any value to a target type, with the environment supplying
//! locale conventions.
//!
//! ### [`compare`] - Equality and ordering
//!
//! ### [`serde`] - Internal and exported JSON, and decoding
//!
//! ### [`ops`] - Operator lifting and the operator registry
//!
//! ### [`traits`] - Property and index resolution
pub mod compare;
pub mod convert;
pub mod display;
pub mod kind;
pub mod ops;
pub mod serde;
pub mod traits;
pub mod value;

pub use kind::ValueKind;
pub use value::Value;
