//! Value Error Types
//!
//! Failures in the value domain are ordinary data: a [`ValueError`] is wrapped
//! in an [`XError`], which is both the payload of [`Value::Error`](crate::Value::Error)
//! and the `Err` side of every conversion.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Everything that can go wrong inside the value domain
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Source value could not be coerced to the requested type
    #[error("unable to convert {value} to {}", with_article(.target))]
    Conversion { value: String, target: &'static str },

    /// Number too large or small for an integer
    #[error("number value {value} is out of range for an integer")]
    OutOfRange { value: String },

    /// Named property lookup failed
    #[error("{container} has no property '{key}'")]
    Resolution { container: String, key: String },

    /// Index lookup failed
    #[error("index {index} out of range for {length} items")]
    IndexOutOfRange { index: i64, length: usize },

    /// Two values can't be ordered against each other
    #[error("can't compare {left} with {right}")]
    Comparison { left: String, right: String },

    /// Attempt to produce JSON from something that has no JSON form
    #[error("unable to serialize to JSON: {0}")]
    Serialization(String),

    /// Operator lookup failed
    #[error("no such operator '{0}'")]
    UnknownOperator(String),

    /// Free-form failure raised by an operation
    #[error("{0}")]
    Message(String),
}

fn with_article(target: &str) -> String {
    match target.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => format!("an {target}"),
        _ => format!("a {target}"),
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValueError {
    /// Create a conversion error
    pub fn conversion(value: impl Into<String>, target: &'static str) -> Self {
        Self::Conversion {
            value: value.into(),
            target,
        }
    }

    /// Create an integer range error
    pub fn out_of_range(value: impl Into<String>) -> Self {
        Self::OutOfRange {
            value: value.into(),
        }
    }

    /// Create a property resolution error
    pub fn resolution(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Resolution {
            container: container.into(),
            key: key.into(),
        }
    }

    /// Create an index error
    pub fn index_out_of_range(index: i64, length: usize) -> Self {
        Self::IndexOutOfRange { index, length }
    }

    /// Create a comparison error
    pub fn comparison(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Comparison {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization(reason.into())
    }

    /// Create a free-form error
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    /// Broad category, mostly useful for tests and diagnostics
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Conversion { .. } | Self::OutOfRange { .. } => ErrorCategory::Conversion,
            Self::Resolution { .. } | Self::IndexOutOfRange { .. } => ErrorCategory::Resolution,
            Self::Comparison { .. } => ErrorCategory::Comparison,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::UnknownOperator(_) | Self::Message(_) => ErrorCategory::Operation,
        }
    }
}

/// Error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Conversion,
    Resolution,
    Comparison,
    Serialization,
    Operation,
}

// ============================================================================
// ERROR AS VALUE
// ============================================================================

/// An error flowing through computation as a value
///
/// Cloning is cheap; two errors are equal when their messages are.
#[derive(Clone)]
pub struct XError {
    inner: Arc<ValueError>,
}

impl XError {
    pub fn new(err: ValueError) -> Self {
        Self {
            inner: Arc::new(err),
        }
    }

    /// Create a free-form error from a message
    pub fn msg(msg: impl Into<String>) -> Self {
        Self::new(ValueError::message(msg))
    }

    /// The underlying error
    #[inline]
    pub fn kind(&self) -> &ValueError {
        &self.inner
    }

    /// The rendered message
    pub fn message(&self) -> String {
        self.inner.to_string()
    }
}

impl From<ValueError> for XError {
    fn from(err: ValueError) -> Self {
        Self::new(err)
    }
}

impl PartialEq for XError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.message() == other.message()
    }
}

impl Eq for XError {}

impl fmt::Display for XError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for XError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XError({})", self.inner)
    }
}

impl std::error::Error for XError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

/// Result type used throughout the conversion layer
pub type XResult<T> = Result<T, XError>;
