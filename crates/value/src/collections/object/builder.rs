//! Builder pattern for Object construction

use super::{Materialized, Object, Properties};
use crate::core::Value;

/// Builder for creating eager objects
///
/// # Examples
///
/// ```
/// use rivulet_value::{Object, Value};
///
/// let object = Object::builder()
///     .insert("name", Value::text("Alice"))
///     .insert_nil("email")
///     .default_value(Value::text("Alice"))
///     .build();
///
/// assert_eq!(object.len(), 2);
/// assert_eq!(object.render(), "Alice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    properties: Properties,
    default: Option<Value>,
    marshal_default: bool,
}

impl ObjectBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            properties: Properties::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Insert a property, replacing any existing one with the same key
    pub fn insert(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), Some(value));
        self
    }

    /// Insert a nil property
    pub fn insert_nil(mut self, key: impl Into<String>) -> Self {
        self.properties.insert(key.into(), None);
        self
    }

    /// Insert multiple properties
    pub fn extend<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<Value>)>,
    {
        self.properties.extend(entries);
        self
    }

    /// Set the value standing in for the object
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Include the default in internal JSON under `__default__`
    pub fn marshal_default(mut self, marshal: bool) -> Self {
        self.marshal_default = marshal;
        self
    }

    /// Get the current number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Build the object
    pub fn build(self) -> Object {
        Object::eager(
            Materialized::from_properties(self.properties, self.default),
            self.marshal_default,
        )
    }
}
