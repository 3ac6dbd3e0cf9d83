//! Objects: insertion-ordered property maps
//!
//! An object is either eager, holding its properties from construction, or
//! lazy, holding a producer that is run the first time anything needs the
//! properties. The producer runs at most once, even when several threads
//! race to read the object, and the result is shared by every clone.
//!
//! Property lookup is exact first, then case-insensitive.

mod builder;

pub use builder::ObjectBuilder;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::core::Value;
use crate::core::display::{format, render};
use crate::environment::Environment;

/// Reserved key a producer uses to supply the object's default value
pub const DEFAULT_KEY: &str = "__default__";

/// Property map of an object
pub type Properties = IndexMap<String, Option<Value>>;

/// Function producing the properties of a lazy object
pub type ObjectProducer = Box<dyn FnOnce() -> Properties + Send + 'static>;

struct Materialized {
    properties: Properties,
    default: Option<Value>,
}

impl Materialized {
    fn from_properties(mut properties: Properties, default: Option<Value>) -> Self {
        let produced_default = properties.shift_remove(DEFAULT_KEY).flatten();
        Self {
            properties,
            default: default.or(produced_default),
        }
    }
}

struct ObjectInner {
    state: OnceCell<Materialized>,
    producer: Mutex<Option<ObjectProducer>>,
    marshal_default: bool,
}

/// A map of named properties with an optional default value
#[derive(Clone)]
pub struct Object {
    inner: Arc<ObjectInner>,
}

impl Object {
    /// Create an empty object
    #[must_use]
    pub fn new() -> Self {
        Self::from_properties(Properties::new())
    }

    /// Create an eager object
    pub fn from_properties(properties: Properties) -> Self {
        Self::eager(Materialized::from_properties(properties, None), false)
    }

    /// Create an eager object that stands in as `default` when rendered or converted
    pub fn with_default(properties: Properties, default: Value) -> Self {
        Self::eager(Materialized::from_properties(properties, Some(default)), false)
    }

    /// Create a lazy object
    ///
    /// `producer` may emit a `__default__` property to supply the default value.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: FnOnce() -> Properties + Send + 'static,
    {
        Self {
            inner: Arc::new(ObjectInner {
                state: OnceCell::new(),
                producer: Mutex::new(Some(Box::new(producer))),
                marshal_default: false,
            }),
        }
    }

    /// Create a builder for objects
    pub fn builder() -> ObjectBuilder {
        ObjectBuilder::new()
    }

    fn eager(state: Materialized, marshal_default: bool) -> Self {
        Self {
            inner: Arc::new(ObjectInner {
                state: OnceCell::with_value(state),
                producer: Mutex::new(None),
                marshal_default,
            }),
        }
    }

    fn state(&self) -> &Materialized {
        self.inner.state.get_or_init(|| {
            let producer = self.inner.producer.lock().take();
            let properties = producer.map(|produce| produce()).unwrap_or_default();
            let state = Materialized::from_properties(properties, None);
            tracing::debug!(
                properties = state.properties.len(),
                has_default = state.default.is_some(),
                "lazy object materialized"
            );
            state
        })
    }

    /// Whether the properties have been produced yet
    pub fn is_materialized(&self) -> bool {
        self.inner.state.get().is_some()
    }

    /// All properties, in insertion order
    pub fn properties(&self) -> &Properties {
        &self.state().properties
    }

    /// Look up a property, `None` if there is no such key
    pub fn get(&self, key: &str) -> Option<Option<&Value>> {
        let properties = self.properties();
        if let Some(value) = properties.get(key) {
            return Some(value.as_ref());
        }
        let folded = key.to_lowercase();
        properties
            .iter()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(_, v)| v.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties().keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.properties()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.properties().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value standing in for this object, if any
    pub fn default_value(&self) -> Option<&Value> {
        self.state().default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default_value().is_some()
    }

    /// Whether internal JSON includes the default under `__default__`
    pub fn marshal_default(&self) -> bool {
        self.inner.marshal_default
    }

    pub fn truthy(&self) -> bool {
        match self.default_value() {
            Some(default) => default.truthy(),
            None => !self.is_empty(),
        }
    }

    /// The default's render, or `{k: v, k2: v2}`
    pub fn render(&self) -> String {
        if let Some(default) = self.default_value() {
            return default.render();
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(k, v)| format!("{k}: {}", render(v)))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }

    /// The default's format, or one `key: value` line per property
    ///
    /// A value spanning lines starts on the line after its key, indented.
    pub fn format(&self, env: &Environment) -> String {
        if let Some(default) = self.default_value() {
            return default.format(env);
        }
        self.iter()
            .map(|(k, v)| {
                let formatted = format(env, v);
                if formatted.contains('\n') {
                    let indented: Vec<String> = formatted.lines().map(|line| format!("  {line}")).collect();
                    format!("{k}:\n{}", indented.join("\n"))
                } else {
                    format!("{k}: {formatted}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        let (a, b) = (self.state(), other.state());
        a.default == b.default
            && a.properties.len() == b.properties.len()
            && a
                .properties
                .iter()
                .all(|(k, v)| b.properties.get(k).is_some_and(|other| other == v))
    }
}

impl From<Properties> for Object {
    fn from(properties: Properties) -> Self {
        Self::from_properties(properties)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.state.get() {
            Some(state) => {
                let mut map = f.debug_map();
                map.entries(state.properties.iter());
                if let Some(default) = &state.default {
                    map.entry(&DEFAULT_KEY, default);
                }
                map.finish()
            }
            None => f.write_str("Object(<lazy>)"),
        }
    }
}
