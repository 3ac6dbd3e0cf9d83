//! Property and index resolution
//!
//! Evaluators look up `a.b` and `a[i]` through these capability traits,
//! implemented only by the types that support them. The free functions
//! [`resolve`] and [`index`] dispatch over possibly nil values, propagate
//! error values and turn anything else into a resolution error.

use crate::collections::{Array, Object};
use crate::core::display::describe;
use crate::core::value::Value;
use crate::environment::Environment;
use crate::error::ValueError;
use crate::scalar::Text;

/// Values with named properties
pub trait Resolvable {
    /// The property named `key`
    ///
    /// A missing property gives an error value, a nil property gives `None`.
    fn resolve(&self, env: &Environment, key: &str) -> Option<Value>;
}

/// Values with a length
pub trait Lengthable {
    fn count(&self) -> usize;
}

/// Values with positional items
pub trait Indexable: Lengthable {
    /// The item at `index`, negative indexes counting back from the end
    ///
    /// An out of range index gives an error value.
    fn index(&self, env: &Environment, index: i64) -> Option<Value>;
}

impl Resolvable for Object {
    fn resolve(&self, _env: &Environment, key: &str) -> Option<Value> {
        match self.get(key) {
            Some(value) => value.cloned(),
            None => Some(Value::error(ValueError::resolution("object", key))),
        }
    }
}

impl Lengthable for Object {
    fn count(&self) -> usize {
        self.len()
    }
}

impl Lengthable for Array {
    fn count(&self) -> usize {
        self.len()
    }
}

impl Indexable for Array {
    fn index(&self, _env: &Environment, index: i64) -> Option<Value> {
        let length = self.len();
        let position = if index < 0 {
            i64::try_from(length).ok().map(|len| len + index)
        } else {
            Some(index)
        };

        position
            .and_then(|p| usize::try_from(p).ok())
            .and_then(|p| self.get(p))
            .map_or_else(
                || Some(Value::error(ValueError::index_out_of_range(index, length))),
                |item| item.cloned(),
            )
    }
}

impl Lengthable for Text {
    fn count(&self) -> usize {
        self.len()
    }
}

/// Resolve a property on a possibly nil value
pub fn resolve(env: &Environment, value: Option<&Value>, key: &str) -> Option<Value> {
    match value {
        Some(Value::Error(e)) => Some(Value::Error(e.clone())),
        Some(Value::Object(o)) => o.resolve(env, key),
        other => Some(Value::error(ValueError::resolution(describe(other), key))),
    }
}

/// Index into a possibly nil value
pub fn index(env: &Environment, value: Option<&Value>, i: i64) -> Option<Value> {
    match value {
        Some(Value::Error(e)) => Some(Value::Error(e.clone())),
        Some(Value::Array(a)) => a.index(env, i),
        other => Some(Value::error(ValueError::message(format!(
            "{} is not indexable",
            describe(other)
        )))),
    }
}

/// Length of a possibly nil value, if it has one
pub fn count(value: Option<&Value>) -> Option<usize> {
    match value {
        Some(Value::Text(t)) => Some(t.count()),
        Some(Value::Array(a)) => Some(a.count()),
        Some(Value::Object(o)) => Some(o.count()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XError;

    fn contact() -> Value {
        Value::Object(
            Object::builder()
                .insert("name", Value::text("Ryan"))
                .insert_nil("email")
                .build(),
        )
    }

    #[test]
    fn test_resolve() {
        let env = Environment::default();
        let contact = contact();

        assert_eq!(resolve(&env, Some(&contact), "NAME"), Some(Value::text("Ryan")));
        assert_eq!(resolve(&env, Some(&contact), "email"), None);
        assert_eq!(
            resolve(&env, Some(&contact), "age"),
            Some(Value::error_msg("object has no property 'age'"))
        );
        assert_eq!(
            resolve(&env, None, "age"),
            Some(Value::error_msg("null has no property 'age'"))
        );
        assert_eq!(
            resolve(&env, Some(&Value::text("x")), "age"),
            Some(Value::error_msg("\"x\" has no property 'age'"))
        );

        let boom = XError::msg("boom");
        assert_eq!(
            resolve(&env, Some(&Value::Error(boom.clone())), "age"),
            Some(Value::Error(boom))
        );
    }

    #[test]
    fn test_index() {
        let env = Environment::default();
        let arr = Value::Array(Array::from_vec(vec![
            Some(Value::text("a")),
            None,
            Some(Value::text("c")),
        ]));

        assert_eq!(index(&env, Some(&arr), 0), Some(Value::text("a")));
        assert_eq!(index(&env, Some(&arr), 1), None);
        assert_eq!(index(&env, Some(&arr), -1), Some(Value::text("c")));
        assert_eq!(index(&env, Some(&arr), -3), Some(Value::text("a")));
        assert!(index(&env, Some(&arr), 3).is_some_and(|v| v.is_error()));
        assert!(index(&env, Some(&arr), -4).is_some_and(|v| v.is_error()));
        assert!(index(&env, Some(&Value::from(1)), 0).is_some_and(|v| v.is_error()));
    }

    #[test]
    fn test_count() {
        assert_eq!(count(Some(&Value::text("héllo"))), Some(5));
        assert_eq!(count(Some(&contact())), Some(2));
        assert_eq!(count(Some(&Value::from(3))), None);
        assert_eq!(count(None), None);
    }
}
