//! Ordered lists of values
//!
//! Items may be nil. Arrays only ever grow through [`Array::push`]. Storage is
//! an `im::Vector`, so clones share structure and a push onto a clone leaves
//! the original untouched.

use std::fmt;

use im::Vector;

use crate::core::Value;
use crate::core::display::{format, render};
use crate::environment::Environment;

/// An ordered list of possibly nil values
#[derive(Clone, Default)]
pub struct Array {
    items: Vector<Option<Value>>,
}

impl Array {
    /// Create an empty array
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a Vec
    #[must_use]
    pub fn from_vec(items: Vec<Option<Value>>) -> Self {
        Self {
            items: Vector::from(items),
        }
    }

    /// Create from non-nil values
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::from_vec(values.into_iter().map(Some).collect())
    }

    /// Append an item; clones taken earlier don't see it
    pub fn push(&mut self, item: Option<Value>) {
        self.items.push_back(item);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at a non-negative position, `None` if out of range
    pub fn get(&self, index: usize) -> Option<Option<&Value>> {
        self.items.get(index).map(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Value>> {
        self.items.iter().map(Option::as_ref)
    }

    pub fn truthy(&self) -> bool {
        !self.is_empty()
    }

    /// `[a,b,c]` with nil items left empty
    pub fn render(&self) -> String {
        let parts: Vec<String> = self.iter().map(render).collect();
        format!("[{}]", parts.join(","))
    }

    /// Items joined by `, `, or a bullet list if any item spans lines
    pub fn format(&self, env: &Environment) -> String {
        let parts: Vec<String> = self.iter().map(|item| format(env, item)).collect();
        if parts.iter().any(|p| p.contains('\n')) {
            parts
                .iter()
                .map(|p| format!("- {}", p.replace('\n', "\n  ")))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            parts.join(", ")
        }
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items.ptr_eq(&other.items) || self.items == other.items
    }
}

impl From<Vec<Option<Value>>> for Array {
    fn from(items: Vec<Option<Value>>) -> Self {
        Self::from_vec(items)
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<Option<Value>> for Array {
    fn from_iter<I: IntoIterator<Item = Option<Value>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
