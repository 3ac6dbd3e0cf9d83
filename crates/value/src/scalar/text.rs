//! Text (UTF-8 string) type
//!
//! Cheap to clone via `Arc<str>`. Length is counted in code points, which is
//! what expressions mean by the length of a piece of text.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// UTF-8 text with efficient cloning
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Text {
    inner: Arc<str>,
}

impl Text {
    /// Create a new Text
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self { inner: s.into() }
    }

    /// The empty text
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the string as &str
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Number of code points
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Concatenate with another text
    pub fn concat(&self, other: &Text) -> Text {
        let mut s = String::with_capacity(self.inner.len() + other.inner.len());
        s.push_str(&self.inner);
        s.push_str(&other.inner);
        Text::from(s)
    }

    /// Diagnostic form: the text quoted, with inner quotes escaped
    pub fn describe(&self) -> String {
        format!("{:?}", &*self.inner)
    }

    /// Empty text and any casing of `false` are falsy
    pub fn truthy(&self) -> bool {
        !self.is_empty() && !self.inner.eq_ignore_ascii_case("false")
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({:?})", &*self.inner)
    }
}
