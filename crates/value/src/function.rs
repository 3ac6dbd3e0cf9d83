//! Callable values
//!
//! Functions are first-class values so they can be passed around and
//! rendered, but they have no JSON shape beyond their name and are only
//! ever equal to themselves.

use std::fmt;
use std::sync::Arc;

use crate::core::Value;
use crate::environment::Environment;

/// Signature of a callable
pub type Callable = dyn Fn(&Environment, &[Option<Value>]) -> Option<Value> + Send + Sync;

/// A named callable
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    callable: Arc<Callable>,
}

impl Function {
    pub fn new<F>(name: impl Into<Arc<str>>, callable: F) -> Self
    where
        F: Fn(&Environment, &[Option<Value>]) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callable: Arc::new(callable),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with the given arguments
    pub fn call(&self, env: &Environment, args: &[Option<Value>]) -> Option<Value> {
        tracing::trace!(function = %self.name, args = args.len(), "calling function");
        (self.callable)(env, args)
    }

    /// Whether both handles point at the same callable
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}
