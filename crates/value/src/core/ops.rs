//! Operator lifting and the standard operators
//!
//! Operators take possibly nil values, convert their operands through the
//! conversion engine and wrap the typed result back into a value. Any
//! conversion failure becomes the result as an error value. An operand that
//! is already an error is passed through untouched before any conversion
//! runs, the left one taking precedence, so errors flow through expressions
//! instead of aborting them.

use std::collections::HashMap;

use crate::core::convert::{to_number, to_text};
use crate::core::value::Value;
use crate::environment::Environment;
use crate::error::{ValueError, XResult};
use crate::scalar::{Number, Text};

/// A lifted binary operator
pub type BinaryOperator = fn(&Environment, Option<&Value>, Option<&Value>) -> Option<Value>;

/// A lifted unary operator
pub type UnaryOperator = fn(&Environment, Option<&Value>) -> Option<Value>;

// ==================== Lifting ====================

/// Lift a typed unary function over values
pub fn lift_unary<A, C, F>(env: &Environment, a: Option<&Value>, to_a: C, f: F) -> Option<Value>
where
    C: Fn(&Environment, Option<&Value>) -> XResult<A>,
    F: FnOnce(&Environment, A) -> Option<Value>,
{
    match to_a(env, a) {
        Ok(x) => f(env, x),
        Err(e) => Some(Value::Error(e)),
    }
}

/// Lift a typed binary function over values
pub fn lift_binary<A, B, CA, CB, F>(
    env: &Environment,
    a: Option<&Value>,
    b: Option<&Value>,
    to_a: CA,
    to_b: CB,
    f: F,
) -> Option<Value>
where
    CA: Fn(&Environment, Option<&Value>) -> XResult<A>,
    CB: Fn(&Environment, Option<&Value>) -> XResult<B>,
    F: FnOnce(&Environment, A, B) -> Option<Value>,
{
    for operand in [a, b] {
        if let Some(Value::Error(e)) = operand {
            return Some(Value::Error(e.clone()));
        }
    }
    let x = match to_a(env, a) {
        Ok(x) => x,
        Err(e) => return Some(Value::Error(e)),
    };
    match to_b(env, b) {
        Ok(y) => f(env, x, y),
        Err(e) => Some(Value::Error(e)),
    }
}

/// Lift a binary function over text
pub fn textual_binary<F>(env: &Environment, a: Option<&Value>, b: Option<&Value>, f: F) -> Option<Value>
where
    F: FnOnce(&Environment, Text, Text) -> Option<Value>,
{
    lift_binary(env, a, b, to_text, to_text, f)
}

/// Lift a binary function over numbers
pub fn numerical_binary<F>(env: &Environment, a: Option<&Value>, b: Option<&Value>, f: F) -> Option<Value>
where
    F: FnOnce(&Environment, Number, Number) -> Option<Value>,
{
    lift_binary(env, a, b, to_number, to_number, f)
}

/// Lift a unary function over numbers
pub fn numerical_unary<F>(env: &Environment, a: Option<&Value>, f: F) -> Option<Value>
where
    F: FnOnce(&Environment, Number) -> Option<Value>,
{
    lift_unary(env, a, to_number, f)
}

fn number_result(result: XResult<Number>) -> Option<Value> {
    Some(match result {
        Ok(n) => Value::Number(n),
        Err(e) => Value::Error(e),
    })
}

// ==================== Operators ====================

/// `a & b`: join the text of both operands
pub fn concatenate(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    textual_binary(env, a, b, |_, x, y| Some(Value::Text(x.concat(&y))))
}

/// `a = b`: whether both operands have the same text
pub fn equal(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    textual_binary(env, a, b, |_, x, y| Some(Value::Boolean(x == y)))
}

/// `a != b`
pub fn not_equal(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    textual_binary(env, a, b, |_, x, y| Some(Value::Boolean(x != y)))
}

/// `a + b`
pub fn add(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| number_result(x.checked_add(&y)))
}

/// `a - b`
pub fn subtract(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| number_result(x.checked_sub(&y)))
}

/// `a * b`
pub fn multiply(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| number_result(x.checked_mul(&y)))
}

/// `a / b`, dividing by zero gives a `division by zero` error
pub fn divide(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| number_result(x.checked_div(&y)))
}

/// `a ^ b`
pub fn exponent(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| number_result(x.checked_pow(&y)))
}

/// `a < b`
pub fn less_than(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| Some(Value::Boolean(x < y)))
}

/// `a <= b`
pub fn less_than_or_equal(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| Some(Value::Boolean(x <= y)))
}

/// `a > b`
pub fn greater_than(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| Some(Value::Boolean(x > y)))
}

/// `a >= b`
pub fn greater_than_or_equal(env: &Environment, a: Option<&Value>, b: Option<&Value>) -> Option<Value> {
    numerical_binary(env, a, b, |_, x, y| Some(Value::Boolean(x >= y)))
}

/// `-a`
pub fn negate(env: &Environment, a: Option<&Value>) -> Option<Value> {
    numerical_unary(env, a, |_, x| Some(Value::Number(x.neg())))
}

// ==================== Registry ====================

/// Operators by their symbol
pub struct OperatorRegistry {
    binary: HashMap<String, BinaryOperator>,
    unary: HashMap<String, UnaryOperator>,
}

impl OperatorRegistry {
    /// Create a registry holding the standard operators
    pub fn new() -> Self {
        let mut registry = Self {
            binary: HashMap::new(),
            unary: HashMap::new(),
        };

        registry.register_text_operators();
        registry.register_arithmetic_operators();
        registry.register_comparison_operators();

        registry
    }

    /// Register a binary operator, replacing any with the same symbol
    pub fn register_binary(&mut self, symbol: impl Into<String>, op: BinaryOperator) {
        self.binary.insert(symbol.into(), op);
    }

    /// Register a unary operator, replacing any with the same symbol
    pub fn register_unary(&mut self, symbol: impl Into<String>, op: UnaryOperator) {
        self.unary.insert(symbol.into(), op);
    }

    /// Apply a binary operator, unknown symbols give an error value
    pub fn binary(
        &self,
        symbol: &str,
        env: &Environment,
        a: Option<&Value>,
        b: Option<&Value>,
    ) -> Option<Value> {
        match self.binary.get(symbol) {
            Some(op) => op(env, a, b),
            None => Some(unknown_operator(symbol)),
        }
    }

    /// Apply a unary operator, unknown symbols give an error value
    pub fn unary(&self, symbol: &str, env: &Environment, a: Option<&Value>) -> Option<Value> {
        match self.unary.get(symbol) {
            Some(op) => op(env, a),
            None => Some(unknown_operator(symbol)),
        }
    }

    pub fn has_binary(&self, symbol: &str) -> bool {
        self.binary.contains_key(symbol)
    }

    pub fn has_unary(&self, symbol: &str) -> bool {
        self.unary.contains_key(symbol)
    }

    /// All binary operator symbols
    pub fn binary_symbols(&self) -> Vec<String> {
        self.binary.keys().cloned().collect()
    }

    fn register_text_operators(&mut self) {
        self.register_binary("&", concatenate);
        self.register_binary("=", equal);
        self.register_binary("!=", not_equal);
    }

    fn register_arithmetic_operators(&mut self) {
        self.register_binary("+", add);
        self.register_binary("-", subtract);
        self.register_binary("*", multiply);
        self.register_binary("/", divide);
        self.register_binary("^", exponent);
        self.register_unary("-", negate);
    }

    fn register_comparison_operators(&mut self) {
        self.register_binary("<", less_than);
        self.register_binary("<=", less_than_or_equal);
        self.register_binary(">", greater_than);
        self.register_binary(">=", greater_than_or_equal);
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_operator(symbol: &str) -> Value {
    tracing::trace!(symbol, "unknown operator");
    Value::error(ValueError::UnknownOperator(symbol.to_string()))
}
