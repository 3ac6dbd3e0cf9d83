//! Arbitrary precision decimal numbers
//!
//! Backed by [`rust_decimal::Decimal`], so there is no binary floating point
//! rounding anywhere in the value domain. The canonical text form never uses
//! scientific notation and drops trailing fractional zeros.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::{MathematicalOps, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::environment::NumberFormat;
use crate::error::{ValueError, XError, XResult};

/// Plain decimal literals only: `123`, `123.456` or `.456`, optionally negative
static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(([0-9]+)|([0-9]+\.[0-9]+)|(\.[0-9]+))$").expect("valid regex"));

/// A whole or fractional number
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number(Decimal);

impl Number {
    pub const ZERO: Number = Number(Decimal::ZERO);
    pub const ONE: Number = Number(Decimal::ONE);

    /// Create a new Number
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create from an integer
    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// The underlying decimal
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Zero is falsy, everything else truthy
    #[inline]
    pub fn truthy(&self) -> bool {
        !self.is_zero()
    }

    /// Parse a plain decimal literal
    ///
    /// Surrounding whitespace is ignored. Exponents, grouping symbols and
    /// leading `+` are rejected.
    pub fn parse(s: &str) -> Result<Self, ValueError> {
        let s = s.trim();
        if !DECIMAL_PATTERN.is_match(s) {
            return Err(ValueError::conversion(format!("\"{s}\""), "number"));
        }
        let padded = match s.strip_prefix('-') {
            Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
            _ if s.starts_with('.') => format!("0{s}"),
            _ => s.to_string(),
        };
        Decimal::from_str(&padded)
            .map(Self)
            .map_err(|_| ValueError::message("number value out of range"))
    }

    /// Parse free text as typed by a human
    ///
    /// Lower-cases the input and corrects the common SMS/OCR typos `o` -> `0`
    /// and `l` -> `1`, then strips the grouping symbol and normalizes the
    /// decimal symbol of `format` before parsing.
    pub fn parse_fuzzy(s: &str, format: &NumberFormat) -> Result<Self, ValueError> {
        let mut cleaned = s.trim().to_lowercase().replace('o', "0").replace('l', "1");

        if !format.digit_grouping_symbol.is_empty() {
            cleaned = cleaned.replace(&format.digit_grouping_symbol, "");
        }
        if format.decimal_symbol != "." {
            cleaned = cleaned.replace(&format.decimal_symbol, ".");
        }

        Self::parse(&cleaned).map_err(|err| match err {
            ValueError::Conversion { .. } => ValueError::conversion(format!("\"{s}\""), "number"),
            other => other,
        })
    }

    /// Canonical text form
    pub fn render(&self) -> String {
        if self.0.is_zero() {
            return "0".to_string();
        }
        self.0.normalize().to_string()
    }

    /// Pretty form using the given symbols, grouping the integer digits
    pub fn format(&self, format: &NumberFormat) -> String {
        self.format_custom(format, None, true)
    }

    /// Pretty form with an optional fixed number of decimal places
    pub fn format_custom(&self, format: &NumberFormat, places: Option<u32>, group_digits: bool) -> String {
        let formatted = match places {
            Some(dp) => {
                let rounded = self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
                format!("{:.*}", dp as usize, rounded)
            }
            None => self.render(),
        };

        let (sign, unsigned) = match formatted.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", formatted.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut out = String::with_capacity(formatted.len() + int_part.len() / 3);
        out.push_str(sign);
        if group_digits {
            let digits = int_part.len();
            for (i, ch) in int_part.chars().enumerate() {
                out.push(ch);
                let remaining = digits - 1 - i;
                if remaining > 0 && remaining % 3 == 0 {
                    out.push_str(&format.digit_grouping_symbol);
                }
            }
        } else {
            out.push_str(int_part);
        }
        if let Some(frac) = frac_part {
            out.push_str(&format.decimal_symbol);
            out.push_str(frac);
        }
        out
    }

    /// Integer part, truncated toward zero
    pub fn trunc(&self) -> Number {
        Self(self.0.trunc())
    }

    /// Integer part as an `i32`
    pub fn to_i32(&self) -> Result<i32, ValueError> {
        self.0
            .trunc()
            .to_i32()
            .ok_or_else(|| ValueError::out_of_range(self.render()))
    }

    // ==================== Arithmetic ====================

    pub fn checked_add(&self, other: &Number) -> XResult<Number> {
        self.0.checked_add(other.0).map(Self).ok_or_else(out_of_range)
    }

    pub fn checked_sub(&self, other: &Number) -> XResult<Number> {
        self.0.checked_sub(other.0).map(Self).ok_or_else(out_of_range)
    }

    pub fn checked_mul(&self, other: &Number) -> XResult<Number> {
        self.0.checked_mul(other.0).map(Self).ok_or_else(out_of_range)
    }

    pub fn checked_div(&self, other: &Number) -> XResult<Number> {
        if other.is_zero() {
            return Err(XError::msg("division by zero"));
        }
        self.0.checked_div(other.0).map(Self).ok_or_else(out_of_range)
    }

    pub fn checked_pow(&self, exponent: &Number) -> XResult<Number> {
        let exp = exponent.0;
        let fractional = !exp.fract().is_zero();
        if fractional && self.0 < Decimal::ZERO {
            return Err(XError::msg("can't raise a negative number to a fractional power"));
        }
        let result = if !fractional {
            exp.to_i64().and_then(|e| self.0.checked_powi(e))
        } else {
            self.0.checked_powd(exp)
        };
        result.map(Self).ok_or_else(out_of_range)
    }

    pub fn neg(&self) -> Number {
        if self.is_zero() {
            return Self::ZERO;
        }
        Self(-self.0)
    }
}

fn out_of_range() -> XError {
    XError::msg("number value out of range")
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for Number {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self.render())
    }
}
