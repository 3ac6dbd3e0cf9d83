//! Environment that values are converted, formatted and parsed in
//!
//! Nothing in this crate reads process-global state: timezone, date and
//! number conventions and the current time all come from an [`Environment`].
//! An environment is built with [`EnvironmentBuilder`] or read from JSON
//! configuration with [`Environment::from_json`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("invalid environment JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("invalid number format: {0}")]
    InvalidNumberFormat(String),
}

/// Order of the day, month and year parts in human-entered dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYear,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYear,
}

impl DateFormat {
    pub(crate) fn chrono_pattern(self) -> &'static str {
        match self {
            Self::YearMonthDay => "%Y-%m-%d",
            Self::MonthDayYear => "%m-%d-%Y",
            Self::DayMonthYear => "%d-%m-%Y",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::YearMonthDay => "YYYY-MM-DD",
            Self::MonthDayYear => "MM-DD-YYYY",
            Self::DayMonthYear => "DD-MM-YYYY",
        })
    }
}

/// How times of day are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "tt:mm")]
    HourMinute,
    #[serde(rename = "h:mm aa")]
    HourMinuteAmPm,
    #[serde(rename = "tt:mm:ss")]
    HourMinuteSecond,
    #[serde(rename = "h:mm:ss aa")]
    HourMinuteSecondAmPm,
}

impl TimeFormat {
    pub(crate) fn chrono_pattern(self) -> &'static str {
        match self {
            Self::HourMinute => "%H:%M",
            Self::HourMinuteAmPm => "%-I:%M %P",
            Self::HourMinuteSecond => "%H:%M:%S",
            Self::HourMinuteSecondAmPm => "%-I:%M:%S %P",
        }
    }
}

/// Symbols used when parsing and formatting numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal_symbol: String,
    pub digit_grouping_symbol: String,
}

impl NumberFormat {
    /// Create and validate a number format
    pub fn new(
        decimal_symbol: impl Into<String>,
        digit_grouping_symbol: impl Into<String>,
    ) -> Result<Self, EnvironmentError> {
        let format = Self {
            decimal_symbol: decimal_symbol.into(),
            digit_grouping_symbol: digit_grouping_symbol.into(),
        };
        format.validate()?;
        Ok(format)
    }

    fn validate(&self) -> Result<(), EnvironmentError> {
        if self.decimal_symbol.is_empty() {
            return Err(EnvironmentError::InvalidNumberFormat(
                "decimal symbol can't be empty".to_string(),
            ));
        }
        if self.decimal_symbol == self.digit_grouping_symbol {
            return Err(EnvironmentError::InvalidNumberFormat(format!(
                "decimal and grouping symbols are both '{}'",
                self.decimal_symbol
            )));
        }
        Ok(())
    }
}

impl Default for NumberFormat {
    /// `1,234.567`
    fn default() -> Self {
        Self {
            decimal_symbol: ".".to_string(),
            digit_grouping_symbol: ",".to_string(),
        }
    }
}

// ==================== Now source ====================

/// Source of the current instant
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ==================== Environment ====================

/// Locale and time settings consulted by conversions and formatting
#[derive(Debug, Clone)]
pub struct Environment {
    date_format: DateFormat,
    time_format: TimeFormat,
    timezone: Tz,
    number_format: NumberFormat,
    default_country: Option<String>,
    default_language: Option<String>,
    max_value_length: usize,
    clock: Arc<dyn Clock>,
}

/// Default cap on the length of a stored value
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 640;

impl Environment {
    /// Create a builder for constructing environments
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::new()
    }

    /// Read an environment from its JSON configuration
    ///
    /// Missing fields take their defaults, so `{}` is a valid configuration.
    pub fn from_json(data: &str) -> Result<Self, EnvironmentError> {
        let config: EnvironmentConfig = serde_json::from_str(data)?;
        let env = Self::from_config(config)?;
        tracing::debug!(
            timezone = %env.timezone,
            date_format = %env.date_format,
            "environment loaded from JSON"
        );
        Ok(env)
    }

    /// Build an environment from already deserialized configuration
    pub fn from_config(config: EnvironmentConfig) -> Result<Self, EnvironmentError> {
        let timezone = parse_timezone(&config.timezone)?;
        let number_format = config.number_format.unwrap_or_default();
        number_format.validate()?;

        Ok(Self {
            date_format: config.date_format,
            time_format: config.time_format,
            timezone,
            number_format,
            default_country: config.default_country,
            default_language: config.default_language,
            max_value_length: config.max_value_length,
            clock: Arc::new(SystemClock),
        })
    }

    /// The serializable part of this environment
    pub fn config(&self) -> EnvironmentConfig {
        EnvironmentConfig {
            date_format: self.date_format,
            time_format: self.time_format,
            timezone: self.timezone.name().to_string(),
            number_format: Some(self.number_format.clone()),
            default_country: self.default_country.clone(),
            default_language: self.default_language.clone(),
            max_value_length: self.max_value_length,
        }
    }

    #[inline]
    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    #[inline]
    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    #[inline]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    #[inline]
    pub fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }

    pub fn default_country(&self) -> Option<&str> {
        self.default_country.as_deref()
    }

    pub fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }

    #[inline]
    pub fn max_value_length(&self) -> usize {
        self.max_value_length
    }

    /// Current instant in this environment's timezone
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.timezone)
    }
}

impl Default for Environment {
    fn default() -> Self {
        EnvironmentBuilder::new().build()
    }
}

fn parse_timezone(name: &str) -> Result<Tz, EnvironmentError> {
    name.parse::<Tz>()
        .map_err(|_| EnvironmentError::UnknownTimezone(name.to_string()))
}

/// JSON shape of an environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub date_format: DateFormat,
    pub time_format: TimeFormat,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    pub max_value_length: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            date_format: DateFormat::default(),
            time_format: TimeFormat::default(),
            timezone: "UTC".to_string(),
            number_format: None,
            default_country: None,
            default_language: None,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
        }
    }
}

/// Builder for creating environments
#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    env: Environment,
}

impl EnvironmentBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            env: Environment {
                date_format: DateFormat::YearMonthDay,
                time_format: TimeFormat::HourMinute,
                timezone: Tz::UTC,
                number_format: NumberFormat::default(),
                default_country: None,
                default_language: None,
                max_value_length: DEFAULT_MAX_VALUE_LENGTH,
                clock: Arc::new(SystemClock),
            },
        }
    }

    pub fn date_format(mut self, date_format: DateFormat) -> Self {
        self.env.date_format = date_format;
        self
    }

    pub fn time_format(mut self, time_format: TimeFormat) -> Self {
        self.env.time_format = time_format;
        self
    }

    pub fn timezone(mut self, timezone: Tz) -> Self {
        self.env.timezone = timezone;
        self
    }

    pub fn number_format(mut self, number_format: NumberFormat) -> Self {
        self.env.number_format = number_format;
        self
    }

    pub fn default_country(mut self, country: impl Into<String>) -> Self {
        self.env.default_country = Some(country.into());
        self
    }

    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.env.default_language = Some(language.into());
        self
    }

    pub fn max_value_length(mut self, length: usize) -> Self {
        self.env.max_value_length = length;
        self
    }

    /// Replace the now source
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.env.clock = Arc::new(clock);
        self
    }

    /// Build the environment
    pub fn build(self) -> Environment {
        self.env
    }
}

impl Default for EnvironmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
