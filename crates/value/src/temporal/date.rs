use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::environment::Environment;

/// A calendar date
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create from year, month and day, `None` if the date doesn't exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// `0001-01-01`
    pub fn zero() -> Self {
        Self(NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    #[inline]
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn truthy(&self) -> bool {
        !self.is_zero()
    }

    /// `YYYY-MM-DD`
    pub fn render(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// In the environment's date format
    pub fn format(&self, env: &Environment) -> String {
        self.0.format(env.date_format().chrono_pattern()).to_string()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DateFormat;

    #[test]
    fn test_render_and_format() {
        let date = Date::from_ymd(1979, 7, 18).unwrap();
        assert_eq!(date.render(), "1979-07-18");

        let env = Environment::builder()
            .date_format(DateFormat::DayMonthYear)
            .build();
        assert_eq!(date.format(&env), "18-07-1979");

        let env = Environment::builder()
            .date_format(DateFormat::MonthDayYear)
            .build();
        assert_eq!(date.format(&env), "07-18-1979");
    }

    #[test]
    fn test_zero() {
        assert_eq!(Date::zero().render(), "0001-01-01");
        assert!(!Date::zero().truthy());
        assert!(Date::from_ymd(2020, 1, 1).unwrap().truthy());
        assert!(Date::from_ymd(2021, 2, 29).is_none());
    }
}
