use std::fmt;

use chrono::{NaiveTime, Timelike};

use crate::environment::Environment;

/// A time of day with nanosecond precision
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Midnight
    pub const ZERO: TimeOfDay = TimeOfDay(NaiveTime::MIN);

    #[inline]
    pub const fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    pub fn from_hms_nano(hour: u32, minute: u32, second: u32, nano: u32) -> Option<Self> {
        NaiveTime::from_hms_nano_opt(hour, minute, second, nano).map(Self)
    }

    #[inline]
    pub fn naive(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }

    pub fn truthy(&self) -> bool {
        *self != Self::ZERO
    }

    /// `HH:MM:SS.ffffff`
    pub fn render(&self) -> String {
        self.0.format("%H:%M:%S%.6f").to_string()
    }

    /// In the environment's time format
    pub fn format(&self, env: &Environment) -> String {
        self.0.format(env.time_format().chrono_pattern()).to_string()
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        Self(time)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({})", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::TimeFormat;
    use rstest::rstest;

    #[test]
    fn test_render() {
        let time = TimeOfDay::from_hms_nano(16, 30, 45, 0).unwrap();
        assert_eq!(time.render(), "16:30:45.000000");

        let time = TimeOfDay::from_hms_nano(9, 5, 1, 123_456_789).unwrap();
        assert_eq!(time.render(), "09:05:01.123456");
    }

    #[rstest]
    #[case(TimeFormat::HourMinute, "16:30")]
    #[case(TimeFormat::HourMinuteAmPm, "4:30 pm")]
    #[case(TimeFormat::HourMinuteSecond, "16:30:45")]
    #[case(TimeFormat::HourMinuteSecondAmPm, "4:30:45 pm")]
    fn test_format(#[case] format: TimeFormat, #[case] expected: &str) {
        let env = Environment::builder().time_format(format).build();
        let time = TimeOfDay::from_hms_nano(16, 30, 45, 0).unwrap();
        assert_eq!(time.format(&env), expected);
    }

    #[test]
    fn test_zero() {
        assert_eq!(TimeOfDay::ZERO.render(), "00:00:00.000000");
        assert!(!TimeOfDay::ZERO.truthy());
        assert!(TimeOfDay::from_hms_nano(0, 0, 0, 1).unwrap().truthy());
    }
}
