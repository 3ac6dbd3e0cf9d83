use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone as _};
use chrono_tz::Tz;

use super::{Date, TimeOfDay};
use crate::environment::Environment;

/// An instant together with the offset it is displayed in
///
/// Equality, ordering and hashing only look at the instant, so
/// `10:00+02:00 == 08:00Z`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<FixedOffset>);

impl DateTime {
    #[inline]
    pub const fn new(dt: chrono::DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// `0001-01-01T00:00:00Z`
    pub fn zero() -> Self {
        Self(
            Date::zero()
                .naive()
                .and_time(NaiveTime::MIN)
                .and_utc()
                .fixed_offset(),
        )
    }

    /// Combine a date and time of day as local time in `tz`
    ///
    /// Ambiguous local times take the earlier instant. Local times inside a
    /// DST gap are read as UTC.
    pub fn from_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Self {
        let naive = date.and_time(time);
        let resolved = tz
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive));
        Self(resolved.fixed_offset())
    }

    /// Parse RFC 3339
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        chrono::DateTime::parse_from_rfc3339(s).ok().map(Self)
    }

    #[inline]
    pub fn inner(&self) -> chrono::DateTime<FixedOffset> {
        self.0
    }

    pub fn date(&self) -> Date {
        Date::new(self.0.date_naive())
    }

    pub fn time(&self) -> TimeOfDay {
        TimeOfDay::new(self.0.time())
    }

    /// Same instant displayed in another timezone
    pub fn in_timezone(&self, tz: Tz) -> Self {
        Self(self.0.with_timezone(&tz).fixed_offset())
    }

    pub fn truthy(&self) -> bool {
        *self != Self::zero()
    }

    /// ISO 8601 with microseconds, `Z` for UTC
    pub fn render(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Converted to the environment's timezone, then `date time`
    pub fn format(&self, env: &Environment) -> String {
        let local = self.0.with_timezone(&env.timezone());
        let pattern = format!(
            "{} {}",
            env.date_format().chrono_pattern(),
            env.time_format().chrono_pattern()
        );
        local.format(&pattern).to_string()
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTime {
    fn from(dt: chrono::DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for DateTime {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl From<chrono::DateTime<Tz>> for DateTime {
    fn from(dt: chrono::DateTime<Tz>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTime({})", self.render())
    }
}
