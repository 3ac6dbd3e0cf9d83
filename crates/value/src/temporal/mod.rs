//! Temporal value types
//!
//! Dates and times of day carry no timezone. Datetimes are instants that keep
//! the offset they were created with for rendering; equality and ordering use
//! the instant alone.

mod date;
mod datetime;
mod time;

pub use date::Date;
pub use datetime::DateTime;
pub use time::TimeOfDay;
