//! Parsing and formatting helpers for temporal payloads.

pub mod datetime;
pub mod duration;

pub use datetime::{
    days_from_ymd, format_date, format_datetime, format_time, parse_date, parse_datetime,
    parse_time, DateTimeParseError,
};
pub use duration::{format_duration, parse_duration, DurationParseError, IsoDuration};
