//! Payload types for property values.
//!
//! A [`Value`] is the payload held by an [`Or`](crate::model::Or): exactly
//! one concrete shape, checked against the alternative it was selected for.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::ValueError;
use crate::model::{DataType, Entity};
use crate::schema::EnumerationType;
use crate::util::datetime::{
    datetime_in_range, days_from_ymd, days_in_range, format_date, format_datetime, format_time,
    offset_in_range, parse_date, parse_datetime, parse_time, DateTimeParseError,
    MAX_TIME_OF_DAY_US,
};
pub use crate::util::duration::IsoDuration;

/// Calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    /// Signed days since Unix epoch (1970-01-01).
    pub days: i32,
    /// UTC offset in minutes, if one was given.
    pub offset_min: Option<i16>,
}

impl Date {
    /// Parses `YYYY-MM-DD` with an optional offset.
    pub fn parse(input: &str) -> Result<Self, DateTimeParseError> {
        let (days, offset_min) = parse_date(input)?;
        Ok(Self { days, offset_min })
    }

    /// Builds a date without offset; `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        days_from_ymd(year, month, day).map(|days| Self {
            days,
            offset_min: None,
        })
    }

    /// Returns false if the year falls outside 0000..=9999 or the offset
    /// exceeds `±24:00`.
    pub fn is_valid(&self) -> bool {
        days_in_range(self.days) && offset_in_range(self.offset_min)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date(self.days, self.offset_min))
    }
}

/// Combined date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    /// Microseconds since Unix epoch (UTC instant).
    pub epoch_us: i64,
    /// UTC offset in minutes, if one was given.
    pub offset_min: Option<i16>,
}

impl DateTime {
    /// Parses `YYYY-MM-DDTHH:MM[:SS[.f]]` with an optional offset.
    pub fn parse(input: &str) -> Result<Self, DateTimeParseError> {
        let (epoch_us, offset_min) = parse_datetime(input)?;
        Ok(Self {
            epoch_us,
            offset_min,
        })
    }

    /// A UTC instant, formatted with a `Z` suffix.
    pub fn from_epoch_us(epoch_us: i64) -> Self {
        Self {
            epoch_us,
            offset_min: Some(0),
        }
    }

    /// Returns false if the local date falls outside years 0000..=9999 or
    /// the offset exceeds `±24:00`.
    pub fn is_valid(&self) -> bool {
        datetime_in_range(self.epoch_us, self.offset_min)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_datetime(self.epoch_us, self.offset_min))
    }
}

/// Time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    /// Microseconds since midnight (0 to 86,399,999,999).
    pub time_us: i64,
    /// UTC offset in minutes, if one was given.
    pub offset_min: Option<i16>,
}

impl Time {
    /// Parses `HH:MM[:SS[.f]]` with an optional offset.
    pub fn parse(input: &str) -> Result<Self, DateTimeParseError> {
        let (time_us, offset_min) = parse_time(input)?;
        Ok(Self {
            time_us,
            offset_min,
        })
    }

    /// Returns false if `time_us` lies outside a single day or the offset
    /// exceeds `±24:00`.
    pub fn is_valid(&self) -> bool {
        (0..=MAX_TIME_OF_DAY_US).contains(&self.time_us) && offset_in_range(self.offset_min)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time(self.time_us, self.offset_min))
    }
}

/// A member of a declared enumeration.
///
/// Only obtainable through [`EnumerationType::member`], so the member is
/// always one the registry declared.
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub(crate) enumeration: Arc<EnumerationType>,
    pub(crate) index: usize,
}

impl EnumMember {
    /// Name of the enumeration this member belongs to.
    pub fn enumeration(&self) -> &str {
        self.enumeration.name()
    }

    /// Name of the member (e.g., "InForce").
    pub fn name(&self) -> &str {
        &self.enumeration.members()[self.index]
    }
}

impl PartialEq for EnumMember {
    fn eq(&self, other: &Self) -> bool {
        self.enumeration() == other.enumeration() && self.name() == other.name()
    }
}

/// Returns true if the URL's serialized form can be read back from a document.
pub(crate) fn is_document_url(url: &Url) -> bool {
    !url.as_str().chars().any(char::is_whitespace)
}

/// A property payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Url(Url),
    Boolean(bool),
    Integer(i64),
    /// Must be finite to match [`DataType::Number`].
    Number(f64),
    Date(Date),
    DateTime(DateTime),
    Time(Time),
    Duration(IsoDuration),
    Enumeration(EnumMember),
    Entity(Box<Entity>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Parses an absolute URL.
    ///
    /// URLs whose serialized form keeps whitespace (e.g. opaque `data:`
    /// paths) are rejected; documents never read them back as URLs.
    pub fn url(input: &str) -> Result<Self, ValueError> {
        let url = Url::parse(input).map_err(|e| ValueError::InvalidUrl {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        if !is_document_url(&url) {
            return Err(ValueError::InvalidUrl {
                input: input.to_string(),
                reason: "contains whitespace".to_string(),
            });
        }
        Ok(Value::Url(url))
    }

    /// A finite number.
    pub fn number(value: f64) -> Result<Self, ValueError> {
        if value.is_finite() {
            Ok(Value::Number(value))
        } else {
            Err(ValueError::NonFiniteNumber { value })
        }
    }

    pub fn entity(entity: Entity) -> Self {
        Value::Entity(Box::new(entity))
    }

    /// Returns the most specific data type describing this payload.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Text(_) => DataType::Text,
            Value::Url(_) => DataType::Url,
            Value::Boolean(_) => DataType::Boolean,
            Value::Integer(_) => DataType::Integer,
            Value::Number(_) => DataType::Number,
            Value::Date(_) => DataType::Date,
            Value::DateTime(_) => DataType::DateTime,
            Value::Time(_) => DataType::Time,
            Value::Duration(_) => DataType::Duration,
            Value::Enumeration(m) => DataType::Enumeration(m.enumeration.name_cow()),
            Value::Entity(e) => DataType::Entity(e.entity_type().name_cow()),
        }
    }

    /// Checks whether this payload structurally fits `alternative`.
    ///
    /// Entities fit their own type and every declared supertype. Numbers
    /// must be finite, URLs must serialize without whitespace, and temporal
    /// values must format as four-digit years with offsets within `±24:00`.
    pub fn matches(&self, alternative: &DataType) -> bool {
        match (self, alternative) {
            (Value::Text(_), DataType::Text)
            | (Value::Boolean(_), DataType::Boolean)
            | (Value::Integer(_), DataType::Integer)
            | (Value::Duration(_), DataType::Duration) => true,
            (Value::Number(n), DataType::Number) => n.is_finite(),
            (Value::Url(u), DataType::Url) => is_document_url(u),
            (Value::Date(d), DataType::Date) => d.is_valid(),
            (Value::DateTime(dt), DataType::DateTime) => dt.is_valid(),
            (Value::Time(t), DataType::Time) => t.is_valid(),
            (Value::Enumeration(m), DataType::Enumeration(name)) => m.enumeration() == &**name,
            (Value::Entity(e), DataType::Entity(name)) => e.entity_type().is_a(name),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Value::Url(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Value::DateTime(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&Time> {
        match self {
            Value::Time(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&IsoDuration> {
        match self {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_enum_member(&self) -> Option<&EnumMember> {
        match self {
            Value::Enumeration(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Value::Entity(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Url> for Value {
    fn from(v: Url) -> Self {
        Value::Url(v)
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime> for Value {
    fn from(v: DateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Time> for Value {
    fn from(v: Time) -> Self {
        Value::Time(v)
    }
}

impl From<IsoDuration> for Value {
    fn from(v: IsoDuration) -> Self {
        Value::Duration(v)
    }
}

impl From<EnumMember> for Value {
    fn from(v: EnumMember) -> Self {
        Value::Enumeration(v)
    }
}

impl From<Entity> for Value {
    fn from(v: Entity) -> Self {
        Value::Entity(Box::new(v))
    }
}
