//! Alternative type descriptors.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Name of an entity type or enumeration (e.g., "LoanOrCredit").
///
/// Built-in names are borrowed from static tables; names loaded from an
/// external schema table are owned.
pub type TypeName = Cow<'static, str>;

/// The ordered, shared alternative list of one declared property.
pub type Alternatives = Arc<[DataType]>;

/// One shape a property value may take.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Free-form text.
    Text,
    /// Absolute URL.
    Url,
    Boolean,
    /// Whole number (fits in i64).
    Integer,
    /// Finite floating-point number.
    Number,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Time of day.
    Time,
    /// ISO 8601 duration.
    Duration,
    /// A member of the named enumeration.
    Enumeration(TypeName),
    /// A nested entity of the named type (or one of its subtypes).
    Entity(TypeName),
}

impl DataType {
    /// All primitive data types, in the order schema.org lists them.
    pub const PRIMITIVES: [DataType; 9] = [
        DataType::Text,
        DataType::Url,
        DataType::Boolean,
        DataType::Integer,
        DataType::Number,
        DataType::Date,
        DataType::DateTime,
        DataType::Time,
        DataType::Duration,
    ];

    /// Entity alternative for the named type.
    pub fn entity(name: impl Into<TypeName>) -> Self {
        DataType::Entity(name.into())
    }

    /// Enumeration alternative for the named enumeration.
    pub fn enumeration(name: impl Into<TypeName>) -> Self {
        DataType::Enumeration(name.into())
    }

    /// Resolves a schema.org primitive range name ("Text", "URL", ...).
    pub fn primitive(name: &str) -> Option<DataType> {
        match name {
            "Text" => Some(DataType::Text),
            "URL" => Some(DataType::Url),
            "Boolean" => Some(DataType::Boolean),
            "Integer" => Some(DataType::Integer),
            "Number" => Some(DataType::Number),
            "Date" => Some(DataType::Date),
            "DateTime" => Some(DataType::DateTime),
            "Time" => Some(DataType::Time),
            "Duration" => Some(DataType::Duration),
            _ => None,
        }
    }

    /// Returns the schema.org name of this type.
    pub fn name(&self) -> &str {
        match self {
            DataType::Text => "Text",
            DataType::Url => "URL",
            DataType::Boolean => "Boolean",
            DataType::Integer => "Integer",
            DataType::Number => "Number",
            DataType::Date => "Date",
            DataType::DateTime => "DateTime",
            DataType::Time => "Time",
            DataType::Duration => "Duration",
            DataType::Enumeration(name) | DataType::Entity(name) => name,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, DataType::Enumeration(_) | DataType::Entity(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
