//! Error types for value construction, registry loading, and deserialization.

use thiserror::Error;

use crate::model::{DataType, TypeName};

/// Broad classification shared by every error in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A payload does not fit the alternative it was constructed for.
    TypeMismatch,
    /// A payload was requested as an alternative that is not the populated one.
    WrongAlternative,
    /// An entity type name is not declared in the registry.
    UnknownEntityType,
    /// A property name is not declared for the entity type.
    UnknownProperty,
    /// A raw value matches none of the declared alternatives.
    NoMatchingAlternative,
    /// Input is structurally invalid (bad JSON, wrong shape, bad schema table).
    Malformed,
    /// Input exceeds a hard limit.
    LimitExceeded,
}

impl ErrorKind {
    /// Returns a stable short code for this kind (e.g., "S001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "S001",
            ErrorKind::WrongAlternative => "S002",
            ErrorKind::UnknownEntityType => "S003",
            ErrorKind::UnknownProperty => "S004",
            ErrorKind::NoMatchingAlternative => "S005",
            ErrorKind::Malformed => "S006",
            ErrorKind::LimitExceeded => "S007",
        }
    }
}

/// Error while constructing, setting, or reading a property value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    // === S001: Type mismatch ===
    #[error("[S001] {selected} is not one of the declared alternatives [{alternatives}]")]
    AlternativeNotDeclared {
        selected: DataType,
        alternatives: String,
    },

    #[error("[S001] value of type {found} does not match alternative {selected}")]
    TypeMismatch { selected: DataType, found: DataType },

    #[error("[S001] number {value} is not finite")]
    NonFiniteNumber { value: f64 },

    #[error("[S001] invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("[S001] {member:?} is not a member of enumeration {enumeration}")]
    UnknownEnumerationMember { enumeration: TypeName, member: String },

    // === S002: Wrong alternative ===
    #[error("[S002] expected alternative {expected}, but {selected} is populated")]
    WrongAlternative {
        expected: DataType,
        selected: DataType,
    },

    // === S004: Unknown property ===
    #[error("[S004] property {property:?} is not declared for {entity_type}")]
    UnknownProperty {
        entity_type: TypeName,
        property: String,
    },
}

impl ValueError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::WrongAlternative { .. } => ErrorKind::WrongAlternative,
            ValueError::UnknownProperty { .. } => ErrorKind::UnknownProperty,
            _ => ErrorKind::TypeMismatch,
        }
    }
}

/// Error while building or querying a registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    // === S003: Unknown type ===
    #[error("[S003] unknown entity type {name:?}")]
    UnknownEntityType { name: String },

    #[error("[S003] unknown enumeration {name:?}")]
    UnknownEnumeration { name: String },

    #[error("[S003] {entity_type}.{property} references undeclared type {range:?}")]
    UnknownRange {
        entity_type: String,
        property: String,
        range: String,
    },

    #[error("[S003] {entity_type} is declared a subtype of undeclared type {supertype:?}")]
    UnknownSupertype {
        entity_type: String,
        supertype: String,
    },

    // === S006: Malformed schema ===
    #[error("[S006] {entity_type} includes undeclared property set {set:?}")]
    UnknownPropertySet { entity_type: String, set: String },

    #[error("[S006] type {name:?} is declared more than once")]
    DuplicateType { name: String },

    #[error("[S006] property {property:?} is declared more than once on {entity_type}")]
    DuplicateProperty {
        entity_type: String,
        property: String,
    },

    #[error("[S006] {entity_type}.{property} declares no alternatives")]
    EmptyAlternatives {
        entity_type: String,
        property: String,
    },

    #[error("[S006] {entity_type}.{property} declares alternative {range:?} more than once")]
    DuplicateAlternative {
        entity_type: String,
        property: String,
        range: String,
    },

    #[error("[S006] enumeration {enumeration} declares member {member:?} more than once")]
    DuplicateMember { enumeration: String, member: String },

    #[error("[S006] invalid schema table: {0}")]
    InvalidTable(String),

    // === S007: Limit exceeded ===
    #[error("[S007] {entity_type}.{property} declares {count} alternatives (max {max})")]
    TooManyAlternatives {
        entity_type: String,
        property: String,
        count: usize,
        max: usize,
    },
}

impl SchemaError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::UnknownEntityType { .. }
            | SchemaError::UnknownEnumeration { .. }
            | SchemaError::UnknownRange { .. }
            | SchemaError::UnknownSupertype { .. } => ErrorKind::UnknownEntityType,
            SchemaError::TooManyAlternatives { .. } => ErrorKind::LimitExceeded,
            _ => ErrorKind::Malformed,
        }
    }
}

/// Error while deserializing a document into an entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === S003: Unknown or mismatched type ===
    #[error("[S003] unknown entity type {name:?}")]
    UnknownEntityType { name: String },

    #[error("[S003] document declares @type {found:?}, expected {expected}")]
    EntityTypeMismatch { expected: TypeName, found: String },

    // === S004: Unknown property ===
    #[error("[S004] property {property:?} is not declared for {entity_type}")]
    UnknownProperty {
        entity_type: TypeName,
        property: String,
    },

    // === S005: No matching alternative ===
    #[error("[S005] {entity_type}.{property}: {value} matches none of [{alternatives}]")]
    NoMatchingAlternative {
        entity_type: TypeName,
        property: String,
        value: serde_json::Value,
        alternatives: String,
    },

    // === S006: Malformed document ===
    #[error("[S006] invalid JSON: {0}")]
    InvalidJson(String),

    #[error("[S006] expected a JSON object for {context}")]
    ExpectedObject { context: String },

    #[error("[S006] document has no @type")]
    MissingType,

    #[error("[S006] @type must be a single string, found {found}")]
    InvalidType { found: serde_json::Value },

    #[error("[S006] @id must be a string, found {found}")]
    InvalidId { found: serde_json::Value },

    // === S007: Limit exceeded ===
    #[error("[S007] entity nesting exceeds maximum depth {max}")]
    DepthExceeded { max: usize },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::UnknownEntityType { .. } | DecodeError::EntityTypeMismatch { .. } => {
                ErrorKind::UnknownEntityType
            }
            DecodeError::UnknownProperty { .. } => ErrorKind::UnknownProperty,
            DecodeError::NoMatchingAlternative { .. } => ErrorKind::NoMatchingAlternative,
            DecodeError::DepthExceeded { .. } => ErrorKind::LimitExceeded,
            _ => ErrorKind::Malformed,
        }
    }
}

/// Joins alternatives for diagnostics (e.g., "Text, URL").
pub(crate) fn describe_alternatives(alternatives: &[DataType]) -> String {
    alternatives
        .iter()
        .map(|alt| alt.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_codes() {
        let err = ValueError::WrongAlternative {
            expected: DataType::Url,
            selected: DataType::Text,
        };
        assert_eq!(err.kind(), ErrorKind::WrongAlternative);
        assert!(err.to_string().starts_with("[S002]"));

        let err = DecodeError::NoMatchingAlternative {
            entity_type: "LoanOrCredit".into(),
            property: "recourseLoan".to_string(),
            value: serde_json::json!("yes"),
            alternatives: "Boolean".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);
        assert_eq!(err.kind().code(), "S005");
        assert!(err.to_string().contains("recourseLoan"));
        assert!(err.to_string().contains("\"yes\""));
    }

    #[test]
    fn test_message_prefix_matches_kind_code() {
        let values = [
            ValueError::NonFiniteNumber { value: f64::NAN },
            ValueError::WrongAlternative {
                expected: DataType::Url,
                selected: DataType::Text,
            },
            ValueError::UnknownProperty {
                entity_type: "Person".into(),
                property: "warpFactor".to_string(),
            },
        ];
        for err in values {
            let prefix = format!("[{}]", err.kind().code());
            assert!(err.to_string().starts_with(&prefix), "{err}");
        }

        let schemas = [
            SchemaError::UnknownEnumeration { name: "Color".to_string() },
            SchemaError::DuplicateType { name: "Thing".to_string() },
            SchemaError::TooManyAlternatives {
                entity_type: "Thing".to_string(),
                property: "name".to_string(),
                count: 300,
                max: 255,
            },
        ];
        for err in schemas {
            let prefix = format!("[{}]", err.kind().code());
            assert!(err.to_string().starts_with(&prefix), "{err}");
        }

        let decodes = [
            DecodeError::EntityTypeMismatch {
                expected: "Person".into(),
                found: "Organization".to_string(),
            },
            DecodeError::UnknownProperty {
                entity_type: "Person".into(),
                property: "warpFactor".to_string(),
            },
            DecodeError::MissingType,
            DecodeError::DepthExceeded { max: 32 },
        ];
        for err in decodes {
            let prefix = format!("[{}]", err.kind().code());
            assert!(err.to_string().starts_with(&prefix), "{err}");
        }
    }

    #[test]
    fn test_describe_alternatives() {
        let alts = [DataType::Text, DataType::Url, DataType::entity("Thing")];
        assert_eq!(describe_alternatives(&alts), "Text, URL, Thing");
    }
}
