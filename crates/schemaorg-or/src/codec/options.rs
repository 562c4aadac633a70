//! Serializer and deserializer options.

use serde::{Deserialize, Serialize};

use crate::limits::{MAX_NESTING_DEPTH, SCHEMA_ORG_BASE, SCHEMA_ORG_CONTEXT};

/// Options for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializeOptions {
    /// Emit `"@context": <context>` on the top-level object.
    ///
    /// Nested entities never carry a context.
    pub context: Option<String>,

    /// Prefix for enumeration members (`<base><member>`).
    pub enumeration_base: String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            context: None,
            enumeration_base: SCHEMA_ORG_BASE.to_string(),
        }
    }
}

impl SerializeOptions {
    /// Creates default options (no `@context`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for standalone JSON-LD documents, with the schema.org context.
    pub fn json_ld() -> Self {
        Self {
            context: Some(SCHEMA_ORG_CONTEXT.to_string()),
            ..Self::default()
        }
    }
}

/// How the deserializer treats keys the entity type does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPropertyPolicy {
    /// Fail with `UnknownProperty`.
    #[default]
    Reject,
    /// Drop the key and log it at debug level.
    Ignore,
}

/// Options for deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeserializeOptions {
    pub unknown_properties: UnknownPropertyPolicy,

    /// Maximum entity nesting depth; the top-level entity is depth 1.
    pub max_depth: usize,
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        Self {
            unknown_properties: UnknownPropertyPolicy::Reject,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl DeserializeOptions {
    /// Creates strict options (unknown properties rejected).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that drop unknown properties instead of failing.
    pub fn lenient() -> Self {
        Self {
            unknown_properties: UnknownPropertyPolicy::Ignore,
            ..Self::default()
        }
    }
}
