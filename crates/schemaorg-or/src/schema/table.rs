//! Declarative schema tables.
//!
//! A [`SchemaTable`] is the serde form of a registry, for schema sources
//! that live outside the crate (generated from the schema.org vocabulary
//! dump, checked into an application, ...).
//!
//! ```json
//! {
//!   "enumerations": [{ "name": "LegalForceStatus", "members": ["InForce", "NotInForce"] }],
//!   "propertySets": [{ "name": "Thing", "properties": [{ "name": "name", "range": ["Text"] }] }],
//!   "types": [
//!     { "name": "Thing", "include": ["Thing"] },
//!     {
//!       "name": "Legislation",
//!       "subtypeOf": ["Thing"],
//!       "properties": [{ "name": "legislationLegalForce", "range": ["LegalForceStatus"] }],
//!       "include": ["Thing"]
//!     }
//!   ]
//! }
//! ```
//!
//! A type's own `properties` come first, followed by its `include`d sets
//! in order.

use serde::{Deserialize, Serialize};

use crate::schema::{Registry, RegistryBuilder};

/// Serde form of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaTable {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enumerations: Vec<EnumerationDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_sets: Vec<PropertySetDef>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumerationDef {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySetDef {
    pub name: String,
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtype_of: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// A property and its ordered range names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDef {
    pub name: String,
    pub range: Vec<String>,
}

impl SchemaTable {
    /// Exports a registry as a flattened table (no property sets).
    ///
    /// Loading the result yields a registry with the same types, property
    /// order, and alternatives.
    pub fn from_registry(registry: &Registry) -> Self {
        let enumerations = registry
            .enumerations()
            .map(|e| EnumerationDef {
                name: e.name().to_string(),
                members: e.members().to_vec(),
            })
            .collect();

        let types = registry
            .entity_types()
            .map(|t| TypeDef {
                name: t.name().to_string(),
                subtype_of: t.supertypes().iter().map(|s| s.to_string()).collect(),
                properties: t
                    .properties()
                    .iter()
                    .map(|p| PropertyDef {
                        name: p.name().to_string(),
                        range: p.alternatives().iter().map(|a| a.name().to_string()).collect(),
                    })
                    .collect(),
                include: Vec::new(),
            })
            .collect();

        Self {
            enumerations,
            property_sets: Vec::new(),
            types,
        }
    }

    /// Converts the table into registry declarations.
    pub fn to_builder(&self) -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();

        for e in &self.enumerations {
            builder = builder.enumeration(e.name.clone(), e.members.iter().cloned());
        }

        for set in &self.property_sets {
            builder = builder.property_set(set.name.clone(), |mut s| {
                for p in &set.properties {
                    s = s.property(p.name.clone(), p.range.iter().cloned());
                }
                s
            });
        }

        for t in &self.types {
            builder = builder.entity_type(t.name.clone(), |mut b| {
                for parent in &t.subtype_of {
                    b = b.subtype_of(parent.clone());
                }
                for p in &t.properties {
                    b = b.property(p.name.clone(), p.range.iter().cloned());
                }
                for set in &t.include {
                    b = b.include(set.clone());
                }
                b
            });
        }

        builder
    }
}
