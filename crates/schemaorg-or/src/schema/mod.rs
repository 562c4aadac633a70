//! The entity registry.
//!
//! A [`Registry`] maps entity type names to their ordered property
//! declarations, and each declaration to its ordered alternative list. It
//! is populated once through a [`RegistryBuilder`] (or a [`SchemaTable`])
//! and read-only afterwards.

pub mod builder;
pub mod table;

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{SchemaError, ValueError};
use crate::model::{Alternatives, EntityBuilder, Entity, EnumMember, TypeName};

pub use builder::{EntityTypeBuilder, PropertySetBuilder, RegistryBuilder};
pub use table::SchemaTable;

/// One declared property of an entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub(crate) name: TypeName,
    pub(crate) alternatives: Alternatives,
}

impl PropertyDecl {
    /// Property name as it appears in documents (e.g., "loanTerm").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared alternatives, in declaration order.
    pub fn alternatives(&self) -> &Alternatives {
        &self.alternatives
    }
}

/// A registered entity type.
#[derive(Debug)]
pub struct EntityType {
    pub(crate) name: TypeName,
    /// Direct supertypes, as declared.
    pub(crate) supertypes: Vec<TypeName>,
    /// Every transitive supertype.
    pub(crate) ancestors: FxHashSet<TypeName>,
    pub(crate) properties: Vec<PropertyDecl>,
    pub(crate) index: FxHashMap<TypeName, usize>,
}

impl EntityType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_cow(&self) -> TypeName {
        self.name.clone()
    }

    /// Direct supertypes, in declaration order.
    pub fn supertypes(&self) -> &[TypeName] {
        &self.supertypes
    }

    /// Returns true if this type is `name` or declares it as a (transitive) supertype.
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name || self.ancestors.contains(name)
    }

    /// All properties, own and inherited, in declaration order.
    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    /// Looks up a property and its position in declaration order.
    pub fn property(&self, name: &str) -> Option<(usize, &PropertyDecl)> {
        let index = *self.index.get(name)?;
        Some((index, &self.properties[index]))
    }
}

/// A registered enumeration and its members.
#[derive(Debug)]
pub struct EnumerationType {
    pub(crate) name: TypeName,
    pub(crate) members: Vec<String>,
    pub(crate) index: FxHashMap<String, usize>,
}

impl EnumerationType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_cow(&self) -> TypeName {
        self.name.clone()
    }

    /// Member names, in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns the named member.
    pub fn member(self: &Arc<Self>, name: &str) -> Result<EnumMember, ValueError> {
        match self.index.get(name) {
            Some(&index) => Ok(EnumMember {
                enumeration: Arc::clone(self),
                index,
            }),
            None => Err(ValueError::UnknownEnumerationMember {
                enumeration: self.name.clone(),
                member: name.to_string(),
            }),
        }
    }
}

/// Entity type name → ordered property declarations.
#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) types: Vec<Arc<EntityType>>,
    pub(crate) type_index: FxHashMap<TypeName, usize>,
    pub(crate) enumerations: Vec<Arc<EnumerationType>>,
    pub(crate) enum_index: FxHashMap<TypeName, usize>,
}

impl Registry {
    /// Starts declaring a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Loads a registry from a schema table.
    pub fn from_table(table: &SchemaTable) -> Result<Self, SchemaError> {
        table.to_builder().build()
    }

    /// Loads a registry from a JSON schema table.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let table: SchemaTable =
            serde_json::from_str(json).map_err(|e| SchemaError::InvalidTable(e.to_string()))?;
        Self::from_table(&table)
    }

    /// Returns the entity type registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&Arc<EntityType>, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::UnknownEntityType {
            name: name.to_string(),
        })
    }

    /// Like [`Registry::lookup`], but `None` if unregistered.
    pub fn get(&self, name: &str) -> Option<&Arc<EntityType>> {
        self.type_index.get(name).map(|&i| &self.types[i])
    }

    /// Returns the enumeration registered under `name`.
    pub fn enumeration(&self, name: &str) -> Result<&Arc<EnumerationType>, SchemaError> {
        self.enum_index
            .get(name)
            .map(|&i| &self.enumerations[i])
            .ok_or_else(|| SchemaError::UnknownEnumeration {
                name: name.to_string(),
            })
    }

    /// Builds an enumeration payload, e.g. `("LegalForceStatus", "InForce")`.
    pub fn enum_member(&self, enumeration: &str, member: &str) -> Result<EnumMember, ValueError> {
        match self.enum_index.get(enumeration) {
            Some(&i) => self.enumerations[i].member(member),
            None => Err(ValueError::UnknownEnumerationMember {
                enumeration: TypeName::Owned(enumeration.to_string()),
                member: member.to_string(),
            }),
        }
    }

    /// Creates an empty entity of the named type.
    pub fn new_entity(&self, name: &str) -> Result<Entity, SchemaError> {
        Ok(Entity::new(Arc::clone(self.lookup(name)?)))
    }

    /// Starts building an entity of the named type.
    pub fn entity_builder(&self, name: &str) -> Result<EntityBuilder, SchemaError> {
        Ok(EntityBuilder::new(Arc::clone(self.lookup(name)?)))
    }

    /// Entity types in declaration order.
    pub fn entity_types(&self) -> impl Iterator<Item = &Arc<EntityType>> {
        self.types.iter()
    }

    /// Enumerations in declaration order.
    pub fn enumerations(&self) -> impl Iterator<Item = &Arc<EnumerationType>> {
        self.enumerations.iter()
    }

    /// Number of entity types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::DataType;

    fn sample() -> Registry {
        Registry::builder()
            .enumeration("LegalForceStatus", ["InForce", "NotInForce"])
            .property_set("Thing", |s| s.property("name", ["Text"]).property("url", ["URL"]))
            .entity_type("Thing", |t| t.include("Thing"))
            .entity_type("Organization", |t| t.subtype_of("Thing").include("Thing"))
            .entity_type("Legislation", |t| {
                t.subtype_of("Thing")
                    .property("legislationLegalForce", ["LegalForceStatus"])
                    .property("legislationPassedBy", ["Organization", "Text"])
                    .include("Thing")
            })
            .build()
            .unwrap()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_registry_is_send_sync() {
        assert_send_sync::<Registry>();
        assert_send_sync::<Arc<EntityType>>();
        assert_send_sync::<Entity>();
    }

    #[test]
    fn test_lookup() {
        let registry = sample();
        let legislation = registry.lookup("Legislation").unwrap();
        assert_eq!(legislation.name(), "Legislation");
        let names: Vec<_> = legislation.properties().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            ["legislationLegalForce", "legislationPassedBy", "name", "url"]
        );

        let (index, decl) = legislation.property("legislationPassedBy").unwrap();
        assert_eq!(index, 1);
        assert_eq!(
            decl.alternatives().as_ref(),
            &[DataType::entity("Organization"), DataType::Text]
        );
        assert_eq!(
            legislation.property("legislationLegalForce").unwrap().1.alternatives()[0],
            DataType::enumeration("LegalForceStatus")
        );
    }

    #[test]
    fn test_lookup_unknown() {
        let err = sample().lookup("Spaceship").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEntityType);
        assert!(sample().get("Spaceship").is_none());
    }

    #[test]
    fn test_is_a() {
        let registry = sample();
        let org = registry.lookup("Organization").unwrap();
        assert!(org.is_a("Organization"));
        assert!(org.is_a("Thing"));
        assert!(!org.is_a("Legislation"));
    }

    #[test]
    fn test_enum_member() {
        let registry = sample();
        let m = registry.enum_member("LegalForceStatus", "InForce").unwrap();
        assert_eq!(m.enumeration(), "LegalForceStatus");
        assert_eq!(m.name(), "InForce");
        assert!(registry.enum_member("LegalForceStatus", "Repealed").is_err());
        assert!(registry.enum_member("Colour", "Red").is_err());
        assert!(registry.enumeration("LegalForceStatus").is_ok());
    }

    #[test]
    fn test_new_entity() {
        let registry = sample();
        let e = registry.new_entity("Organization").unwrap();
        assert_eq!(e.type_name(), "Organization");
        assert!(registry.new_entity("Spaceship").is_err());
        assert_eq!(registry.len(), 3);
    }
}
