//! Load-time registry construction.
//!
//! Declarations name their ranges as strings ("Text", "URL", "Organization")
//! and are resolved in [`RegistryBuilder::build`], so types may reference
//! each other in any order.
//!
//! ```rust
//! use schemaorg_or::schema::Registry;
//!
//! let registry = Registry::builder()
//!     .property_set("Thing", |s| s.property("name", ["Text"]))
//!     .entity_type("Thing", |t| t.include("Thing"))
//!     .entity_type("LoanOrCredit", |t| {
//!         t.subtype_of("Thing")
//!             .property("currency", ["Text"])
//!             .property("loanType", ["Text", "URL"])
//!             .include("Thing")
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.lookup("LoanOrCredit").unwrap().properties().len(), 3);
//! ```

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::SchemaError;
use crate::limits::MAX_ALTERNATIVES;
use crate::model::{Alternatives, DataType, TypeName};
use crate::schema::{EntityType, EnumerationType, PropertyDecl, Registry};

/// One range entry, either by name or already resolved.
#[derive(Debug, Clone)]
enum Range {
    Named(TypeName),
    Typed(DataType),
}

impl Range {
    fn label(&self) -> &str {
        match self {
            Range::Named(name) => name,
            Range::Typed(dt) => dt.name(),
        }
    }
}

#[derive(Debug, Clone)]
struct PropertyDef {
    name: TypeName,
    ranges: Vec<Range>,
}

#[derive(Debug, Clone)]
enum Item {
    Property(PropertyDef),
    Include(TypeName),
}

#[derive(Debug, Clone)]
struct TypeDef {
    name: TypeName,
    supertypes: Vec<TypeName>,
    items: Vec<Item>,
}

/// Builder for a named, reusable group of property declarations.
#[derive(Debug, Clone, Default)]
pub struct PropertySetBuilder {
    properties: Vec<PropertyDef>,
}

impl PropertySetBuilder {
    /// Declares a property with its ordered range names.
    pub fn property<R, I>(mut self, name: impl Into<TypeName>, ranges: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: Into<TypeName>,
    {
        self.properties.push(PropertyDef {
            name: name.into(),
            ranges: ranges.into_iter().map(|r| Range::Named(r.into())).collect(),
        });
        self
    }
}

/// Builder for one entity type.
#[derive(Debug, Clone, Default)]
pub struct EntityTypeBuilder {
    supertypes: Vec<TypeName>,
    items: Vec<Item>,
}

impl EntityTypeBuilder {
    /// Records an is-a relation, used when matching nested entities.
    pub fn subtype_of(mut self, supertype: impl Into<TypeName>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Declares a property with its ordered range names.
    pub fn property<R, I>(mut self, name: impl Into<TypeName>, ranges: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: Into<TypeName>,
    {
        self.items.push(Item::Property(PropertyDef {
            name: name.into(),
            ranges: ranges.into_iter().map(|r| Range::Named(r.into())).collect(),
        }));
        self
    }

    /// Splices a property set in at this position.
    pub fn include(mut self, set: impl Into<TypeName>) -> Self {
        self.items.push(Item::Include(set.into()));
        self
    }
}

/// Builder for a [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    enumerations: Vec<(TypeName, Vec<String>)>,
    property_sets: Vec<(TypeName, Vec<PropertyDef>)>,
    types: Vec<TypeDef>,
    declared: Vec<(TypeName, PropertyDef)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an enumeration and its members.
    pub fn enumeration<M, S>(mut self, name: impl Into<TypeName>, members: M) -> Self
    where
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumerations
            .push((name.into(), members.into_iter().map(Into::into).collect()));
        self
    }

    /// Declares a property set using a builder function.
    pub fn property_set<F>(mut self, name: impl Into<TypeName>, f: F) -> Self
    where
        F: FnOnce(PropertySetBuilder) -> PropertySetBuilder,
    {
        let set = f(PropertySetBuilder::default());
        self.property_sets.push((name.into(), set.properties));
        self
    }

    /// Declares an entity type using a builder function.
    pub fn entity_type<F>(mut self, name: impl Into<TypeName>, f: F) -> Self
    where
        F: FnOnce(EntityTypeBuilder) -> EntityTypeBuilder,
    {
        let t = f(EntityTypeBuilder::default());
        self.types.push(TypeDef {
            name: name.into(),
            supertypes: t.supertypes,
            items: t.items,
        });
        self
    }

    /// Appends a property to an entity type declared on this builder.
    ///
    /// The property goes after everything the type declares itself.
    pub fn declare_property<A>(
        mut self,
        entity_type: impl Into<TypeName>,
        property: impl Into<TypeName>,
        alternatives: A,
    ) -> Self
    where
        A: IntoIterator<Item = DataType>,
    {
        self.declared.push((
            entity_type.into(),
            PropertyDef {
                name: property.into(),
                ranges: alternatives.into_iter().map(Range::Typed).collect(),
            },
        ));
        self
    }

    /// Resolves every declaration and builds the registry.
    pub fn build(self) -> Result<Registry, SchemaError> {
        let mut registry = Registry::default();

        for (name, members) in self.enumerations {
            if registry.enum_index.contains_key(&name) {
                return Err(SchemaError::DuplicateType {
                    name: name.into_owned(),
                });
            }
            let mut index = FxHashMap::default();
            for (i, member) in members.iter().enumerate() {
                if index.insert(member.clone(), i).is_some() {
                    return Err(SchemaError::DuplicateMember {
                        enumeration: name.into_owned(),
                        member: member.clone(),
                    });
                }
            }
            registry
                .enum_index
                .insert(name.clone(), registry.enumerations.len());
            registry.enumerations.push(Arc::new(EnumerationType {
                name,
                members,
                index,
            }));
        }

        let mut supertypes: FxHashMap<&str, &[TypeName]> = FxHashMap::default();
        for t in &self.types {
            if registry.enum_index.contains_key(&t.name)
                || supertypes.insert(&*t.name, t.supertypes.as_slice()).is_some()
            {
                return Err(SchemaError::DuplicateType {
                    name: t.name.to_string(),
                });
            }
        }

        let mut sets: FxHashMap<&str, &[PropertyDef]> = FxHashMap::default();
        for (name, props) in &self.property_sets {
            if sets.insert(&**name, props.as_slice()).is_some() {
                return Err(SchemaError::DuplicateType {
                    name: name.to_string(),
                });
            }
        }

        for (entity_type, _) in &self.declared {
            if !supertypes.contains_key(&**entity_type) {
                return Err(SchemaError::UnknownEntityType {
                    name: entity_type.to_string(),
                });
            }
        }

        let resolver = Resolver {
            registry: &registry,
            types: &supertypes,
        };

        // Alternatives declared once in a property set are shared by every includer.
        let mut set_cache: FxHashMap<&str, Vec<PropertyDecl>> = FxHashMap::default();
        let mut types = Vec::with_capacity(self.types.len());

        for t in &self.types {
            for parent in &t.supertypes {
                if !supertypes.contains_key(&**parent) {
                    return Err(SchemaError::UnknownSupertype {
                        entity_type: t.name.to_string(),
                        supertype: parent.to_string(),
                    });
                }
            }

            let mut properties: Vec<PropertyDecl> = Vec::new();
            for item in &t.items {
                match item {
                    Item::Property(def) => properties.push(resolver.resolve(&t.name, def)?),
                    Item::Include(set) => {
                        if !set_cache.contains_key(&**set) {
                            let Some(defs) = sets.get(&**set) else {
                                return Err(SchemaError::UnknownPropertySet {
                                    entity_type: t.name.to_string(),
                                    set: set.to_string(),
                                });
                            };
                            let resolved = defs
                                .iter()
                                .map(|def| resolver.resolve(set, def))
                                .collect::<Result<Vec<_>, _>>()?;
                            set_cache.insert(set, resolved);
                        }
                        properties.extend(set_cache[&**set].iter().cloned());
                    }
                }
            }
            for (_, def) in self.declared.iter().filter(|(name, _)| *name == t.name) {
                properties.push(resolver.resolve(&t.name, def)?);
            }

            let mut index = FxHashMap::default();
            for (i, p) in properties.iter().enumerate() {
                if index.insert(p.name.clone(), i).is_some() {
                    return Err(SchemaError::DuplicateProperty {
                        entity_type: t.name.to_string(),
                        property: p.name.to_string(),
                    });
                }
            }

            types.push(EntityType {
                name: t.name.clone(),
                supertypes: t.supertypes.clone(),
                ancestors: ancestors(&t.name, &supertypes),
                properties,
                index,
            });
        }

        for t in types {
            registry
                .type_index
                .insert(t.name.clone(), registry.types.len());
            registry.types.push(Arc::new(t));
        }

        debug!(
            entity_types = registry.types.len(),
            enumerations = registry.enumerations.len(),
            property_sets = self.property_sets.len(),
            "built registry"
        );

        Ok(registry)
    }
}

/// Resolves range names against the primitives, enumerations, and declared types.
struct Resolver<'a> {
    registry: &'a Registry,
    types: &'a FxHashMap<&'a str, &'a [TypeName]>,
}

impl Resolver<'_> {
    fn resolve(&self, owner: &str, def: &PropertyDef) -> Result<PropertyDecl, SchemaError> {
        if def.ranges.is_empty() {
            return Err(SchemaError::EmptyAlternatives {
                entity_type: owner.to_string(),
                property: def.name.to_string(),
            });
        }
        if def.ranges.len() > MAX_ALTERNATIVES {
            return Err(SchemaError::TooManyAlternatives {
                entity_type: owner.to_string(),
                property: def.name.to_string(),
                count: def.ranges.len(),
                max: MAX_ALTERNATIVES,
            });
        }

        let mut alternatives: Vec<DataType> = Vec::with_capacity(def.ranges.len());
        for range in &def.ranges {
            let dt = self
                .data_type(range)
                .ok_or_else(|| SchemaError::UnknownRange {
                    entity_type: owner.to_string(),
                    property: def.name.to_string(),
                    range: range.label().to_string(),
                })?;
            if alternatives.contains(&dt) {
                return Err(SchemaError::DuplicateAlternative {
                    entity_type: owner.to_string(),
                    property: def.name.to_string(),
                    range: range.label().to_string(),
                });
            }
            alternatives.push(dt);
        }

        let alternatives: Alternatives = Arc::from(alternatives);
        Ok(PropertyDecl {
            name: def.name.clone(),
            alternatives,
        })
    }

    fn data_type(&self, range: &Range) -> Option<DataType> {
        match range {
            Range::Named(name) => DataType::primitive(name).or_else(|| {
                if self.registry.enum_index.contains_key(name) {
                    Some(DataType::Enumeration(name.clone()))
                } else if self.types.contains_key(&**name) {
                    Some(DataType::Entity(name.clone()))
                } else {
                    None
                }
            }),
            Range::Typed(dt) => match dt {
                DataType::Enumeration(name) if !self.registry.enum_index.contains_key(name) => {
                    None
                }
                DataType::Entity(name) if !self.types.contains_key(&**name) => None,
                _ => Some(dt.clone()),
            },
        }
    }
}

/// Collects every transitive supertype of `name`.
fn ancestors(name: &str, supertypes: &FxHashMap<&str, &[TypeName]>) -> FxHashSet<TypeName> {
    let mut seen: FxHashSet<TypeName> = FxHashSet::default();
    let mut stack: Vec<&str> = vec![name];
    while let Some(current) = stack.pop() {
        for parent in supertypes.get(current).copied().unwrap_or_default() {
            if parent != name && seen.insert(parent.clone()) {
                stack.push(parent);
            }
        }
    }
    seen
}
