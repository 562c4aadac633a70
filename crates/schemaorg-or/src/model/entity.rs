//! Entity instances: flat records of optional alternative-typed properties.

use std::sync::Arc;

use crate::error::ValueError;
use crate::model::{DataType, Or, Value};
use crate::schema::{EntityType, PropertyDecl};

/// An instance of a registered entity type.
///
/// Property slots follow the type's declaration order. Every slot is
/// independently optional; inherited properties sit in the same flat list
/// as the type's own.
#[derive(Debug, Clone)]
pub struct Entity {
    schema: Arc<EntityType>,
    id: Option<String>,
    values: Vec<Option<Or>>,
}

impl Entity {
    /// Creates an entity with every property absent.
    pub fn new(schema: Arc<EntityType>) -> Self {
        let values = vec![None; schema.properties().len()];
        Self {
            schema,
            id: None,
            values,
        }
    }

    /// The `@type` name.
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    pub fn entity_type(&self) -> &Arc<EntityType> {
        &self.schema
    }

    /// The node identifier (`@id`), if set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    fn slot(&self, property: &str) -> Result<(usize, &PropertyDecl), ValueError> {
        self.schema
            .property(property)
            .ok_or_else(|| ValueError::UnknownProperty {
                entity_type: self.schema.name_cow(),
                property: property.to_string(),
            })
    }

    /// Sets `property` to `value` as the given alternative.
    pub fn set(
        &mut self,
        property: &str,
        alternative: &DataType,
        value: Value,
    ) -> Result<(), ValueError> {
        let (index, decl) = self.slot(property)?;
        let or = Or::new(decl.alternatives().clone(), alternative, value)?;
        self.values[index] = Some(or);
        Ok(())
    }

    /// Sets `property` to `value` as the first declared alternative it fits.
    pub fn set_value(&mut self, property: &str, value: Value) -> Result<(), ValueError> {
        let (index, decl) = self.slot(property)?;
        let or = Or::infer(decl.alternatives().clone(), value)?;
        self.values[index] = Some(or);
        Ok(())
    }

    /// Makes `property` absent, returning its previous value.
    pub fn clear(&mut self, property: &str) -> Result<Option<Or>, ValueError> {
        let (index, _) = self.slot(property)?;
        Ok(self.values[index].take())
    }

    /// Returns the value of `property`, or `None` if absent or undeclared.
    pub fn get(&self, property: &str) -> Option<&Or> {
        let (index, _) = self.schema.property(property)?;
        self.values[index].as_ref()
    }

    /// Iterates present properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Or)> {
        self.schema
            .properties()
            .iter()
            .zip(&self.values)
            .filter_map(|(decl, value)| value.as_ref().map(|or| (decl.name(), or)))
    }

    /// Number of present properties.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Returns true if no property is present.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Stores an already-validated value at a declaration index.
    pub(crate) fn put(&mut self, index: usize, or: Or) {
        self.values[index] = Some(or);
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.id == other.id && self.values == other.values
    }
}
