//! Builder API for ergonomic Entity construction.
//!
//! Provides a fluent interface for populating an entity. Each setter picks
//! the first declared alternative its value fits, unless the alternative is
//! given explicitly with [`EntityBuilder::set`]. The first failure is kept
//! and returned by [`EntityBuilder::build`].
//!
//! # Example
//!
//! ```rust
//! use schemaorg_or::vocab::vocabulary;
//! use schemaorg_or::IsoDuration;
//!
//! let vocab = vocabulary();
//! let loan = vocab
//!     .entity_builder("LoanOrCredit")
//!     .unwrap()
//!     .id("https://bank.example/loans/42")
//!     .text("currency", "USD")
//!     .number("amount", 250_000.0)
//!     .duration("gracePeriod", IsoDuration::from_months(3))
//!     .nested("provider", vocab.lookup("Organization").unwrap().clone(), |o| {
//!         o.text("name", "Example Bank")
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(loan.len(), 4);
//! ```

use std::sync::Arc;

use crate::error::ValueError;
use crate::model::{
    DataType, Date, DateTime, EnumMember, Entity, IsoDuration, Time, Value,
};
use crate::schema::EntityType;

/// Builder for a single entity.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
    error: Option<ValueError>,
}

impl EntityBuilder {
    /// Creates a builder for an entity of the given type.
    pub fn new(schema: Arc<EntityType>) -> Self {
        Self {
            entity: Entity::new(schema),
            error: None,
        }
    }

    fn record(mut self, result: Result<(), ValueError>) -> Self {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
        self
    }

    /// Sets the node identifier (`@id`).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.entity.set_id(id);
        self
    }

    /// Sets a property as an explicit alternative.
    pub fn set(mut self, property: &str, alternative: &DataType, value: impl Into<Value>) -> Self {
        let result = self.entity.set(property, alternative, value.into());
        self.record(result)
    }

    /// Sets a property as the first declared alternative the value fits.
    pub fn value(mut self, property: &str, value: impl Into<Value>) -> Self {
        let result = self.entity.set_value(property, value.into());
        self.record(result)
    }

    // =========================================================================
    // Typed setters
    // =========================================================================

    /// Sets a Text value.
    pub fn text(self, property: &str, value: impl Into<String>) -> Self {
        self.value(property, Value::Text(value.into()))
    }

    /// Sets a URL value; an unparseable URL is recorded as an error.
    pub fn url(self, property: &str, value: &str) -> Self {
        match Value::url(value) {
            Ok(v) => self.value(property, v),
            Err(e) => self.record(Err(e)),
        }
    }

    /// Sets a Boolean value.
    pub fn boolean(self, property: &str, value: bool) -> Self {
        self.value(property, Value::Boolean(value))
    }

    /// Sets an Integer value.
    pub fn integer(self, property: &str, value: i64) -> Self {
        self.value(property, Value::Integer(value))
    }

    /// Sets a Number value; non-finite numbers are recorded as an error.
    pub fn number(self, property: &str, value: f64) -> Self {
        match Value::number(value) {
            Ok(v) => self.value(property, v),
            Err(e) => self.record(Err(e)),
        }
    }

    /// Sets a Date value.
    pub fn date(self, property: &str, value: Date) -> Self {
        self.value(property, Value::Date(value))
    }

    /// Sets a DateTime value.
    pub fn datetime(self, property: &str, value: DateTime) -> Self {
        self.value(property, Value::DateTime(value))
    }

    /// Sets a Time value.
    pub fn time(self, property: &str, value: Time) -> Self {
        self.value(property, Value::Time(value))
    }

    /// Sets a Duration value.
    pub fn duration(self, property: &str, value: IsoDuration) -> Self {
        self.value(property, Value::Duration(value))
    }

    /// Sets an enumeration member.
    pub fn member(self, property: &str, value: EnumMember) -> Self {
        self.value(property, Value::Enumeration(value))
    }

    /// Sets a nested entity.
    pub fn entity(self, property: &str, value: Entity) -> Self {
        self.value(property, Value::entity(value))
    }

    /// Sets a nested entity built with a builder function.
    pub fn nested<F>(self, property: &str, schema: Arc<EntityType>, f: F) -> Self
    where
        F: FnOnce(EntityBuilder) -> EntityBuilder,
    {
        match f(EntityBuilder::new(schema)).build() {
            Ok(child) => self.entity(property, child),
            Err(e) => self.record(Err(e)),
        }
    }

    /// Finishes the entity, or returns the first error a setter hit.
    pub fn build(self) -> Result<Entity, ValueError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.entity),
        }
    }
}
