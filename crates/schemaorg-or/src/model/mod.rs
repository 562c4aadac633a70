//! Data model types.
//!
//! This module contains the core types for representing schema.org data:
//! - Data types (the shapes an alternative may take)
//! - Values (concrete payloads)
//! - The `Or` wrapper (exactly one of a declared set of alternatives)
//! - Entities (flat records of optional properties)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod datatype;
pub mod entity;
pub mod or;
pub mod value;

pub use builder::EntityBuilder;
pub use datatype::{Alternatives, DataType, TypeName};
pub use entity::Entity;
pub use or::Or;
pub use value::{Date, DateTime, EnumMember, IsoDuration, Time, Value};
