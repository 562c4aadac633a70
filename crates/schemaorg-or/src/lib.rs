//! schemaorg-or: alternative-typed schema.org property values with a JSON-LD codec.
//!
//! schema.org lets most properties hold one of several types: a loan's
//! `amount` is a `MonetaryAmount` *or* a `Number`, its `loanType` is `Text`
//! *or* a `URL`. This crate models such values as an [`Or`]: exactly one of
//! a closed, declared list of alternatives, with the populated one recorded
//! explicitly.
//!
//! # Overview
//!
//! - Entity types and their properties live in a [`Registry`], built once
//!   (see [`vocab`] for the built-in schema.org catalog) and shared.
//! - [`Entity`] holds at most one [`Or`] per declared property.
//! - Serialization writes the populated payload only; deserialization
//!   recovers the alternative structurally, trying alternatives in
//!   declaration order and taking the first that fits.
//!
//! # Quick Start
//!
//! ```rust
//! use schemaorg_or::{deserialize, serialize, DataType, Value};
//! use schemaorg_or::vocab::vocabulary;
//!
//! let vocab = vocabulary();
//!
//! let mut loan = vocab.new_entity("LoanOrCredit").unwrap();
//! loan.set("currency", &DataType::Text, Value::text("USD")).unwrap();
//!
//! let doc = serialize(&loan);
//! assert_eq!(doc.to_string(), r#"{"@type":"LoanOrCredit","currency":"USD"}"#);
//!
//! let back = deserialize(vocab, "LoanOrCredit", &doc).unwrap();
//! let currency = back.get("currency").unwrap();
//! assert_eq!(currency.selected_type(), &DataType::Text);
//! assert_eq!(currency.value().as_text(), Some("USD"));
//! assert_eq!(back, loan);
//! ```
//!
//! # Modules
//!
//! - [`model`]: `DataType`, `Value`, `Or`, `Entity` and the entity builder
//! - [`schema`]: the registry, its builder, and the serde schema table
//! - [`vocab`]: the built-in schema.org vocabulary
//! - [`codec`]: JSON-LD serialization and deserialization
//! - [`codegen`]: Rust binding generation from a registry
//! - [`util`]: ISO 8601 date, time and duration handling
//! - [`error`]: Error types
//! - [`limits`]: Hard limits for decoding
//!
//! # Untrusted input
//!
//! The deserializer never panics on malformed documents. Nesting is bounded
//! by [`limits::MAX_NESTING_DEPTH`], and every rejection is a typed
//! [`DecodeError`].

pub mod codec;
pub mod codegen;
pub mod error;
pub mod limits;
pub mod model;
pub mod schema;
pub mod util;
pub mod vocab;

// Re-export commonly used types at crate root
pub use codec::{
    deserialize, deserialize_any, deserialize_with_options, serialize, serialize_with_options,
    DeserializeOptions, SerializeOptions, UnknownPropertyPolicy,
};
pub use error::{DecodeError, ErrorKind, SchemaError, ValueError};
pub use model::{
    DataType, Date, DateTime, EnumMember, Entity, EntityBuilder, IsoDuration, Or, Time, Value,
};
pub use schema::{EntityType, EnumerationType, PropertyDecl, Registry, RegistryBuilder};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
