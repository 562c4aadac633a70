//! JSON-LD serialization and deserialization.
//!
//! Entities map to plain JSON objects keyed by property name. The
//! alternative a value was stored as is never written; deserialization
//! recovers it structurally.

pub mod decode;
pub mod encode;
pub mod options;

pub use decode::{
    deserialize, deserialize_any, deserialize_any_with_options, deserialize_with_options,
    from_json_str,
};
pub use encode::{
    encode_value, serialize, serialize_with_options, to_json_string, to_json_string_pretty,
};
pub use options::{DeserializeOptions, SerializeOptions, UnknownPropertyPolicy};
