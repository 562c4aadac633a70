//! Hard limits applied when building registries and decoding documents.
//!
//! Documents are untrusted input; these bounds keep recursion and
//! per-property work predictable.

/// Default maximum nesting depth of entities within one document.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Maximum number of alternatives a single property may declare.
pub const MAX_ALTERNATIVES: usize = 16;

/// Vocabulary base used for enumeration members.
pub const SCHEMA_ORG_BASE: &str = "https://schema.org/";

/// Legacy vocabulary base still common in published documents.
pub const SCHEMA_ORG_BASE_HTTP: &str = "http://schema.org/";

/// Default JSON-LD context value.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";
