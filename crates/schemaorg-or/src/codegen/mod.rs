//! Rust binding generation from a registry.
//!
//! Emits plain Rust types for a set of root entity types and everything
//! reachable from them: one struct per entity type (fields in declaration
//! order, all `Option`), one enum per enumeration, and one enum per distinct
//! multi-alternative list, named after its alternatives
//! (`MonetaryAmountOrNumber`).
//!
//! ```rust
//! use schemaorg_or::codegen::generate_rust;
//! use schemaorg_or::vocab::vocabulary;
//!
//! let source = generate_rust(vocabulary(), &["LoanOrCredit"]).unwrap();
//! assert!(source.contains("pub struct LoanOrCredit {"));
//! assert!(source.contains("pub amount: Option<MonetaryAmountOrNumber>,"));
//! ```

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::SchemaError;
use crate::model::DataType;
use crate::schema::{EntityType, EnumerationType, Registry};

/// Generates Rust source for `roots` and every type reachable from them.
pub fn generate_rust(registry: &Registry, roots: &[&str]) -> Result<String, SchemaError> {
    let plan = Plan::collect(registry, roots)?;
    debug!(
        structs = plan.types.len(),
        enumerations = plan.enumerations.len(),
        unions = plan.unions.len(),
        "generated bindings"
    );
    Ok(plan.to_string())
}

struct Union<'r> {
    name: String,
    alternatives: &'r [DataType],
}

/// Everything reachable from the roots, in discovery order.
struct Plan<'r> {
    types: Vec<&'r EntityType>,
    enumerations: Vec<&'r EnumerationType>,
    unions: Vec<Union<'r>>,
    union_index: FxHashMap<&'r [DataType], usize>,
}

impl<'r> Plan<'r> {
    fn collect(registry: &'r Registry, roots: &[&str]) -> Result<Self, SchemaError> {
        let mut plan = Plan {
            types: Vec::new(),
            enumerations: Vec::new(),
            unions: Vec::new(),
            union_index: FxHashMap::default(),
        };
        let mut seen_types: FxHashSet<&str> = FxHashSet::default();
        let mut seen_enums: FxHashSet<&str> = FxHashSet::default();
        let mut queue = VecDeque::new();

        for root in roots {
            let t = registry.lookup(root)?;
            if seen_types.insert(t.name()) {
                queue.push_back(t);
            }
        }

        while let Some(t) = queue.pop_front() {
            plan.types.push(t);
            for decl in t.properties() {
                let alternatives: &'r [DataType] = decl.alternatives();
                if alternatives.len() > 1 && !plan.union_index.contains_key(alternatives) {
                    let name = union_name(registry, alternatives);
                    plan.union_index.insert(alternatives, plan.unions.len());
                    plan.unions.push(Union { name, alternatives });
                }
                for alt in alternatives {
                    match alt {
                        DataType::Entity(name) => {
                            if seen_types.insert(name) {
                                queue.push_back(registry.lookup(name)?);
                            }
                        }
                        DataType::Enumeration(name) => {
                            if seen_enums.insert(name) {
                                plan.enumerations.push(registry.enumeration(name)?);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        Ok(plan)
    }

    /// Type of a field; `collect` registered every multi-alternative list.
    fn field_type(&self, alternatives: &[DataType]) -> String {
        match alternatives {
            [single] => rust_type(single),
            _ => self.unions[self.union_index[alternatives]].name.clone(),
        }
    }

    fn write_enumeration(&self, f: &mut fmt::Formatter<'_>, e: &EnumerationType) -> fmt::Result {
        writeln!(f, "/// schema.org enumeration `{}`.", e.name())?;
        writeln!(f, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
        writeln!(f, "pub enum {} {{", type_ident(e.name()))?;
        for member in e.members() {
            writeln!(f, "    {},", type_ident(member))?;
        }
        writeln!(f, "}}")
    }

    fn write_struct(&self, f: &mut fmt::Formatter<'_>, t: &EntityType) -> fmt::Result {
        let fields: Vec<(String, String)> = t
            .properties()
            .iter()
            .map(|p| (field_ident(p.name()), self.field_type(p.alternatives())))
            .collect();
        let id_field = if fields.iter().any(|(name, _)| name == "id") {
            "node_id"
        } else {
            "id"
        };

        writeln!(f, "/// schema.org `{}`.", t.name())?;
        writeln!(f, "#[derive(Debug, Clone, Default, PartialEq)]")?;
        writeln!(f, "pub struct {} {{", type_ident(t.name()))?;
        writeln!(f, "    /// Node identifier (`@id`).")?;
        writeln!(f, "    pub {id_field}: Option<String>,")?;
        for (name, ty) in &fields {
            writeln!(f, "    pub {name}: Option<{ty}>,")?;
        }
        writeln!(f, "}}")
    }

    fn write_union(&self, f: &mut fmt::Formatter<'_>, union: &Union<'_>) -> fmt::Result {
        writeln!(f, "#[derive(Debug, Clone, PartialEq)]")?;
        writeln!(f, "pub enum {} {{", union.name)?;
        for alt in union.alternatives {
            writeln!(f, "    {}({}),", variant_name(alt), rust_type(alt))?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Plan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Generated from a schema.org registry. Do not edit by hand.")?;
        writeln!(f)?;
        writeln!(f, "#[allow(unused_imports)]")?;
        writeln!(f, "use schemaorg_or::model::{{Date, DateTime, IsoDuration, Time}};")?;

        for e in &self.enumerations {
            writeln!(f)?;
            self.write_enumeration(f, e)?;
        }
        for t in &self.types {
            writeln!(f)?;
            self.write_struct(f, t)?;
        }
        for union in &self.unions {
            writeln!(f)?;
            self.write_union(f, union)?;
        }
        Ok(())
    }
}

fn rust_type(dt: &DataType) -> String {
    match dt {
        DataType::Text => "String".to_string(),
        DataType::Url => "url::Url".to_string(),
        DataType::Boolean => "bool".to_string(),
        DataType::Integer => "i64".to_string(),
        DataType::Number => "f64".to_string(),
        DataType::Date => "Date".to_string(),
        DataType::DateTime => "DateTime".to_string(),
        DataType::Time => "Time".to_string(),
        DataType::Duration => "IsoDuration".to_string(),
        DataType::Enumeration(name) => type_ident(name),
        DataType::Entity(name) => format!("Box<{}>", type_ident(name)),
    }
}

fn variant_name(dt: &DataType) -> String {
    match dt {
        DataType::Url => "Url".to_string(),
        DataType::Enumeration(name) | DataType::Entity(name) => type_ident(name),
        primitive => primitive.name().to_string(),
    }
}

fn union_name(registry: &Registry, alternatives: &[DataType]) -> String {
    let name = alternatives
        .iter()
        .map(variant_name)
        .collect::<Vec<_>>()
        .join("Or");
    if registry.get(&name).is_some() || registry.enumeration(&name).is_ok() {
        format!("{name}Value")
    } else {
        name
    }
}

/// Keeps identifier characters; prefixes `_` if the result would start with a digit.
fn type_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{ident}"),
        None => "_".to_string(),
        _ => ident,
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Converts a camelCase property name to a snake_case field name.
fn field_ident(name: &str) -> String {
    let chars: Vec<char> = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let mut out = String::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || prev.is_ascii_digit() || (prev.is_ascii_uppercase() && next_lower) {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    match out.as_str() {
        "" => "_".to_string(),
        "self" | "super" | "crate" => format!("{out}_"),
        s if KEYWORDS.contains(&s) => format!("r#{out}"),
        s if s.starts_with(|c: char| c.is_ascii_digit()) => format!("_{out}"),
        _ => out,
    }
}
