//! Simple inspector for schema.org JSON-LD documents.
//!
//! Decodes a document against the built-in vocabulary and prints which
//! alternative every property resolved to.
//!
//! Usage: `cargo run --example inspect -- loan.json [--lenient]`

use std::fs;

use schemaorg_or::codec::deserialize_any_with_options;
use schemaorg_or::vocab::vocabulary;
use schemaorg_or::{DeserializeOptions, Entity, Value};

fn format_value(v: &Value) -> String {
    match v {
        Value::Text(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.chars().count() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Url(u) => format!("<{}>", u),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => format!("{:.6}", n),
        Value::Date(d) => format!("DATE({})", d),
        Value::DateTime(dt) => format!("DATETIME({})", dt),
        Value::Time(t) => format!("TIME({})", t),
        Value::Duration(d) => format!("DURATION({})", d),
        Value::Enumeration(m) => format!("{}::{}", m.enumeration(), m.name()),
        Value::Entity(e) => format!("{} {{..}}", e.type_name()),
    }
}

fn print_entity(entity: &Entity, indent: usize) {
    let pad = "  ".repeat(indent);
    println!(
        "{}{}{}",
        pad,
        entity.type_name(),
        entity.id().map(|id| format!(" <{}>", id)).unwrap_or_default()
    );
    for (name, or) in entity.properties() {
        println!(
            "{}  {} [{} of {}]: {}",
            pad,
            name,
            or.selected_type(),
            or.alternatives().len(),
            format_value(or.value())
        );
        if let Value::Entity(child) = or.value() {
            print_entity(child, indent + 2);
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "loan.json".to_string());
    let options = if args.any(|a| a == "--lenient") {
        DeserializeOptions::lenient()
    } else {
        DeserializeOptions::default()
    };

    println!("Reading: {}", path);

    let text = fs::read_to_string(&path).expect("Failed to read file");
    println!("File size: {} bytes", text.len());

    let document: serde_json::Value = serde_json::from_str(&text).expect("Failed to parse JSON");
    match deserialize_any_with_options(vocabulary(), &document, &options) {
        Ok(entity) => {
            println!("\n=== Entity ({} properties) ===", entity.len());
            print_entity(&entity, 0);
        }
        Err(e) => {
            eprintln!("\n[{}] {}", e.kind().code(), e);
            std::process::exit(1);
        }
    }
}
