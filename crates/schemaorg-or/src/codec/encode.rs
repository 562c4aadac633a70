//! Entity → JSON-LD serialization.
//!
//! Output objects carry `@type`, then `@id` when set, then every present
//! property in declaration order. Which alternative a value was stored as
//! is never written; the payload shape alone carries it.

use serde_json::{Map, Number, Value as JsonValue};

use crate::codec::options::SerializeOptions;
use crate::model::{Entity, Value};

/// Serializes an entity with default options.
pub fn serialize(entity: &Entity) -> JsonValue {
    serialize_with_options(entity, &SerializeOptions::default())
}

/// Serializes an entity with the given options.
pub fn serialize_with_options(entity: &Entity, options: &SerializeOptions) -> JsonValue {
    let mut map = Map::new();
    if let Some(context) = &options.context {
        map.insert("@context".to_string(), JsonValue::String(context.clone()));
    }
    encode_entity_into(&mut map, entity, options);
    JsonValue::Object(map)
}

/// Serializes an entity to compact JSON text.
pub fn to_json_string(entity: &Entity, options: &SerializeOptions) -> String {
    serialize_with_options(entity, options).to_string()
}

/// Serializes an entity to indented JSON text.
pub fn to_json_string_pretty(entity: &Entity, options: &SerializeOptions) -> String {
    format!("{:#}", serialize_with_options(entity, options))
}

fn encode_entity_into(map: &mut Map<String, JsonValue>, entity: &Entity, options: &SerializeOptions) {
    map.insert(
        "@type".to_string(),
        JsonValue::String(entity.type_name().to_string()),
    );
    if let Some(id) = entity.id() {
        map.insert("@id".to_string(), JsonValue::String(id.to_string()));
    }
    for (name, or) in entity.properties() {
        map.insert(name.to_string(), encode_value(or.value(), options));
    }
}

/// Renders a single payload.
pub fn encode_value(value: &Value, options: &SerializeOptions) -> JsonValue {
    match value {
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Url(u) => JsonValue::String(u.as_str().to_string()),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Integer(i) => JsonValue::Number((*i).into()),
        // Entities never hold non-finite numbers; a bare payload renders them as null.
        Value::Number(n) => Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number),
        Value::Date(d) => JsonValue::String(d.to_string()),
        Value::DateTime(dt) => JsonValue::String(dt.to_string()),
        Value::Time(t) => JsonValue::String(t.to_string()),
        Value::Duration(d) => JsonValue::String(d.to_string()),
        Value::Enumeration(m) => {
            JsonValue::String(format!("{}{}", options.enumeration_base, m.name()))
        }
        Value::Entity(e) => {
            let mut map = Map::new();
            encode_entity_into(&mut map, e, options);
            JsonValue::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{DataType, Date, IsoDuration};
    use crate::vocab::vocabulary;

    #[test]
    fn test_serialize_currency_scenario() {
        let mut loan = vocabulary().new_entity("LoanOrCredit").unwrap();
        loan.set("currency", &DataType::Text, Value::text("USD")).unwrap();

        let doc = serialize(&loan);
        assert_eq!(doc, json!({"@type": "LoanOrCredit", "currency": "USD"}));
        assert_eq!(
            doc.to_string(),
            r#"{"@type":"LoanOrCredit","currency":"USD"}"#
        );
    }

    #[test]
    fn test_serialize_declaration_order() {
        let vocab = vocabulary();
        let loan = vocab
            .entity_builder("LoanOrCredit")
            .unwrap()
            .text("name", "Starter loan")
            .boolean("recourseLoan", false)
            .number("amount", 1000.0)
            .id("urn:loan:7")
            .build()
            .unwrap();

        let keys: Vec<String> = serialize(&loan)
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["@type", "@id", "amount", "recourseLoan", "name"]);
    }

    #[test]
    fn test_serialize_payload_shapes() {
        let vocab = vocabulary();
        let lo = vocab
            .entity_builder("LegislationObject")
            .unwrap()
            .member(
                "legislationLegalValue",
                vocab.enum_member("LegalValueLevel", "OfficialLegalValue").unwrap(),
            )
            .duration("duration", IsoDuration::from_hours_minutes(1, 30))
            .date("legislationDate", Date::from_ymd(2021, 6, 1).unwrap())
            .integer("commentCount", 12)
            .url("contentUrl", "https://laws.example/act.pdf")
            .build()
            .unwrap();

        assert_eq!(
            serialize(&lo),
            json!({
                "@type": "LegislationObject",
                "legislationLegalValue": "https://schema.org/OfficialLegalValue",
                "contentUrl": "https://laws.example/act.pdf",
                "duration": "PT1H30M",
                "commentCount": 12,
                "legislationDate": "2021-06-01",
            })
        );
    }

    #[test]
    fn test_serialize_nested_and_context() {
        let vocab = vocabulary();
        let loan = vocab
            .entity_builder("LoanOrCredit")
            .unwrap()
            .nested("provider", vocab.lookup("Organization").unwrap().clone(), |o| {
                o.text("name", "Example Bank")
            })
            .build()
            .unwrap();

        let doc = serialize_with_options(&loan, &SerializeOptions::json_ld());
        assert_eq!(
            doc,
            json!({
                "@context": "https://schema.org",
                "@type": "LoanOrCredit",
                "provider": {"@type": "Organization", "name": "Example Bank"},
            })
        );
        assert_eq!(doc.as_object().unwrap().keys().next().unwrap(), "@context");
    }

    #[test]
    fn test_custom_enumeration_base() {
        let vocab = vocabulary();
        let aas = vocab
            .entity_builder("ActionAccessSpecification")
            .unwrap()
            .member(
                "category",
                vocab.enum_member("PhysicalActivityCategory", "Balance").unwrap(),
            )
            .build()
            .unwrap();
        let options = SerializeOptions {
            enumeration_base: "http://schema.org/".to_string(),
            ..SerializeOptions::default()
        };
        assert_eq!(serialize_with_options(&aas, &options)["category"], "http://schema.org/Balance");
    }

    #[test]
    fn test_json_string_helpers() {
        let loan = vocabulary().new_entity("LoanOrCredit").unwrap();
        let options = SerializeOptions::default();
        assert_eq!(to_json_string(&loan, &options), r#"{"@type":"LoanOrCredit"}"#);
        assert!(to_json_string_pretty(&loan, &options).contains('\n'));
    }
}
