//! JSON-LD → Entity deserialization.
//!
//! Documents carry no alternative tags. For every property the raw value is
//! tried against the declared alternatives in declaration order, and the
//! first structural match wins. A string that is both valid Text and a valid
//! URL therefore resolves to whichever of the two was declared first.
//!
//! Structural rules:
//! - Text: any string. URL: a string without whitespace that parses as an
//!   absolute URL.
//! - Boolean: `true` / `false`. Integer: a JSON integer within i64.
//!   Number: any JSON number.
//! - Date, DateTime, Time, Duration: a string in the ISO 8601 form.
//! - Enumeration: a member name, bare or prefixed with the schema.org base.
//! - Entity: an object whose `@type` is the alternative or one of its
//!   subtypes. An object without `@type` is read as the alternative itself.
//!
//! `null` means absent. Arrays match no alternative.

use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};
use url::Url;

use crate::codec::options::{DeserializeOptions, UnknownPropertyPolicy};
use crate::error::{describe_alternatives, DecodeError};
use crate::limits::{SCHEMA_ORG_BASE, SCHEMA_ORG_BASE_HTTP};
use crate::model::value::is_document_url;
use crate::model::{DataType, Date, DateTime, Entity, IsoDuration, Or, Time, Value};
use crate::schema::{EntityType, PropertyDecl, Registry};

/// Deserializes a document as the named entity type with default options.
pub fn deserialize(
    registry: &Registry,
    type_name: &str,
    document: &JsonValue,
) -> Result<Entity, DecodeError> {
    deserialize_with_options(registry, type_name, document, &DeserializeOptions::default())
}

/// Deserializes a document as the named entity type.
///
/// The document's `@type`, if present, must equal `type_name`.
pub fn deserialize_with_options(
    registry: &Registry,
    type_name: &str,
    document: &JsonValue,
    options: &DeserializeOptions,
) -> Result<Entity, DecodeError> {
    let schema = registry
        .get(type_name)
        .ok_or_else(|| DecodeError::UnknownEntityType {
            name: type_name.to_string(),
        })?;
    let object = document
        .as_object()
        .ok_or_else(|| DecodeError::ExpectedObject {
            context: type_name.to_string(),
        })?;

    let decoder = Decoder { registry, options };
    decoder.decode_entity(schema, object, 1)
}

/// Deserializes a document, taking the entity type from its `@type`.
pub fn deserialize_any(registry: &Registry, document: &JsonValue) -> Result<Entity, DecodeError> {
    deserialize_any_with_options(registry, document, &DeserializeOptions::default())
}

/// Deserializes a document with options, taking the entity type from its `@type`.
pub fn deserialize_any_with_options(
    registry: &Registry,
    document: &JsonValue,
    options: &DeserializeOptions,
) -> Result<Entity, DecodeError> {
    let object = document
        .as_object()
        .ok_or_else(|| DecodeError::ExpectedObject {
            context: "document".to_string(),
        })?;
    let type_name = match object.get("@type") {
        Some(JsonValue::String(t)) => t,
        Some(other) => return Err(DecodeError::InvalidType { found: other.clone() }),
        None => return Err(DecodeError::MissingType),
    };
    deserialize_with_options(registry, type_name, document, options)
}

/// Parses JSON text and deserializes it as the named entity type.
pub fn from_json_str(
    registry: &Registry,
    type_name: &str,
    json: &str,
) -> Result<Entity, DecodeError> {
    let document: JsonValue =
        serde_json::from_str(json).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    deserialize(registry, type_name, &document)
}

struct Decoder<'a> {
    registry: &'a Registry,
    options: &'a DeserializeOptions,
}

impl Decoder<'_> {
    fn decode_entity(
        &self,
        schema: &Arc<EntityType>,
        object: &Map<String, JsonValue>,
        depth: usize,
    ) -> Result<Entity, DecodeError> {
        if depth > self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                max: self.options.max_depth,
            });
        }

        let mut entity = Entity::new(Arc::clone(schema));

        for (key, raw) in object {
            match key.as_str() {
                "@type" => match raw {
                    JsonValue::String(t) if t == schema.name() => {}
                    JsonValue::String(t) => {
                        return Err(DecodeError::EntityTypeMismatch {
                            expected: schema.name_cow(),
                            found: t.clone(),
                        });
                    }
                    other => return Err(DecodeError::InvalidType { found: other.clone() }),
                },
                "@id" => match raw {
                    JsonValue::String(id) => entity.set_id(id.as_str()),
                    other => return Err(DecodeError::InvalidId { found: other.clone() }),
                },
                "@context" => {}
                _ => {
                    let Some((index, decl)) = schema.property(key) else {
                        match self.options.unknown_properties {
                            UnknownPropertyPolicy::Reject => {
                                return Err(DecodeError::UnknownProperty {
                                    entity_type: schema.name_cow(),
                                    property: key.clone(),
                                });
                            }
                            UnknownPropertyPolicy::Ignore => {
                                debug!(
                                    entity_type = schema.name(),
                                    property = key.as_str(),
                                    "ignoring undeclared property"
                                );
                                continue;
                            }
                        }
                    };
                    if raw.is_null() {
                        continue;
                    }
                    let or = self.resolve(schema, decl, raw, depth)?;
                    entity.put(index, or);
                }
            }
        }

        Ok(entity)
    }

    /// Picks the first declared alternative the raw value fits.
    fn resolve(
        &self,
        owner: &EntityType,
        decl: &PropertyDecl,
        raw: &JsonValue,
        depth: usize,
    ) -> Result<Or, DecodeError> {
        for (index, alternative) in decl.alternatives().iter().enumerate() {
            if let Some(value) = self.match_alternative(alternative, raw, depth)? {
                trace!(
                    entity_type = owner.name(),
                    property = decl.name(),
                    alternative = %alternative,
                    "resolved alternative"
                );
                return Ok(Or::from_resolved(decl.alternatives().clone(), index, value));
            }
        }

        Err(DecodeError::NoMatchingAlternative {
            entity_type: owner.name_cow(),
            property: decl.name().to_string(),
            value: raw.clone(),
            alternatives: describe_alternatives(decl.alternatives()),
        })
    }

    /// Returns the payload if `raw` structurally fits `alternative`.
    ///
    /// `Ok(None)` means "try the next alternative"; errors come only from
    /// nested entities and abort the whole document.
    fn match_alternative(
        &self,
        alternative: &DataType,
        raw: &JsonValue,
        depth: usize,
    ) -> Result<Option<Value>, DecodeError> {
        let matched = match alternative {
            DataType::Text => raw.as_str().map(Value::text),
            DataType::Url => raw.as_str().and_then(parse_absolute_url).map(Value::Url),
            DataType::Boolean => raw.as_bool().map(Value::Boolean),
            DataType::Integer => raw.as_i64().map(Value::Integer),
            DataType::Number => raw
                .as_f64()
                .filter(|n| n.is_finite())
                .map(Value::Number),
            DataType::Date => raw
                .as_str()
                .and_then(|s| Date::parse(s).ok())
                .map(Value::Date),
            DataType::DateTime => raw
                .as_str()
                .and_then(|s| DateTime::parse(s).ok())
                .map(Value::DateTime),
            DataType::Time => raw
                .as_str()
                .and_then(|s| Time::parse(s).ok())
                .map(Value::Time),
            DataType::Duration => raw
                .as_str()
                .and_then(|s| IsoDuration::parse(s).ok())
                .map(Value::Duration),
            DataType::Enumeration(name) => raw.as_str().and_then(|s| self.match_member(name, s)),
            DataType::Entity(name) => match raw.as_object() {
                Some(object) => return self.match_entity(name, object, depth),
                None => None,
            },
        };
        Ok(matched)
    }

    fn match_member(&self, enumeration: &str, raw: &str) -> Option<Value> {
        let enumeration = self.registry.enumeration(enumeration).ok()?;
        let member = raw
            .strip_prefix(SCHEMA_ORG_BASE)
            .or_else(|| raw.strip_prefix(SCHEMA_ORG_BASE_HTTP))
            .unwrap_or(raw);
        enumeration.member(member).ok().map(Value::Enumeration)
    }

    /// Decodes a nested object as `alternative`.
    ///
    /// An explicit `@type` commits to that type, so any error inside is
    /// final. Without one, an object that does not fit `alternative`'s
    /// properties lets the next alternative try.
    fn match_entity(
        &self,
        alternative: &str,
        object: &Map<String, JsonValue>,
        depth: usize,
    ) -> Result<Option<Value>, DecodeError> {
        match object.get("@type") {
            None => {
                let Some(schema) = self.registry.get(alternative) else {
                    return Ok(None);
                };
                match self.decode_entity(schema, object, depth + 1) {
                    Ok(entity) => Ok(Some(Value::entity(entity))),
                    Err(
                        DecodeError::UnknownProperty { .. }
                        | DecodeError::NoMatchingAlternative { .. },
                    ) => {
                        trace!(alternative, "untyped object does not fit");
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
            Some(JsonValue::String(t)) => {
                let schema = self
                    .registry
                    .get(t)
                    .ok_or_else(|| DecodeError::UnknownEntityType { name: t.clone() })?;
                if !schema.is_a(alternative) {
                    return Ok(None);
                }
                let entity = self.decode_entity(schema, object, depth + 1)?;
                Ok(Some(Value::entity(entity)))
            }
            Some(other) => Err(DecodeError::InvalidType { found: other.clone() }),
        }
    }
}

fn parse_absolute_url(input: &str) -> Option<Url> {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return None;
    }
    Url::parse(input).ok().filter(is_document_url)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::codec::encode::{serialize, serialize_with_options};
    use crate::codec::options::SerializeOptions;
    use crate::error::ErrorKind;
    use crate::util::datetime::{
        MAX_DATE_DAYS, MAX_OFFSET_MIN, MAX_TIME_OF_DAY_US, MICROSECONDS_PER_DAY,
        MICROSECONDS_PER_MINUTE, MIN_DATE_DAYS,
    };
    use crate::vocab::vocabulary;

    fn decode(doc: JsonValue) -> Result<Entity, DecodeError> {
        deserialize(vocabulary(), "LoanOrCredit", &doc)
    }

    #[test]
    fn test_currency_scenario() {
        let doc = json!({"@type": "LoanOrCredit", "currency": "USD"});
        let loan = decode(doc.clone()).unwrap();

        let currency = loan.get("currency").unwrap();
        assert_eq!(currency.selected_type(), &DataType::Text);
        assert_eq!(currency.value().as_text(), Some("USD"));
        assert_eq!(loan.len(), 1);
        assert!(loan.get("amount").is_none());

        assert_eq!(serialize(&loan), doc);
        assert_eq!(serialize(&loan).to_string(), doc.to_string());
    }

    #[test]
    fn test_first_declared_alternative_wins() {
        let loan = decode(json!({"termsOfService": "http://example.com"})).unwrap();
        let terms = loan.get("termsOfService").unwrap();
        assert_eq!(terms.selected_type(), &DataType::Text);
        assert_eq!(terms.value().as_text(), Some("http://example.com"));
    }

    #[test]
    fn test_later_alternative_when_earlier_fails() {
        let loan = decode(json!({"amount": 1500.5, "annualPercentageRate": 4})).unwrap();
        let amount = loan.get("amount").unwrap();
        assert_eq!(amount.selected_type(), &DataType::Number);
        assert_eq!(amount.selected_index(), 1);
        assert_eq!(amount.value().as_number(), Some(1500.5));
        assert_eq!(
            loan.get("annualPercentageRate").unwrap().value().as_number(),
            Some(4.0)
        );

        let loan = decode(json!({
            "amount": {"@type": "MonetaryAmount", "currency": "EUR", "value": 1000}
        }))
        .unwrap();
        let amount = loan.get("amount").unwrap();
        assert_eq!(amount.selected_type(), &DataType::entity("MonetaryAmount"));
        let nested = amount.value().as_entity().unwrap();
        assert_eq!(nested.get("value").unwrap().selected_type(), &DataType::Number);
    }

    #[test]
    fn test_exclusivity() {
        let loan = decode(json!({"loanType": "https://bank.example/types/mortgage"})).unwrap();
        let loan_type = loan.get("loanType").unwrap();
        assert!(loan_type.get(&DataType::Text).is_ok());
        assert_eq!(
            loan_type.get(&DataType::Url).unwrap_err().kind(),
            ErrorKind::WrongAlternative
        );
    }

    #[test]
    fn test_absence_and_null() {
        let loan = decode(json!({"currency": null, "loanType": ""})).unwrap();
        assert!(loan.get("currency").is_none());
        assert_eq!(loan.get("loanType").unwrap().value().as_text(), Some(""));
        assert_eq!(serialize(&loan), json!({"@type": "LoanOrCredit", "loanType": ""}));
    }

    #[test]
    fn test_unknown_property() {
        let err = decode(json!({"currency": "USD", "colour": "red"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownProperty {
                entity_type: "LoanOrCredit".into(),
                property: "colour".to_string(),
            }
        );

        let lenient = deserialize_with_options(
            vocabulary(),
            "LoanOrCredit",
            &json!({"currency": "USD", "colour": "red", "@reverse": {}}),
            &DeserializeOptions::lenient(),
        )
        .unwrap();
        assert_eq!(lenient.len(), 1);
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let err = decode(json!({"@graph": []})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    }

    #[test]
    fn test_no_matching_alternative() {
        let err = decode(json!({"recourseLoan": "yes"})).unwrap_err();
        match err {
            DecodeError::NoMatchingAlternative {
                entity_type,
                property,
                value,
                alternatives,
            } => {
                assert_eq!(entity_type, "LoanOrCredit");
                assert_eq!(property, "recourseLoan");
                assert_eq!(value, json!("yes"));
                assert_eq!(alternatives, "Boolean");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_integer_vs_number() {
        let doc = json!({"@type": "LegislationObject", "commentCount": 3, "copyrightYear": 2020});
        let lo = deserialize(vocabulary(), "LegislationObject", &doc).unwrap();
        assert_eq!(lo.get("commentCount").unwrap().value().as_integer(), Some(3));
        assert_eq!(lo.get("copyrightYear").unwrap().value().as_number(), Some(2020.0));

        let doc = json!({"commentCount": 3.5});
        let err = deserialize(vocabulary(), "LegislationObject", &doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);

        let doc = json!({"position": 2});
        let lo = deserialize(vocabulary(), "LegislationObject", &doc).unwrap();
        assert_eq!(lo.get("position").unwrap().selected_type(), &DataType::Integer);
    }

    #[test]
    fn test_temporal_alternatives() {
        let doc = json!({
            "dateCreated": "2021-06-01",
            "dateModified": "2021-06-02T10:30:00Z",
            "temporalCoverage": "2011/2012",
            "duration": "PT45M",
        });
        let lo = deserialize(vocabulary(), "LegislationObject", &doc).unwrap();
        assert_eq!(lo.get("dateCreated").unwrap().selected_type(), &DataType::Date);
        assert_eq!(lo.get("dateModified").unwrap().selected_type(), &DataType::DateTime);
        assert_eq!(lo.get("temporalCoverage").unwrap().selected_type(), &DataType::Text);
        assert_eq!(lo.get("duration").unwrap().selected_type(), &DataType::Duration);

        let err = deserialize(
            vocabulary(),
            "LegislationObject",
            &json!({"legislationDate": "２０２１-06-01"}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);
    }

    #[test]
    fn test_enumeration_forms() {
        for raw in ["InForce", "https://schema.org/InForce", "http://schema.org/InForce"] {
            let doc = json!({"legislationLegalForce": raw});
            let lo = deserialize(vocabulary(), "LegislationObject", &doc).unwrap();
            let member = lo
                .get("legislationLegalForce")
                .unwrap()
                .value()
                .as_enum_member()
                .unwrap();
            assert_eq!(member.name(), "InForce");
        }

        let err = deserialize(
            vocabulary(),
            "LegislationObject",
            &json!({"legislationLegalForce": "Repealed"}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);

        let doc = json!({"category": "Balance"});
        let aas = deserialize(vocabulary(), "ActionAccessSpecification", &doc).unwrap();
        assert_eq!(
            aas.get("category").unwrap().selected_type(),
            &DataType::enumeration("PhysicalActivityCategory")
        );
        let doc = json!({"category": "Retail banking"});
        let aas = deserialize(vocabulary(), "ActionAccessSpecification", &doc).unwrap();
        assert_eq!(aas.get("category").unwrap().selected_type(), &DataType::Text);
    }

    #[test]
    fn test_nested_subtype_and_selection() {
        let loan = decode(json!({
            "requiredCollateral": {"@type": "LoanOrCredit", "currency": "EUR"},
            "provider": {"@type": "Person", "givenName": "Ada"},
            "broker": {"name": "Brokerage Ltd"},
        }))
        .unwrap();

        let collateral = loan.get("requiredCollateral").unwrap();
        assert_eq!(collateral.selected_type(), &DataType::entity("Thing"));
        assert_eq!(
            collateral.value().as_entity().unwrap().type_name(),
            "LoanOrCredit"
        );

        let provider = loan.get("provider").unwrap();
        assert_eq!(provider.selected_type(), &DataType::entity("Person"));

        // No @type: read as the first entity alternative.
        let broker = loan.get("broker").unwrap();
        assert_eq!(broker.selected_type(), &DataType::entity("Organization"));
        assert_eq!(broker.value().as_entity().unwrap().type_name(), "Organization");
    }

    #[test]
    fn test_nested_errors_propagate() {
        let err = decode(json!({"provider": {"@type": "Spaceship"}})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownEntityType {
                name: "Spaceship".to_string()
            }
        );

        let err = decode(json!({"provider": {"@type": "Person", "warpFactor": 9}})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownProperty {
                entity_type: "Person".into(),
                property: "warpFactor".to_string(),
            }
        );

        // Organization is not a subtype of any alternative of loanTerm.
        let err = decode(json!({"loanTerm": {"@type": "Organization"}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);
    }

    #[test]
    fn test_reserved_keys() {
        let loan = decode(json!({
            "@context": "https://schema.org",
            "@type": "LoanOrCredit",
            "@id": "https://bank.example/loans/1",
        }))
        .unwrap();
        assert_eq!(loan.id(), Some("https://bank.example/loans/1"));
        assert!(loan.is_empty());

        let err = decode(json!({"@type": "Thing"})).unwrap_err();
        assert!(matches!(err, DecodeError::EntityTypeMismatch { .. }));
        let err = decode(json!({"@type": ["LoanOrCredit"]})).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidType { .. }));
        let err = decode(json!({"@id": 7})).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidId { .. }));
    }

    #[test]
    fn test_arrays_match_nothing() {
        let err = decode(json!({"currency": ["USD", "EUR"]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);
    }

    #[test]
    fn test_document_shape_errors() {
        let err = decode(json!("LoanOrCredit")).unwrap_err();
        assert!(matches!(err, DecodeError::ExpectedObject { .. }));

        let err = deserialize(vocabulary(), "Spaceship", &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEntityType);

        let err = from_json_str(vocabulary(), "LoanOrCredit", "{\"currency\": ").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_deserialize_any() {
        let doc = json!({"@type": "Physiotherapy", "@id": "urn:therapy:1"});
        let p = deserialize_any(vocabulary(), &doc).unwrap();
        assert_eq!(p.type_name(), "Physiotherapy");
        assert_eq!(p.id(), Some("urn:therapy:1"));

        let err = deserialize_any(vocabulary(), &json!({"name": "x"})).unwrap_err();
        assert_eq!(err, DecodeError::MissingType);

        let err = deserialize_any(vocabulary(), &json!({"@type": "Physiotherapy", "name": "x"}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    }

    #[test]
    fn test_depth_limit() {
        let mut doc = json!({"@type": "Thing", "name": "leaf"});
        for _ in 0..40 {
            doc = json!({"@type": "Thing", "subjectOf": {"@type": "CreativeWork", "about": doc}});
        }
        let err = deserialize(vocabulary(), "Thing", &doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);

        let shallow = json!({"subjectOf": {"@type": "CreativeWork", "about": {"name": "x"}}});
        let options = DeserializeOptions {
            max_depth: 2,
            ..DeserializeOptions::default()
        };
        let err = deserialize_with_options(vocabulary(), "Thing", &shallow, &options).unwrap_err();
        assert_eq!(err, DecodeError::DepthExceeded { max: 2 });
    }

    #[test]
    fn test_roundtrip_rich_entity() {
        let vocab = vocabulary();
        let loan = vocab
            .entity_builder("LoanOrCredit")
            .unwrap()
            .id("https://bank.example/loans/42")
            .number("amount", 250_000.0)
            .text("currency", "USD")
            .duration("gracePeriod", IsoDuration::from_months(3))
            .nested("loanTerm", vocab.lookup("QuantitativeValue").unwrap().clone(), |q| {
                q.number("value", 30.0).text("unitCode", "ANN")
            })
            .text("loanType", "mortgage")
            .boolean("recourseLoan", false)
            .member(
                "category",
                vocab.enum_member("PhysicalActivityCategory", "Balance").unwrap(),
            )
            .nested("hoursAvailable", vocab.lookup("OpeningHoursSpecification").unwrap().clone(), |h| {
                h.time("opens", Time::parse("09:00:00").unwrap())
                    .time("closes", Time::parse("17:30:00").unwrap())
            })
            .url("url", "https://bank.example/loans/42")
            .build()
            .unwrap();

        let doc = serialize_with_options(&loan, &SerializeOptions::json_ld());
        let decoded = deserialize(vocab, "LoanOrCredit", &doc).unwrap();
        assert_eq!(decoded, loan);
        assert_eq!(serialize_with_options(&decoded, &SerializeOptions::json_ld()), doc);
    }

    #[test]
    fn test_url_selected_reads_back_as_text() {
        let loan = vocabulary()
            .entity_builder("LoanOrCredit")
            .unwrap()
            .url("termsOfService", "https://bank.example/terms")
            .build()
            .unwrap();
        let decoded = decode(serialize(&loan)).unwrap();
        assert_eq!(
            decoded.get("termsOfService").unwrap().selected_type(),
            &DataType::Text
        );
        assert_ne!(decoded, loan);
    }

    #[test]
    fn test_untyped_object_tries_next_alternative() {
        // provider is [Organization, Person]; givenName only fits Person.
        let loan = decode(json!({"provider": {"givenName": "Ada"}})).unwrap();
        let provider = loan.get("provider").unwrap();
        assert_eq!(provider.selected_type(), &DataType::entity("Person"));
        let person = provider.value().as_entity().unwrap();
        assert_eq!(person.type_name(), "Person");
        assert_eq!(person.get("givenName").unwrap().value().as_text(), Some("Ada"));

        let err = decode(json!({"provider": {"warpFactor": 9}})).unwrap_err();
        match err {
            DecodeError::NoMatchingAlternative {
                entity_type,
                property,
                alternatives,
                ..
            } => {
                assert_eq!(entity_type, "LoanOrCredit");
                assert_eq!(property, "provider");
                assert_eq!(alternatives, "Organization, Person");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // An explicit @type commits to that type.
        let err = decode(json!({"provider": {"@type": "Organization", "givenName": "Ada"}}))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownProperty {
                entity_type: "Organization".into(),
                property: "givenName".to_string(),
            }
        );
    }

    #[test]
    fn test_untyped_object_depth_limit_is_final() {
        let options = DeserializeOptions {
            max_depth: 1,
            ..DeserializeOptions::default()
        };
        let doc = json!({"provider": {"givenName": "Ada"}});
        let err = deserialize_with_options(vocabulary(), "LoanOrCredit", &doc, &options).unwrap_err();
        assert!(matches!(err, DecodeError::DepthExceeded { max: 1 }));
    }

    #[test]
    fn test_url_with_whitespace_never_serialized() {
        let err = decode(json!({"url": "data:text/plain,hello world"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingAlternative);

        let built = vocabulary()
            .entity_builder("LoanOrCredit")
            .unwrap()
            .url("url", "data:text/plain,hello world")
            .build();
        assert!(matches!(built, Err(crate::error::ValueError::InvalidUrl { .. })));

        let loan = vocabulary()
            .entity_builder("LoanOrCredit")
            .unwrap()
            .url("url", "data:text/plain,hello%20world")
            .build()
            .unwrap();
        assert_eq!(decode(serialize(&loan)).unwrap(), loan);
    }

    #[test]
    fn test_temporal_extremes_roundtrip() {
        let vocab = vocabulary();
        let hours = vocab.lookup("OpeningHoursSpecification").unwrap().clone();
        let loan = vocab
            .entity_builder("LoanOrCredit")
            .unwrap()
            .nested("hoursAvailable", hours, |h| {
                h.time(
                    "opens",
                    Time {
                        time_us: 0,
                        offset_min: Some(24 * 60),
                    },
                )
                .datetime(
                    "validFrom",
                    DateTime::parse("9999-12-31T23:59:59.999999-24:00").unwrap(),
                )
                .date("validThrough", Date::from_ymd(0, 1, 1).unwrap())
            })
            .build()
            .unwrap();
        assert_eq!(decode(serialize(&loan)).unwrap(), loan);
    }

    #[test]
    fn test_out_of_range_temporals_never_stored() {
        let vocab = vocabulary();
        let hours = vocab.lookup("OpeningHoursSpecification").unwrap().clone();

        let far_future = DateTime::from_epoch_us(400_000_000_000_000_000);
        let err = vocab
            .entity_builder("OpeningHoursSpecification")
            .unwrap()
            .set("validFrom", &DataType::DateTime, far_future)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let overflowing = DateTime {
            epoch_us: i64::MAX,
            offset_min: Some(60),
        };
        let wide_offset = Time {
            time_us: 0,
            offset_min: Some(3000),
        };
        let mut entity = Entity::new(hours);
        assert!(entity.set("validFrom", &DataType::DateTime, Value::DateTime(overflowing)).is_err());
        assert!(entity.set("opens", &DataType::Time, Value::Time(wide_offset)).is_err());
        assert!(entity.is_empty());
        let _ = serialize(&entity);
    }

    fn arb_duration() -> impl Strategy<Value = IsoDuration> {
        prop_oneof![
            (0u32..400).prop_map(IsoDuration::from_days),
            (0u32..120).prop_map(IsoDuration::from_months),
            (0u32..48, 0u32..60).prop_map(|(h, m)| IsoDuration::from_hours_minutes(h, m)),
        ]
    }

    fn arb_offset() -> impl Strategy<Value = Option<i16>> {
        proptest::option::of(-MAX_OFFSET_MIN..=MAX_OFFSET_MIN)
    }

    fn arb_date() -> impl Strategy<Value = Date> {
        (MIN_DATE_DAYS..=MAX_DATE_DAYS, arb_offset())
            .prop_map(|(days, offset_min)| Date { days, offset_min })
    }

    fn arb_datetime() -> impl Strategy<Value = DateTime> {
        let first_us = MIN_DATE_DAYS as i64 * MICROSECONDS_PER_DAY;
        let last_us = (MAX_DATE_DAYS as i64 + 1) * MICROSECONDS_PER_DAY - 1;
        (first_us..=last_us, arb_offset()).prop_map(|(local_us, offset_min)| DateTime {
            epoch_us: local_us - offset_min.unwrap_or(0) as i64 * MICROSECONDS_PER_MINUTE,
            offset_min,
        })
    }

    fn arb_time() -> impl Strategy<Value = Time> {
        (0..=MAX_TIME_OF_DAY_US, arb_offset())
            .prop_map(|(time_us, offset_min)| Time { time_us, offset_min })
    }

    fn arb_url() -> impl Strategy<Value = Value> {
        "(https|http|urn)://[a-z]{1,12}\\.example/[a-z0-9/]{0,16}"
            .prop_map(|s| Value::url(&s).unwrap())
    }

    fn arb_category() -> impl Strategy<Value = String> {
        let members = vocabulary()
            .enumeration("PhysicalActivityCategory")
            .unwrap()
            .members()
            .to_vec();
        proptest::sample::select(members)
    }

    fn arb_person() -> impl Strategy<Value = Entity> {
        (
            proptest::option::of("[A-Za-z]{1,12}"),
            proptest::option::of(arb_date()),
        )
            .prop_map(|(given_name, birth_date)| {
                let mut b = vocabulary().entity_builder("Person").unwrap();
                if let Some(v) = given_name {
                    b = b.text("givenName", v);
                }
                if let Some(v) = birth_date {
                    b = b.date("birthDate", v);
                }
                b.build().unwrap()
            })
    }

    fn arb_hours() -> impl Strategy<Value = Entity> {
        let stamp = prop_oneof![
            arb_date().prop_map(Value::Date),
            arb_datetime().prop_map(Value::DateTime),
        ];
        (
            proptest::option::of(arb_time()),
            proptest::option::of(arb_time()),
            proptest::option::of(stamp),
        )
            .prop_map(|(opens, closes, valid_from)| {
                let mut b = vocabulary()
                    .entity_builder("OpeningHoursSpecification")
                    .unwrap();
                if let Some(v) = opens {
                    b = b.time("opens", v);
                }
                if let Some(v) = closes {
                    b = b.time("closes", v);
                }
                if let Some(v) = valid_from {
                    b = b.value("validFrom", v);
                }
                b.build().unwrap()
            })
    }

    fn arb_loan() -> impl Strategy<Value = Entity> {
        let scalars = (
            proptest::option::of(-1.0e12f64..1.0e12),
            proptest::option::of(".*"),
            proptest::option::of(arb_duration()),
            proptest::option::of(any::<bool>()),
            proptest::option::of("[a-z ]{0,24}"),
            proptest::option::of("[A-Za-z0-9 ]{0,32}"),
            proptest::option::of(any::<i64>().prop_map(|n| n.to_string())),
        );
        let structured = (
            proptest::option::of(arb_url()),
            proptest::option::of(arb_category()),
            proptest::option::of(arb_person()),
            proptest::option::of(arb_hours()),
        );
        (scalars, structured).prop_map(
            |((amount, currency, grace, recourse, loan_type, name, id), (url, category, provider, hours))| {
                let vocab = vocabulary();
                let mut b = vocab.entity_builder("LoanOrCredit").unwrap();
                if let Some(v) = url {
                    b = b.value("url", v);
                }
                if let Some(m) = category {
                    b = b.member(
                        "category",
                        vocab.enum_member("PhysicalActivityCategory", &m).unwrap(),
                    );
                }
                if let Some(e) = provider {
                    b = b.entity("provider", e);
                }
                if let Some(e) = hours {
                    b = b.entity("hoursAvailable", e);
                }
                if let Some(v) = amount {
                    b = b.number("amount", v);
                }
                if let Some(v) = currency {
                    b = b.text("currency", v);
                }
                if let Some(v) = grace {
                    b = b.duration("gracePeriod", v);
                }
                if let Some(v) = recourse {
                    b = b.boolean("recourseLoan", v);
                }
                if let Some(v) = loan_type {
                    b = b.text("loanType", v);
                }
                if let Some(v) = name {
                    b = b.text("name", v);
                }
                if let Some(v) = id {
                    b = b.id(format!("urn:loan:{v}"));
                }
                b.build().unwrap()
            },
        )
    }

    proptest! {
        /// Entities whose values sit in their first matching alternative survive a round-trip.
        #[test]
        fn roundtrip_preserves_entity(loan in arb_loan()) {
            let doc = serialize(&loan);
            let decoded = deserialize(vocabulary(), "LoanOrCredit", &doc).unwrap();
            prop_assert_eq!(&decoded, &loan);
            prop_assert_eq!(serialize(&decoded), doc);
        }

        /// Arbitrary JSON never panics the decoder.
        #[test]
        fn decode_never_panics(currency in any::<String>(), n in any::<f64>(), flag in any::<bool>()) {
            let doc = json!({"currency": currency, "interestRate": n, "renegotiableLoan": flag});
            let _ = deserialize(vocabulary(), "LoanOrCredit", &doc);
        }

        /// Temporal-looking strings and nested objects never panic the decoder.
        #[test]
        fn decode_nested_never_panics(
            stamp in "[0-9T:+Z. -]{0,32}",
            text in any::<String>(),
            key in "[a-zA-Z@]{0,12}",
            typed in any::<bool>(),
        ) {
            let mut inner = Map::new();
            inner.insert(key, JsonValue::String(text.clone()));
            inner.insert("birthDate".to_string(), JsonValue::String(stamp.clone()));
            if typed {
                inner.insert("@type".to_string(), JsonValue::String(text.clone()));
            }
            let doc = json!({
                "gracePeriod": stamp,
                "url": text,
                "category": stamp,
                "hoursAvailable": {"opens": stamp, "closes": text, "validFrom": stamp},
                "provider": JsonValue::Object(inner.clone()),
                "requiredCollateral": {"about": JsonValue::Object(inner)},
            });
            let _ = deserialize(vocabulary(), "LoanOrCredit", &doc);
        }
    }
}
