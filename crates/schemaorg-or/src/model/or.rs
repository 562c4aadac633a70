//! The alternative-typed property wrapper.

use crate::error::{describe_alternatives, ValueError};
use crate::model::{Alternatives, DataType, Value};

/// A value that is exactly one of a closed, declared set of alternatives.
///
/// The alternative list is shared with the property declaration it came
/// from. Which alternative is populated is recorded explicitly, so two
/// alternatives with the same JSON rendering stay distinguishable in memory.
///
/// An `Or` is never empty; an absent property is `None` on the entity.
#[derive(Debug, Clone)]
pub struct Or {
    alternatives: Alternatives,
    selected: usize,
    value: Value,
}

impl Or {
    /// Wraps `value` as the `selected` alternative.
    ///
    /// Fails if `selected` is not declared in `alternatives`, or if `value`
    /// does not structurally fit it.
    pub fn new(
        alternatives: Alternatives,
        selected: &DataType,
        value: Value,
    ) -> Result<Self, ValueError> {
        let index = alternatives
            .iter()
            .position(|alt| alt == selected)
            .ok_or_else(|| ValueError::AlternativeNotDeclared {
                selected: selected.clone(),
                alternatives: describe_alternatives(&alternatives),
            })?;
        Self::with_index(alternatives, index, value)
    }

    /// Wraps `value` as the alternative at `index`.
    pub fn with_index(
        alternatives: Alternatives,
        index: usize,
        value: Value,
    ) -> Result<Self, ValueError> {
        let Some(selected) = alternatives.get(index) else {
            return Err(ValueError::AlternativeNotDeclared {
                selected: value.data_type(),
                alternatives: describe_alternatives(&alternatives),
            });
        };
        if !value.matches(selected) {
            if let Value::Number(n) = value {
                if !n.is_finite() && *selected == DataType::Number {
                    return Err(ValueError::NonFiniteNumber { value: n });
                }
            }
            return Err(ValueError::TypeMismatch {
                selected: selected.clone(),
                found: value.data_type(),
            });
        }
        Ok(Self {
            alternatives,
            selected: index,
            value,
        })
    }

    /// Wraps a payload the caller already matched against `alternatives[index]`.
    pub(crate) fn from_resolved(alternatives: Alternatives, index: usize, value: Value) -> Self {
        debug_assert!(value.matches(&alternatives[index]));
        Self {
            alternatives,
            selected: index,
            value,
        }
    }

    /// Wraps `value` as the first declared alternative it fits.
    pub fn infer(alternatives: Alternatives, value: Value) -> Result<Self, ValueError> {
        match alternatives.iter().position(|alt| value.matches(alt)) {
            Some(index) => Ok(Self {
                alternatives,
                selected: index,
                value,
            }),
            None => Err(ValueError::AlternativeNotDeclared {
                selected: value.data_type(),
                alternatives: describe_alternatives(&alternatives),
            }),
        }
    }

    /// The populated alternative.
    pub fn selected_type(&self) -> &DataType {
        &self.alternatives[self.selected]
    }

    /// Position of the populated alternative in the declared list.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The declared alternatives, in declaration order.
    pub fn alternatives(&self) -> &[DataType] {
        &self.alternatives
    }

    /// The payload; match on it to handle every alternative.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns true if `alternative` is the populated one.
    pub fn is(&self, alternative: &DataType) -> bool {
        self.selected_type() == alternative
    }

    /// Returns the payload if `expected` is the populated alternative.
    pub fn get(&self, expected: &DataType) -> Result<&Value, ValueError> {
        if self.is(expected) {
            Ok(&self.value)
        } else {
            Err(self.wrong_alternative(expected))
        }
    }

    /// Consumes the wrapper, returning the payload if `expected` is populated.
    pub fn into_value(self, expected: &DataType) -> Result<Value, ValueError> {
        if self.is(expected) {
            Ok(self.value)
        } else {
            Err(self.wrong_alternative(expected))
        }
    }

    fn wrong_alternative(&self, expected: &DataType) -> ValueError {
        ValueError::WrongAlternative {
            expected: expected.clone(),
            selected: self.selected_type().clone(),
        }
    }
}

impl PartialEq for Or {
    fn eq(&self, other: &Self) -> bool {
        self.selected_type() == other.selected_type() && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;

    fn text_or_url() -> Alternatives {
        Arc::from(vec![DataType::Text, DataType::Url])
    }

    #[test]
    fn test_new_selects_declared_alternative() {
        let or = Or::new(text_or_url(), &DataType::Text, Value::text("USD")).unwrap();
        assert_eq!(or.selected_type(), &DataType::Text);
        assert_eq!(or.selected_index(), 0);
        assert_eq!(or.value().as_text(), Some("USD"));
        assert_eq!(or.alternatives(), &[DataType::Text, DataType::Url]);
    }

    #[test]
    fn test_new_rejects_undeclared_alternative() {
        let err = Or::new(text_or_url(), &DataType::Boolean, Value::Boolean(true)).unwrap_err();
        assert!(matches!(err, ValueError::AlternativeNotDeclared { .. }));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_new_rejects_mismatched_payload() {
        let err = Or::new(text_or_url(), &DataType::Url, Value::text("USD")).unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                selected: DataType::Url,
                found: DataType::Text,
            }
        );
    }

    #[test]
    fn test_non_finite_number_rejected() {
        let alts: Alternatives = Arc::from(vec![DataType::Number]);
        let err = Or::new(alts, &DataType::Number, Value::Number(f64::NAN)).unwrap_err();
        assert!(matches!(err, ValueError::NonFiniteNumber { .. }));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_get_wrong_alternative() {
        let or = Or::new(text_or_url(), &DataType::Text, Value::text("USD")).unwrap();
        assert!(or.get(&DataType::Text).is_ok());
        let err = or.get(&DataType::Url).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongAlternative);
        assert!(or.into_value(&DataType::Url).is_err());
    }

    #[test]
    fn test_infer_takes_first_match() {
        let url = Value::url("https://example.com/terms").unwrap();
        let or = Or::infer(text_or_url(), url.clone()).unwrap();
        assert_eq!(or.selected_type(), &DataType::Url);

        let alts: Alternatives = Arc::from(vec![DataType::Boolean]);
        assert!(Or::infer(alts, url).is_err());
    }

    #[test]
    fn test_equality_ignores_declared_list() {
        let a = Or::new(text_or_url(), &DataType::Text, Value::text("x")).unwrap();
        let b = Or::new(Arc::from(vec![DataType::Text]), &DataType::Text, Value::text("x")).unwrap();
        assert_eq!(a, b);

        let c = Or::new(text_or_url(), &DataType::Text, Value::text("y")).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_with_index_out_of_range() {
        assert!(Or::with_index(text_or_url(), 5, Value::text("x")).is_err());
    }
}
