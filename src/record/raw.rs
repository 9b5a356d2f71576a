//! Raw key/value records as delivered by the transport.
//!
//! The API sends flat JSON objects whose scalar values are almost always
//! strings. Field names drift in case between endpoints and historical
//! payloads (`startTime` vs `starttime`), so every lookup here is
//! ASCII-case-insensitive. Insertion order is preserved.

use crate::error::MappingError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Ordered field-name → value mapping for one upstream record.
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(MappingError::UnexpectedShape {
                field: "<record>".to_string(),
                expected: "object",
            }),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Case-insensitive field lookup; an exact match wins over a folded one.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).or_else(|| {
            self.0
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                .map(|(_, value)| value)
        })
    }

    /// Scalar field rendered as text; `None` for missing, null, or nested values.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).and_then(scalar_text)
    }

    /// Scalar field as an owned string, failing when it is missing.
    pub fn require_text(&self, key: &str) -> Result<String, MappingError> {
        self.text(key)
            .map(Cow::into_owned)
            .ok_or_else(|| MappingError::MissingField(key.to_string()))
    }

    /// Array field, failing when present with another shape.
    pub fn array(&self, key: &str) -> Result<Option<&[Value]>, MappingError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(MappingError::UnexpectedShape {
                field: key.to_string(),
                expected: "array",
            }),
        }
    }

    /// Nested object field as its own record.
    pub fn record(&self, key: &str) -> Result<Option<RawRecord>, MappingError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Self(map.clone()))),
            Some(_) => Err(MappingError::UnexpectedShape {
                field: key.to_string(),
                expected: "object",
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = MappingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Render a scalar JSON value the way the upstream string-typed API would.
pub(crate) fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convert an array element into a record, reporting the owning field on failure.
pub(crate) fn element_record(field: &str, value: &Value) -> Result<RawRecord, MappingError> {
    match value {
        Value::Object(map) => Ok(RawRecord(map.clone())),
        _ => Err(MappingError::UnexpectedShape {
            field: field.to_string(),
            expected: "array of objects",
        }),
    }
}
