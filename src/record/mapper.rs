//! Declarative field rules applied to raw records.
//!
//! Every entity type declares one [`FieldRules`] table: which raw fields are
//! integers, which are handled by the entity itself, and which are renamed.
//! [`FieldRules::apply`] walks the record once and produces a
//! [`MappedRecord`] the entity then drains into its typed fields; whatever is
//! left becomes the entity's `extra` bag.

use crate::error::MappingError;
use crate::record::raw::{RawRecord, scalar_text};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Unmapped fields kept alongside an entity's typed attributes.
pub type ExtraFields = BTreeMap<String, FieldValue>;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
/// Value of one mapped attribute.
pub enum FieldValue {
    Text(String),
    Int(i64),
    /// The field was present but blank.
    Absent,
    /// Arrays and objects copied through untouched.
    Nested(Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

/// How a single raw field is treated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldRule {
    Ignore,
    Integer,
    Rename(&'static str),
    Copy,
}

#[derive(Clone, Copy, Debug)]
/// Per-entity rule table. The three sets are expected to be disjoint; when
/// they are not, ignore beats integer beats rename.
pub struct FieldRules {
    pub int_fields: &'static [&'static str],
    pub ignored: &'static [&'static str],
    pub renames: &'static [(&'static str, &'static str)],
}

impl FieldRules {
    pub const fn new(
        int_fields: &'static [&'static str],
        ignored: &'static [&'static str],
        renames: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            int_fields,
            ignored,
            renames,
        }
    }

    /// Rule for `key`, matched ASCII-case-insensitively.
    pub fn rule_for(&self, key: &str) -> FieldRule {
        if self.ignored.iter().any(|f| f.eq_ignore_ascii_case(key)) {
            FieldRule::Ignore
        } else if self.int_fields.iter().any(|f| f.eq_ignore_ascii_case(key)) {
            FieldRule::Integer
        } else if let Some(&(_, target)) = self
            .renames
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(key))
        {
            FieldRule::Rename(target)
        } else {
            FieldRule::Copy
        }
    }

    /// Map every field of `record` according to the table.
    ///
    /// Integer fields accept the empty string as `0`; anything else that is
    /// not an integer aborts the whole mapping.
    pub fn apply(&self, record: &RawRecord) -> Result<MappedRecord, MappingError> {
        let mut mapped = MappedRecord::default();
        for (key, value) in record.iter() {
            match self.rule_for(key) {
                FieldRule::Ignore => {}
                FieldRule::Integer => {
                    mapped.push(key.clone(), FieldValue::Int(parse_int_field(key, value)?));
                }
                FieldRule::Rename(target) => {
                    let renamed = match scalar_text(value) {
                        Some(text) => FieldValue::Text(text.into_owned()),
                        None if value.is_null() => FieldValue::Absent,
                        None => FieldValue::Nested(value.clone()),
                    };
                    mapped.push(target.to_string(), renamed);
                }
                FieldRule::Copy => mapped.push(key.clone(), copy_value(value)),
            }
        }
        Ok(mapped)
    }
}

fn copy_value(value: &Value) -> FieldValue {
    match scalar_text(value) {
        Some(text) if text.trim().is_empty() => FieldValue::Absent,
        Some(text) => FieldValue::Text(text.into_owned()),
        None if value.is_null() => FieldValue::Absent,
        None => FieldValue::Nested(value.clone()),
    }
}

fn parse_int_field(key: &str, value: &Value) -> Result<i64, MappingError> {
    if value.is_null() {
        return Ok(0);
    }
    let text = scalar_text(value).ok_or_else(|| MappingError::UnexpectedShape {
        field: key.to_string(),
        expected: "integer",
    })?;
    parse_int(key, &text)
}

/// Integer coercion shared by field rules and entity post-processing.
pub(crate) fn parse_int(field: &str, text: &str) -> Result<i64, MappingError> {
    if text.is_empty() {
        return Ok(0);
    }
    text.trim()
        .parse()
        .map_err(|_| MappingError::InvalidInteger {
            field: field.to_string(),
            value: text.to_string(),
        })
}

#[derive(Clone, Debug, Default)]
/// Attributes produced by [`FieldRules::apply`], keyed by target name.
pub struct MappedRecord {
    fields: Vec<(String, FieldValue)>,
}

impl MappedRecord {
    fn push(&mut self, name: String, value: FieldValue) {
        match self.fields.iter().position(|(candidate, _)| *candidate == name) {
            Some(slot) => self.fields[slot].1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Same policy as [`RawRecord::get`]: an exact match wins over a folded one.
    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(candidate, _)| candidate == name)
            .or_else(|| {
                self.fields
                    .iter()
                    .position(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            })
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.position(name).map(|slot| &self.fields[slot].1)
    }

    /// Remove and return an attribute.
    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        self.position(name).map(|slot| self.fields.remove(slot).1)
    }

    /// Remove a text attribute; blank, missing, and nested values yield `None`.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.take(name)? {
            FieldValue::Text(text) => Some(text),
            FieldValue::Int(value) => Some(value.to_string()),
            FieldValue::Absent | FieldValue::Nested(_) => None,
        }
    }

    /// Remove a nested array or object copied through untouched.
    pub fn take_raw(&mut self, name: &str) -> Option<Value> {
        match self.take(name)? {
            FieldValue::Nested(value) => Some(value),
            _ => None,
        }
    }

    /// Remove an integer attribute produced by an integer rule.
    pub fn take_int(&mut self, name: &str) -> Option<i64> {
        self.take(name)?.as_int()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Remaining attributes, for the entity's `extra` bag.
    pub fn into_extra(self) -> ExtraFields {
        self.fields.into_iter().collect()
    }
}
