//! The analysis record a conversation is about.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// An externally supplied analysis of a startup.
///
/// The record is loosely typed: every field this crate looks at is
/// optional and may come in several shapes. Accessors never fail, they
/// return `None` or an empty object when the expected shape is missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisRecord(Value);

impl AnalysisRecord {
    /// Wraps an already parsed JSON value.
    #[inline]
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a record from JSON text.
    #[inline]
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s).map(Self)
    }

    /// Returns the underlying JSON value.
    #[inline]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Serializes the record the way it is sent to the interview service.
    pub fn serialize(&self) -> String {
        // Serializing a `Value` cannot fail: all map keys are strings.
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// The `metadata` object, if any.
    #[inline]
    pub fn metadata(&self) -> Option<&Value> {
        self.0.get("metadata").filter(|v| !v.is_null())
    }

    /// A single field of `metadata`.
    #[inline]
    pub fn metadata_field(&self, key: &str) -> Option<&Value> {
        self.metadata()?.get(key).filter(|v| !v.is_null())
    }

    /// `memo.draft_v1.company_overview`, if any.
    #[inline]
    pub fn company_overview(&self) -> Option<&Value> {
        self.0
            .pointer("/memo/draft_v1/company_overview")
            .filter(|v| !v.is_null())
    }

    /// A single field of the company overview.
    #[inline]
    pub fn overview_field(&self, key: &str) -> Option<&Value> {
        self.company_overview()?.get(key).filter(|v| !v.is_null())
    }

    /// The `public_data` field normalized to a JSON container.
    ///
    /// The field is either an object or array already, or a JSON document
    /// encoded as a string. A string that does not parse to an object or
    /// array yields an empty object; the parse failure is logged but never
    /// surfaced.
    pub fn public_data(&self) -> Cow<'_, Value> {
        match self.0.get("public_data") {
            Some(value @ (Value::Object(_) | Value::Array(_))) => {
                Cow::Borrowed(value)
            }
            Some(Value::String(text)) => {
                Cow::Owned(parse_public_data(text))
            }
            _ => Cow::Owned(empty_object()),
        }
    }
}

impl From<Value> for AnalysisRecord {
    #[inline]
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn parse_public_data(text: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        Ok(other) => {
            debug!("public data is not a container: {other}");
            empty_object()
        }
        Err(err) => {
            warn!("failed to parse public data: {err}");
            empty_object()
        }
    }
}

#[inline]
fn empty_object() -> Value {
    Value::Object(Map::new())
}
