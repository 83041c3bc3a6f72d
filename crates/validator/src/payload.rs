//! Request payloads
//!
//! A [`Payload`] is the flat, JSON-decoded request body the engine validates.
//! It is read-only during evaluation.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::PayloadError;
use crate::value::Value;

static WHITESPACE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\s+").expect("static whitespace regex"));

/// Field name to scalar value, in request order.
///
/// # Examples
///
/// ```
/// use mealdesk_validator::{Payload, Value};
///
/// let payload = Payload::from_json(serde_json::json!({
///     "name": "  Beef   stew ",
///     "cost": 12.5,
///     "note": "   ",
///     "img_url": null,
/// }))
/// .unwrap()
/// .normalized();
///
/// assert_eq!(payload.get("name"), Some(&Value::from("Beef stew")));
/// assert!(!payload.contains("note"));
/// assert!(!payload.contains("img_url"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    fields: IndexMap<String, Value>,
}

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a decoded JSON body.
    ///
    /// The body must be an object. `null` members are treated as absent;
    /// arrays and objects are rejected.
    pub fn from_json(body: serde_json::Value) -> Result<Self, PayloadError> {
        match body {
            serde_json::Value::Object(map) => Self::from_json_map(map),
            other => Err(PayloadError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, PayloadError> {
        let mut fields = IndexMap::with_capacity(map.len());
        for (field, raw) in map {
            match Value::from_json(raw) {
                Ok(Some(value)) => {
                    fields.insert(field, value);
                }
                Ok(None) => {}
                Err(found) => return Err(PayloadError::Nested { field, found }),
            }
        }
        Ok(Self { fields })
    }

    /// Collapses whitespace runs in string values, trims them and drops the
    /// fields left empty.
    #[must_use]
    pub fn normalized(self) -> Self {
        let fields = self
            .fields
            .into_iter()
            .filter_map(|(field, value)| match value {
                Value::Str(s) => {
                    let cleaned = WHITESPACE.replace_all(&s, " ").trim().to_owned();
                    (!cleaned.is_empty()).then(|| (field, Value::Str(cleaned)))
                }
                other => Some((field, other)),
            })
            .collect();
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.fields.iter()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.fields.retain(|field, _| keep(field));
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
