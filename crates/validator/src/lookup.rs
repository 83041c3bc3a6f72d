//! Record lookup port
//!
//! `exists` and `unique` ask the data store about a column value in a named
//! collection. The engine only sees the [`RecordLookup`] trait; the data-access
//! layer supplies the implementation. Collections are a closed enum so a rule
//! string can never name an arbitrary model.

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

// ============================================================================
// COLLECTION
// ============================================================================

/// A collection (table) of the Mealdesk data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Collection {
    User,
    Meal,
    Menu,
    MenuItem,
    Order,
    Notification,
    PasswordReset,
}

impl Collection {
    pub const ALL: [Self; 7] = [
        Self::User,
        Self::Meal,
        Self::Menu,
        Self::MenuItem,
        Self::Order,
        Self::Notification,
        Self::PasswordReset,
    ];

    /// The model name used in rule parameters, e.g. `MenuItem`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Meal => "Meal",
            Self::Menu => "Menu",
            Self::MenuItem => "MenuItem",
            Self::Order => "Order",
            Self::Notification => "Notification",
            Self::PasswordReset => "PasswordReset",
        }
    }

    /// The table name, e.g. `menu_items`.
    pub const fn table(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Meal => "meals",
            Self::Menu => "menus",
            Self::MenuItem => "menu_items",
            Self::Order => "orders",
            Self::Notification => "notifications",
            Self::PasswordReset => "password_resets",
        }
    }

    /// Singular snake-case name, e.g. `menu_item`.
    const fn snake(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Meal => "meal",
            Self::Menu => "menu",
            Self::MenuItem => "menu_item",
            Self::Order => "order",
            Self::Notification => "notification",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl fmt::Display for UnknownCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collection `{}`", self.0)
    }
}

impl StdError for UnknownCollection {}

impl FromStr for Collection {
    type Err = UnknownCollection;

    /// Accepts `MenuItem`, `menu_item` or `menu_items`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s || c.snake() == s || c.table() == s)
            .ok_or_else(|| UnknownCollection(s.to_owned()))
    }
}

impl TryFrom<String> for Collection {
    type Error = UnknownCollection;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Collection> for String {
    fn from(value: Collection) -> Self {
        value.name().to_owned()
    }
}

// ============================================================================
// LOOKUP ERROR
// ============================================================================

/// Failure reported by a [`RecordLookup`] implementation.
#[derive(Debug)]
pub struct LookupError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl LookupError {
    /// An error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying data-store error.
    pub fn from_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for LookupError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

// ============================================================================
// PORT
// ============================================================================

/// Existence and uniqueness queries against the data store.
///
/// Implementations must be safe for concurrent reads. The engine never retries
/// and never applies a timeout; a failing call aborts the validation with
/// [`Error::Lookup`](crate::Error::Lookup).
pub trait RecordLookup: Send + Sync {
    /// Whether some record in `collection` has `column` equal to `value`.
    fn record_exists(
        &self,
        collection: Collection,
        column: &str,
        value: &Value,
    ) -> Result<bool, LookupError>;

    /// Whether no record in `collection` has `column` matching `value`,
    /// compared case-insensitively.
    fn value_is_unique(
        &self,
        collection: Collection,
        column: &str,
        value: &Value,
    ) -> Result<bool, LookupError>;
}

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn record_exists(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        (**self).record_exists(collection, column, value)
    }

    fn value_is_unique(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        (**self).value_is_unique(collection, column, value)
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for Arc<T> {
    fn record_exists(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        (**self).record_exists(collection, column, value)
    }

    fn value_is_unique(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        (**self).value_is_unique(collection, column, value)
    }
}

/// A lookup for rule specs that never use `exists` or `unique`.
///
/// Every call fails, so a misconfigured spec surfaces as an error instead of
/// a silent pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl RecordLookup for NoLookup {
    fn record_exists(&self, collection: Collection, _column: &str, _value: &Value) -> Result<bool, LookupError> {
        Err(LookupError::new(format!("no record store configured for {collection}")))
    }

    fn value_is_unique(&self, collection: Collection, _column: &str, _value: &Value) -> Result<bool, LookupError> {
        Err(LookupError::new(format!("no record store configured for {collection}")))
    }
}

// ============================================================================
// IN-MEMORY LOOKUP
// ============================================================================

/// One row: column name to value.
pub type Record = IndexMap<String, Value>;

/// Deterministic in-memory record store.
///
/// Deserialises from a JSON/TOML map of collection name to a list of records:
///
/// ```
/// use mealdesk_validator::lookup::{Collection, InMemoryLookup, RecordLookup};
/// use mealdesk_validator::Value;
///
/// let store: InMemoryLookup = serde_json::from_str(
///     r#"{ "User": [ { "id": 1, "email": "ada@example.com" } ] }"#,
/// ).unwrap();
///
/// assert!(store.record_exists(Collection::User, "id", &Value::from(1)).unwrap());
/// assert!(!store.value_is_unique(Collection::User, "email", &Value::from("ADA@example.com")).unwrap());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryLookup {
    collections: IndexMap<Collection, Vec<Record>>,
}

impl InMemoryLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to `collection`.
    pub fn insert(&mut self, collection: Collection, record: Record) {
        self.collections.entry(collection).or_default().push(record);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_record<I, K, V>(mut self, collection: Collection, columns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let record = columns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.insert(collection, record);
        self
    }

    pub fn records(&self, collection: Collection) -> &[Record] {
        self.collections.get(&collection).map_or(&[], Vec::as_slice)
    }

    fn column_values<'a>(
        &'a self,
        collection: Collection,
        column: &'a str,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.records(collection)
            .iter()
            .filter_map(move |record| record.get(column))
    }
}

impl RecordLookup for InMemoryLookup {
    fn record_exists(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        let text = value.to_text();
        Ok(self
            .column_values(collection, column)
            .any(|stored| stored.loosely_eq(value) || stored.to_text() == text))
    }

    fn value_is_unique(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        let needle = value.to_text().to_lowercase();
        Ok(!self
            .column_values(collection, column)
            .any(|stored| stored.to_text().to_lowercase() == needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names() {
        for collection in Collection::ALL {
            assert_eq!(collection.name().parse::<Collection>(), Ok(collection));
            assert_eq!(collection.table().parse::<Collection>(), Ok(collection));
        }
        assert_eq!("menu_item".parse::<Collection>(), Ok(Collection::MenuItem));
        assert!("Users; DROP TABLE".parse::<Collection>().is_err());
    }

    #[test]
    fn exists_compares_numbers_and_text() {
        let store = InMemoryLookup::new().with_record(Collection::Meal, [("id", 3)]);
        assert!(store.record_exists(Collection::Meal, "id", &Value::from(3)).unwrap());
        assert!(store.record_exists(Collection::Meal, "id", &Value::from("3")).unwrap());
        assert!(!store.record_exists(Collection::Meal, "id", &Value::from(4)).unwrap());
        assert!(!store.record_exists(Collection::Menu, "id", &Value::from(3)).unwrap());
    }

    #[test]
    fn unique_ignores_case() {
        let store = InMemoryLookup::new().with_record(Collection::Menu, [("name", "Lunch")]);
        assert!(!store.value_is_unique(Collection::Menu, "name", &Value::from("LUNCH")).unwrap());
        assert!(store.value_is_unique(Collection::Menu, "name", &Value::from("Dinner")).unwrap());
    }

    #[test]
    fn no_lookup_always_fails() {
        let err = NoLookup.record_exists(Collection::User, "id", &Value::from(1)).unwrap_err();
        assert!(err.to_string().contains("User"));
    }

    #[test]
    fn lookup_error_keeps_its_source() {
        let io = std::io::Error::other("connection reset");
        let err = LookupError::from_source("users query failed", io);
        assert_eq!(err.message(), "users query failed");
        assert!(StdError::source(&err).is_some());
    }
}
