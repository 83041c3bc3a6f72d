//! Shared fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};

use mealdesk_validator::prelude::*;
use mealdesk_validator::LookupError;

/// A lookup with canned answers that counts how often it was asked.
#[derive(Debug, Default)]
pub struct FixedLookup {
    pub exists: bool,
    pub unique: bool,
    calls: AtomicUsize,
}

impl FixedLookup {
    pub fn answering(exists: bool, unique: bool) -> Self {
        Self {
            exists,
            unique,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordLookup for FixedLookup {
    fn record_exists(&self, _: Collection, _: &str, _: &Value) -> Result<bool, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.exists)
    }

    fn value_is_unique(&self, _: Collection, _: &str, _: &Value) -> Result<bool, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.unique)
    }
}

/// A lookup whose data store is down.
#[derive(Debug, Default)]
pub struct BrokenLookup;

impl RecordLookup for BrokenLookup {
    fn record_exists(&self, collection: Collection, _: &str, _: &Value) -> Result<bool, LookupError> {
        Err(LookupError::from_source(
            format!("querying {}", collection.table()),
            std::io::Error::other("connection refused"),
        ))
    }

    fn value_is_unique(&self, collection: Collection, column: &str, value: &Value) -> Result<bool, LookupError> {
        self.record_exists(collection, column, value)
    }
}

/// The records the catalogue tests look up.
pub fn store() -> InMemoryLookup {
    InMemoryLookup::new()
        .with_record(Collection::Meal, [("id", Value::from(1)), ("name", Value::from("Beef Stew"))])
        .with_record(Collection::User, [("id", Value::from(1)), ("email", Value::from("ada@example.com"))])
}

pub fn payload(body: serde_json::Value) -> Payload {
    Payload::from_json(body).expect("test payloads are flat objects")
}

pub fn run(rules: &[(&str, &str)], body: serde_json::Value) -> ValidationResult {
    validate(rules.iter().copied(), &payload(body), &store()).expect("rule spec is valid")
}
