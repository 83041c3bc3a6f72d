//! Validation outcomes and the HTTP error envelope

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to its failure messages, in evaluation order.
pub type ErrorMap = IndexMap<String, Vec<String>>;

/// Outcome of one evaluation.
///
/// Each field holds at most one message: evaluation of a field stops at its
/// first failing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ValidationResult {
    errors: ErrorMap,
}

impl ValidationResult {
    pub fn passed() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_owned()).or_default().push(message);
    }

    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fails(&self) -> bool {
        !self.passes()
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }

    /// The first message of the first failing field.
    pub fn first_message(&self) -> Option<&str> {
        self.errors
            .values()
            .flat_map(|messages| messages.first())
            .map(String::as_str)
            .next()
    }

    /// `Ok(())` when the payload passed, the error map otherwise.
    pub fn into_result(self) -> Result<(), ErrorMap> {
        if self.passes() { Ok(()) } else { Err(self.errors) }
    }
}

// ============================================================================
// ENVELOPE
// ============================================================================

/// The JSON body returned to clients for a rejected request.
///
/// ```
/// use mealdesk_validator::result::{ErrorEnvelope, ErrorMap};
///
/// let mut errors = ErrorMap::new();
/// errors.insert("email".into(), vec!["The email field is required.".into()]);
///
/// let body = serde_json::to_string(&ErrorEnvelope::new(errors)).unwrap();
/// assert_eq!(
///     body,
///     r#"{"success":false,"message":"Validation error.","errors":{"email":["The email field is required."]}}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub errors: ErrorMap,
}

impl ErrorEnvelope {
    /// HTTP status of a validation rejection.
    pub const STATUS: u16 = 400;

    pub const MESSAGE: &'static str = "Validation error.";

    #[must_use]
    pub fn new(errors: ErrorMap) -> Self {
        Self {
            success: false,
            message: Self::MESSAGE.to_owned(),
            errors,
        }
    }

    /// The envelope for a single field and message.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ErrorMap::new();
        errors.insert(field.into(), vec![message.into()]);
        Self::new(errors)
    }

    pub const fn status(&self) -> u16 {
        Self::STATUS
    }
}

impl From<ValidationResult> for ErrorEnvelope {
    fn from(result: ValidationResult) -> Self {
        Self::new(result.into_errors())
    }
}
