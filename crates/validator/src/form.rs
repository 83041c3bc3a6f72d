//! Form requests
//!
//! A form request is an endpoint's rule spec plus the request cleaning the HTTP
//! layer applies before validation: the body must be a JSON object, string
//! values are whitespace-normalised, empty strings are dropped and fields the
//! spec does not declare are discarded (their `_confirmation` siblings are
//! kept for `confirmed`).

use thiserror::Error;

use crate::checks::CONFIRMATION_SUFFIX;
use crate::error::{Error, PayloadError};
use crate::evaluator::Validator;
use crate::lookup::RecordLookup;
use crate::payload::Payload;
use crate::result::{ErrorEnvelope, ErrorMap};
use crate::spec::RuleSpec;

/// Why a form request was not accepted.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormError {
    /// The body is not a JSON object.
    #[error("request body is not a JSON object")]
    NotJson,

    /// The body holds a field the engine cannot validate.
    #[error(transparent)]
    Payload(PayloadError),

    /// The payload failed validation.
    #[error("request failed validation")]
    Rejected(ErrorMap),

    /// The rule spec is broken or the lookup failed.
    #[error(transparent)]
    Engine(#[from] Error),
}

impl FormError {
    pub const NOT_JSON_FIELD: &'static str = "request";
    pub const NOT_JSON_MESSAGE: &'static str = "Request must be valid JSON";

    /// The client-facing envelope, or `None` for server-side errors.
    pub fn envelope(&self) -> Option<ErrorEnvelope> {
        match self {
            Self::NotJson => Some(ErrorEnvelope::single(
                Self::NOT_JSON_FIELD,
                Self::NOT_JSON_MESSAGE,
            )),
            Self::Payload(PayloadError::Nested { field, found }) => Some(ErrorEnvelope::single(
                field.clone(),
                format!("The {} must not be a nested {found}.", field.replace('_', " ")),
            )),
            Self::Payload(_) => Some(ErrorEnvelope::single(
                Self::NOT_JSON_FIELD,
                Self::NOT_JSON_MESSAGE,
            )),
            Self::Rejected(errors) => Some(ErrorEnvelope::new(errors.clone())),
            Self::Engine(_) => None,
        }
    }
}

impl From<PayloadError> for FormError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::NotAnObject { .. } => Self::NotJson,
            other => Self::Payload(other),
        }
    }
}

/// An endpoint's validation contract.
///
/// ```
/// use mealdesk_validator::form::{FormError, FormRequest};
/// use mealdesk_validator::{Error, NoLookup, RuleSpec};
///
/// struct LoginRequest;
///
/// impl FormRequest for LoginRequest {
///     fn rules(&self) -> Result<RuleSpec, Error> {
///         RuleSpec::parse([("email", "required|email"), ("password", "required|string")])
///     }
/// }
///
/// let body = serde_json::json!({ "email": " ada@example.com ", "password": "pw", "admin": true });
/// let payload = LoginRequest.validate(body, &NoLookup).unwrap();
/// assert!(!payload.contains("admin"));
///
/// let err = LoginRequest.validate(serde_json::json!({}), &NoLookup).unwrap_err();
/// assert!(matches!(err, FormError::Rejected(_)));
/// ```
pub trait FormRequest {
    /// The rule spec of the endpoint.
    fn rules(&self) -> Result<RuleSpec, Error>;

    /// The validator to run the rules with.
    fn validator(&self) -> Validator {
        Validator::new()
    }

    /// Cleans and validates a decoded request body.
    ///
    /// Returns the cleaned payload the handler should use.
    fn validate(&self, body: serde_json::Value, lookup: &dyn RecordLookup) -> Result<Payload, FormError> {
        let spec = self.rules()?;
        let mut payload = Payload::from_json(body)?.normalized();
        payload.retain(|field| spec.contains_field(field) || field.ends_with(CONFIRMATION_SUFFIX));

        let result = self.validator().evaluate(&spec, &payload, lookup)?;
        result.into_result().map_err(FormError::Rejected)?;
        Ok(payload)
    }
}

impl FormRequest for RuleSpec {
    fn rules(&self) -> Result<RuleSpec, Error> {
        Ok(self.clone())
    }
}
