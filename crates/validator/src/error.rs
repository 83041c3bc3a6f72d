//! Error types
//!
//! Validation failures are data, carried by
//! [`ValidationResult`](crate::ValidationResult). Everything in this module is
//! a hard error: a broken rule spec, an unusable payload or a failing record
//! lookup.

use std::borrow::Cow;

use thiserror::Error;

use crate::lookup::LookupError;
use crate::rule::RuleKind;

/// Configuration and collaborator errors raised by the engine.
///
/// None of these describe bad user input. They terminate the validation call
/// and must not be reported to the client as a validation failure.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A rule token names no registered rule.
    #[error("no rule named `{name}`")]
    UnknownRule {
        /// The unrecognised rule name
        name: String,
    },

    /// A rule parameter is missing or malformed.
    #[error("rule `{rule}` has an invalid parameter `{param}`: {reason}")]
    InvalidParameter {
        /// Rule the parameter belongs to
        rule: RuleKind,
        /// Raw parameter text
        param: String,
        /// What is wrong with it
        reason: Cow<'static, str>,
    },

    /// An `exists`/`unique` rule names a collection the data store does not have.
    #[error("rule `{rule}` references unknown collection `{name}`")]
    UnknownCollection {
        /// Rule the parameter belongs to
        rule: RuleKind,
        /// Raw collection name
        name: String,
    },

    /// A `regex` rule pattern does not compile.
    #[error("rule `regex` has an invalid pattern `{pattern}`")]
    InvalidPattern {
        /// The pattern as written in the rule spec
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },

    /// The record lookup collaborator failed.
    #[error("record lookup for rule `{rule}` on field `{field}` failed")]
    Lookup {
        /// `exists` or `unique`
        rule: RuleKind,
        /// Field under validation
        field: String,
        /// Collaborator error
        #[source]
        source: LookupError,
    },
}

impl Error {
    pub(crate) fn invalid_parameter(
        rule: RuleKind,
        param: impl Into<String>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidParameter {
            rule,
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by the rule spec itself.
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::Lookup { .. })
    }
}

/// A request body that cannot be turned into a flat [`Payload`](crate::Payload).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The body is not a JSON object.
    #[error("request body must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON kind of the body
        found: &'static str,
    },

    /// A field holds an array or object.
    #[error("field `{field}` holds a nested {found}; only scalar values are supported")]
    Nested {
        /// Offending field
        field: String,
        /// JSON kind of its value
        found: &'static str,
    },
}
