//! # mealdesk-validator
//!
//! The request validation engine of the Mealdesk API.
//!
//! Endpoints declare their input as a map of field name to a `|`-separated
//! rule string. The engine compiles those strings into typed [`Rule`]s,
//! evaluates them against a flat JSON [`Payload`] and renders failures into
//! human-readable messages.
//!
//! ## Quick Start
//!
//! ```
//! use mealdesk_validator::prelude::*;
//!
//! let spec = RuleSpec::parse([
//!     ("quantity", "required|integer|positive"),
//!     ("menu_item_id", "required|integer|exists:MenuItem,id"),
//! ])
//! .unwrap();
//!
//! let store = InMemoryLookup::new().with_record(Collection::MenuItem, [("id", 7)]);
//! let payload = Payload::new().with("quantity", 2).with("menu_item_id", 8);
//!
//! let result = evaluate(&spec, &payload, &store).unwrap();
//! assert_eq!(result.first_message(), Some("The selected menu item id is invalid."));
//! ```
//!
//! ## Errors
//!
//! A failing rule is data: it ends up in [`ValidationResult`]. An unknown rule
//! name, a malformed rule parameter or a failing record lookup is an
//! [`Error`] and aborts the call.
//!
//! ## Modules
//!
//! - [`rule`]: rule kinds, typed rules and the token grammar
//! - [`spec`]: compiled per-field rule lists
//! - [`evaluator`]: the [`Validator`] and [`evaluate`]
//! - [`translator`]: message templates and placeholder substitution
//! - [`lookup`]: the [`RecordLookup`] port for `exists`/`unique`
//! - [`form`]: request cleaning and [`FormRequest`](form::FormRequest)

mod checks;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod form;
pub mod lookup;
pub mod payload;
pub mod prelude;
pub mod result;
pub mod rule;
pub mod spec;
pub mod translator;
pub mod value;

pub use config::{FailurePolicy, ValidatorConfig};
pub use error::{Error, PayloadError};
pub use evaluator::{Validator, evaluate, validate};
pub use lookup::{Collection, InMemoryLookup, LookupError, NoLookup, RecordLookup};
pub use payload::Payload;
pub use result::{ErrorEnvelope, ErrorMap, ValidationResult};
pub use rule::{Rule, RuleKind};
pub use spec::RuleSpec;
pub use value::Value;
