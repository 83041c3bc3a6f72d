//! Prelude module for convenient imports.
//!
//! ```
//! use mealdesk_validator::prelude::*;
//!
//! let result = validate([("email", "required|email")], &Payload::new(), &NoLookup).unwrap();
//! assert!(result.fails());
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::config::{FailurePolicy, ValidatorConfig};
pub use crate::error::Error;
pub use crate::evaluator::{Validator, evaluate, validate};
pub use crate::result::{ErrorEnvelope, ErrorMap, ValidationResult};

// ============================================================================
// INPUTS
// ============================================================================

pub use crate::payload::Payload;
pub use crate::rule::{Rule, RuleKind};
pub use crate::spec::RuleSpec;
pub use crate::value::Value;

// ============================================================================
// COLLABORATORS
// ============================================================================

pub use crate::form::{FormError, FormRequest};
pub use crate::lookup::{Collection, InMemoryLookup, NoLookup, RecordLookup};
