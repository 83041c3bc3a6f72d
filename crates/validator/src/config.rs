//! Engine configuration

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How far evaluation continues after a rule fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the whole evaluation at the first failing rule. At most one
    /// message is reported per call.
    #[default]
    StopOnFirst,
    /// Evaluate every field, stopping each at its first failing rule.
    FirstPerField,
}

impl FailurePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StopOnFirst => "stop-on-first",
            Self::FirstPerField => "first-per-field",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "stop-on-first" => Ok(Self::StopOnFirst),
            "first-per-field" => Ok(Self::FirstPerField),
            other => Err(format!(
                "unknown failure policy `{other}`, expected `stop-on-first` or `first-per-field`"
            )),
        }
    }
}

/// Configuration of a [`Validator`](crate::Validator).
///
/// ```
/// use mealdesk_validator::{FailurePolicy, ValidatorConfig};
///
/// let config: ValidatorConfig = serde_json::from_str(r#"{
///     "policy": "first-per-field",
///     "messages": { "required": "Please provide :field:." }
/// }"#).unwrap();
///
/// assert_eq!(config.policy, FailurePolicy::FirstPerField);
/// assert_eq!(ValidatorConfig::default().policy, FailurePolicy::StopOnFirst);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub policy: FailurePolicy,
    /// Rule name to message template, replacing the built-in wording.
    pub messages: BTreeMap<String, String>,
}

impl ValidatorConfig {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(rule.into(), template.into());
        self
    }
}
