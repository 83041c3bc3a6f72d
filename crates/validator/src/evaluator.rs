//! The evaluator: runs a [`RuleSpec`] against a [`Payload`].
//!
//! Fields are visited in declaration order and each field's rules in the
//! order written. A field stops at its first failing rule. Under
//! [`FailurePolicy::StopOnFirst`] the whole evaluation stops there too.

use crate::checks::{self, Ctx};
use crate::config::{FailurePolicy, ValidatorConfig};
use crate::error::Error;
use crate::lookup::RecordLookup;
use crate::payload::Payload;
use crate::result::ValidationResult;
use crate::rule::Rule;
use crate::spec::RuleSpec;
use crate::translator::Translator;

// ============================================================================
// VALIDATOR
// ============================================================================

/// A configured evaluator.
///
/// Holds no per-request state; one instance can serve concurrent calls.
///
/// # Examples
///
/// ```
/// use mealdesk_validator::{FailurePolicy, NoLookup, Payload, RuleSpec, Validator};
///
/// let spec = RuleSpec::parse([("name", "required|alpha"), ("cost", "required|positive")]).unwrap();
/// let payload = Payload::new().with("name", "Stew 2");
///
/// let result = Validator::new().evaluate(&spec, &payload, &NoLookup).unwrap();
/// assert_eq!(result.errors().len(), 1);
///
/// let all = Validator::new()
///     .with_policy(FailurePolicy::FirstPerField)
///     .evaluate(&spec, &payload, &NoLookup)
///     .unwrap();
/// assert_eq!(all.errors().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: FailurePolicy,
    translator: Translator,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a validator from configuration.
    ///
    /// Fails if a message override names an unknown rule.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, Error> {
        let translator = Translator::with_overrides(&config.messages)?;
        Ok(Self {
            policy: config.policy,
            translator,
        })
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Evaluates `spec` against `payload`.
    ///
    /// Validation failures are reported in the `Ok` result. `Err` means the
    /// lookup failed; the partial result is discarded.
    pub fn evaluate(
        &self,
        spec: &RuleSpec,
        payload: &Payload,
        lookup: &dyn RecordLookup,
    ) -> Result<ValidationResult, Error> {
        let span = tracing::debug_span!(
            "evaluate",
            fields = spec.len(),
            rules = spec.rule_count(),
            policy = %self.policy,
        );
        let _guard = span.enter();

        let mut result = ValidationResult::passed();
        for (field, rules) in spec.iter() {
            let failed = self
                .evaluate_field(field, rules, payload, lookup, &mut result)
                .inspect_err(|e| tracing::error!(field, error = %e, "validation aborted"))?;
            if failed && self.policy == FailurePolicy::StopOnFirst {
                break;
            }
        }

        tracing::debug!(passes = result.passes(), "evaluation finished");
        Ok(result)
    }

    /// Runs one field's rules; returns whether one failed.
    fn evaluate_field(
        &self,
        field: &str,
        rules: &[Rule],
        payload: &Payload,
        lookup: &dyn RecordLookup,
        result: &mut ValidationResult,
    ) -> Result<bool, Error> {
        let ctx = Ctx::new(field, payload, lookup);
        for rule in rules {
            tracing::trace!(field, rule = %rule.kind(), present = ctx.value.is_some(), "dispatch");
            if let Err(failure) = checks::check(rule, &ctx)? {
                let message = self
                    .translator
                    .translate(failure.template, &failure.placeholders);
                tracing::debug!(field, rule = %rule.kind(), %message, "rule failed");
                result.push(field, message);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Evaluates with the default configuration: built-in messages, stop at the
/// first failure.
pub fn evaluate(
    spec: &RuleSpec,
    payload: &Payload,
    lookup: &dyn RecordLookup,
) -> Result<ValidationResult, Error> {
    Validator::new().evaluate(spec, payload, lookup)
}

/// Compiles `(field, rule string)` pairs and evaluates them.
///
/// ```
/// use mealdesk_validator::{NoLookup, Payload, validate};
///
/// let result = validate([("email", "required|email")], &Payload::new(), &NoLookup).unwrap();
/// assert_eq!(result.first_message(), Some("The email field is required."));
///
/// assert!(validate([("email", "bogus_rule")], &Payload::new(), &NoLookup).is_err());
/// ```
pub fn validate<I, K, V>(
    rules: I,
    payload: &Payload,
    lookup: &dyn RecordLookup,
) -> Result<ValidationResult, Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let spec = RuleSpec::parse(rules)
        .inspect_err(|e| tracing::error!(error = %e, "invalid rule spec"))?;
    evaluate(&spec, payload, lookup)
}
