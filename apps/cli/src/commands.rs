//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use mealdesk_validator::form::{FormError, FormRequest};
use mealdesk_validator::translator::Translator;
use mealdesk_validator::{
    Error, ErrorEnvelope, InMemoryLookup, NoLookup, Payload, RecordLookup, RuleKind, RuleSpec,
    Validator,
};

use crate::cli::ValidateArgs;
use crate::settings::Settings;

/// What `validate` decided about the body.
pub enum Outcome {
    Passed,
    Rejected(ErrorEnvelope),
}

/// The rule file wrapped as a form request with the configured validator.
struct ConfiguredForm {
    spec: RuleSpec,
    validator: Validator,
}

impl FormRequest for ConfiguredForm {
    fn rules(&self) -> Result<RuleSpec, Error> {
        Ok(self.spec.clone())
    }

    fn validator(&self) -> Validator {
        self.validator.clone()
    }
}

pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<Outcome> {
    let span = info_span!("validate", payload = %args.payload.display());
    let _guard = span.enter();

    let validator = Validator::from_config(&settings.validator_config())
        .context("invalid `messages` in settings")?;
    let spec: RuleSpec = read_structured(&args.rules)
        .with_context(|| format!("loading rules from {}", args.rules.display()))?;
    debug!(fields = spec.len(), rules = spec.rule_count(), "rules loaded");

    let lookup: Box<dyn RecordLookup> = match &args.records {
        Some(path) => Box::new(
            read_structured::<InMemoryLookup>(path)
                .with_context(|| format!("loading records from {}", path.display()))?,
        ),
        None => Box::new(NoLookup),
    };

    let text = fs::read_to_string(&args.payload)
        .with_context(|| format!("reading {}", args.payload.display()))?;
    let Ok(body) = serde_json::from_str::<serde_json::Value>(&text) else {
        info!("request body is not valid JSON");
        return Ok(Outcome::Rejected(ErrorEnvelope::single(
            FormError::NOT_JSON_FIELD,
            FormError::NOT_JSON_MESSAGE,
        )));
    };

    let outcome = if args.raw {
        validate_raw(&validator, &spec, body, lookup.as_ref())
    } else {
        let form = ConfiguredForm { spec, validator };
        form.validate(body, lookup.as_ref()).map(|_| ())
    };

    match outcome {
        Ok(()) => {
            info!("request passed");
            Ok(Outcome::Passed)
        }
        Err(err) => match err.envelope() {
            Some(envelope) => {
                info!(fields = envelope.errors.len(), "request rejected");
                Ok(Outcome::Rejected(envelope))
            }
            None => Err(err).context("validation aborted"),
        },
    }
}

/// Validates the body without normalising strings or dropping fields.
fn validate_raw(
    validator: &Validator,
    spec: &RuleSpec,
    body: serde_json::Value,
    lookup: &dyn RecordLookup,
) -> Result<(), FormError> {
    let payload = Payload::from_json(body)?;
    validator
        .evaluate(spec, &payload, lookup)?
        .into_result()
        .map_err(FormError::Rejected)
}

pub fn run_rules(settings: &Settings) -> Result<()> {
    let translator = Translator::with_overrides(&settings.messages)
        .context("invalid `messages` in settings")?;
    let width = RuleKind::ALL
        .iter()
        .map(|kind| kind.name().len())
        .max()
        .unwrap_or_default();
    for kind in RuleKind::ALL {
        println!("{:width$}  {}", kind.name(), translator.template(kind));
    }
    Ok(())
}

/// Reads a TOML or JSON file, chosen by extension.
fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(toml::from_str(&text)?),
        Some("json") => Ok(serde_json::from_str(&text)?),
        _ => bail!("unsupported file type {} (expected .toml or .json)", path.display()),
    }
}
