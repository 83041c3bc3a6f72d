//! Rule evaluation
//!
//! One function per rule, grouped by what the rule inspects. [`check`] is the
//! dispatch table: a `match` over [`Rule`], so every rule kind has exactly one
//! implementation and the compiler enforces it.

mod compare;
mod format;
mod numeric;
mod presence;
mod size;
mod store;
pub(crate) mod temporal;

use std::borrow::Cow;

pub(crate) use compare::CONFIRMATION_SUFFIX;

use crate::error::Error;
use crate::lookup::RecordLookup;
use crate::payload::Payload;
use crate::rule::{Rule, RuleKind};
use crate::translator::{Placeholder, Placeholders};
use crate::value::Value;

/// What a rule sees: the field under validation and its surroundings.
pub(crate) struct Ctx<'a> {
    pub field: &'a str,
    pub value: Option<&'a Value>,
    pub payload: &'a Payload,
    pub lookup: &'a dyn RecordLookup,
}

impl<'a> Ctx<'a> {
    pub fn new(field: &'a str, payload: &'a Payload, lookup: &'a dyn RecordLookup) -> Self {
        Self {
            field,
            value: payload.get(field),
            payload,
            lookup,
        }
    }

    /// A failure for the field under validation, reported with `template`.
    pub fn fail(&self, template: RuleKind) -> Failure {
        Failure {
            template,
            placeholders: Placeholders::field(self.field.to_owned()),
        }
    }
}

/// A failed rule: which template to render and with what.
///
/// The template is not always the rule's own: `after` on a value that is not
/// a date reports the `date` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Failure {
    pub template: RuleKind,
    pub placeholders: Placeholders,
}

impl Failure {
    #[must_use]
    pub fn with(mut self, key: Placeholder, value: impl Into<Cow<'static, str>>) -> Self {
        self.placeholders = self.placeholders.with(key, value);
        self
    }
}

pub(crate) type Verdict = Result<(), Failure>;

/// Turns a predicate into a verdict.
pub(crate) fn ensure(ok: bool, failure: impl FnOnce() -> Failure) -> Verdict {
    if ok { Ok(()) } else { Err(failure()) }
}

/// Runs one rule.
///
/// Presence-class rules always run. Every other rule passes vacuously when the
/// field is absent. `Err` is only returned for collaborator failures.
pub(crate) fn check(rule: &Rule, ctx: &Ctx<'_>) -> Result<Verdict, Error> {
    let verdict = match (rule, ctx.value) {
        (Rule::Required, _) => presence::required(ctx),
        (Rule::RequiredWith(others), _) => presence::required_with(ctx, others),
        (Rule::RequiredWithout(others), _) => presence::required_without(ctx, others),
        (Rule::RequiredIf { other, values }, _) => presence::required_if(ctx, other, values),

        (_, None) => Ok(()),

        (Rule::Accepted, Some(value)) => format::accepted(ctx, value),
        (Rule::Boolean, Some(value)) => format::boolean(ctx, value),
        (Rule::String, Some(value)) => format::string(ctx, value),
        (Rule::Integer, Some(value)) => format::integer(ctx, value),
        (Rule::Numeric, Some(value)) => format::numeric(ctx, value),
        (Rule::Positive, Some(value)) => format::positive(ctx, value),
        (Rule::Alpha, Some(value)) => format::alpha(ctx, value),
        (Rule::AlphaNum, Some(value)) => format::alpha_num(ctx, value),
        (Rule::AlphaDash, Some(value)) => format::alpha_dash(ctx, value),
        (Rule::Email, Some(value)) => format::email(ctx, value),
        (Rule::Url, Some(value)) => format::url(ctx, value),
        (Rule::Json, Some(value)) => format::json(ctx, value),
        (Rule::Regex(pattern), Some(value)) => format::regex(ctx, value, pattern),

        (Rule::Date, Some(value)) => temporal::date(ctx, value),
        (Rule::After(date), Some(value)) => temporal::after(ctx, value, *date),
        (Rule::Before(date), Some(value)) => temporal::before(ctx, value, *date),

        (Rule::Digits(n), Some(value)) => numeric::digits(ctx, value, *n),
        (Rule::DigitsBetween { least, most }, Some(value)) => {
            numeric::digits_between(ctx, value, *least, *most)
        }
        (Rule::SizeNumeric(n), Some(value)) => numeric::size(ctx, value, *n),
        (Rule::LeastNumeric(n), Some(value)) => numeric::least(ctx, value, *n),
        (Rule::MostNumeric(n), Some(value)) => numeric::most(ctx, value, *n),
        (Rule::BetweenNumeric { least, most }, Some(value)) => {
            numeric::between(ctx, value, *least, *most)
        }

        (Rule::SizeString(n), Some(value)) => size::size(ctx, value, *n),
        (Rule::LeastString(n), Some(value)) => size::least(ctx, value, *n),
        (Rule::MostString(n), Some(value)) => size::most(ctx, value, *n),
        (Rule::BetweenString { least, most }, Some(value)) => size::between(ctx, value, *least, *most),

        (Rule::Confirmed, Some(value)) => compare::confirmed(ctx, value),
        (Rule::Same(other), Some(value)) => compare::same(ctx, value, other),
        (Rule::Different(other), Some(value)) => compare::different(ctx, value, other),
        (Rule::FoundIn(list), Some(value)) => compare::found_in(ctx, value, list),
        (Rule::NotIn(list), Some(value)) => compare::not_in(ctx, value, list),

        (Rule::Exists { collection, column }, Some(value)) => {
            return store::exists(ctx, value, *collection, column);
        }
        (Rule::Unique { collection, column }, Some(value)) => {
            return store::unique(ctx, value, *collection, column);
        }
    };
    Ok(verdict)
}
