//! Type and format rules

use std::sync::LazyLock;

use super::{Ctx, Verdict, ensure};
use crate::rule::{Pattern, RuleKind};
use crate::value::Value;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9.+_-]+@[A-Za-z0-9._-]+\.[a-zA-Z]*$").expect("static email regex")
});

static URL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$")
        .expect("static url regex")
});

pub(super) fn accepted(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    let ok = match value {
        Value::Bool(b) => *b,
        Value::Int(_) | Value::Float(_) => value.to_number() == Some(1.0),
        Value::Str(s) => matches!(s.as_str(), "1" | "true" | "yes"),
    };
    ensure(ok, || ctx.fail(RuleKind::Accepted))
}

pub(super) fn boolean(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    let ok = match value {
        Value::Bool(_) => true,
        Value::Int(_) | Value::Float(_) => matches!(value.to_number(), Some(n) if n == 0.0 || n == 1.0),
        Value::Str(s) => matches!(s.as_str(), "1" | "true" | "0" | "false"),
    };
    ensure(ok, || ctx.fail(RuleKind::Boolean))
}

pub(super) fn string(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(value.is_str(), || ctx.fail(RuleKind::String))
}

pub(super) fn integer(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(value.to_integer().is_some(), || ctx.fail(RuleKind::Integer))
}

pub(super) fn numeric(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(value.to_number().is_some(), || ctx.fail(RuleKind::Numeric))
}

pub(super) fn positive(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(value.to_number().is_some_and(|n| n >= 0.0), || {
        ctx.fail(RuleKind::Positive)
    })
}

/// `text` without the `strip` characters is non-empty and every char passes `keep`.
fn only(text: &str, strip: &[char], keep: fn(char) -> bool) -> bool {
    let mut chars = text.chars().filter(|c| !strip.contains(c)).peekable();
    chars.peek().is_some() && chars.all(keep)
}

pub(super) fn alpha(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(only(&value.to_text(), &[' '], char::is_alphabetic), || {
        ctx.fail(RuleKind::Alpha)
    })
}

pub(super) fn alpha_num(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(only(&value.to_text(), &[' '], char::is_alphanumeric), || {
        ctx.fail(RuleKind::AlphaNum)
    })
}

pub(super) fn alpha_dash(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(only(&value.to_text(), &[' ', '-'], char::is_alphanumeric), || {
        ctx.fail(RuleKind::AlphaDash)
    })
}

pub(super) fn email(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    ensure(EMAIL_REGEX.is_match(&value.to_text()), || ctx.fail(RuleKind::Email))
}

pub(super) fn url(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    let text = value.to_text();
    ensure(text == "#" || URL_REGEX.is_match(&text), || ctx.fail(RuleKind::Url))
}

pub(super) fn json(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    let parses = serde_json::from_str::<serde::de::IgnoredAny>(&value.to_text()).is_ok();
    ensure(parses, || ctx.fail(RuleKind::Json))
}

pub(super) fn regex(ctx: &Ctx<'_>, value: &Value, pattern: &Pattern) -> Verdict {
    ensure(pattern.matches(&value.to_text()), || ctx.fail(RuleKind::Regex))
}
