//! Presence-class rules. These run whether or not the field is present.

use super::{Ctx, Verdict, ensure};
use crate::rule::RuleKind;
use crate::translator::Placeholder;

pub(super) fn required(ctx: &Ctx<'_>) -> Verdict {
    ensure(ctx.value.is_some(), || ctx.fail(RuleKind::Required))
}

/// Required when any of `others` is present.
pub(super) fn required_with(ctx: &Ctx<'_>, others: &[String]) -> Verdict {
    ensure(
        ctx.value.is_some() || !others.iter().any(|o| ctx.payload.contains(o)),
        || ctx.fail(RuleKind::RequiredWith).with(Placeholder::Other, others.join(", ")),
    )
}

/// Required when any of `others` is absent.
pub(super) fn required_without(ctx: &Ctx<'_>, others: &[String]) -> Verdict {
    ensure(
        ctx.value.is_some() || others.iter().all(|o| ctx.payload.contains(o)),
        || ctx.fail(RuleKind::RequiredWithout).with(Placeholder::Other, others.join(", ")),
    )
}

/// Required when the text form of `other` is one of `values`.
pub(super) fn required_if(ctx: &Ctx<'_>, other: &str, values: &[String]) -> Verdict {
    if ctx.value.is_some() {
        return Ok(());
    }
    let Some(actual) = ctx.payload.get(other) else {
        return Ok(());
    };
    let actual = actual.to_text();
    ensure(!values.iter().any(|v| *v == actual), || {
        ctx.fail(RuleKind::RequiredIf)
            .with(Placeholder::Other, other.to_owned())
            .with(Placeholder::Value, actual.into_owned())
    })
}
