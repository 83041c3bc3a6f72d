//! Cross-field and list membership rules

use super::{Ctx, Verdict, ensure};
use crate::rule::RuleKind;
use crate::translator::Placeholder;
use crate::value::Value;

/// Suffix of the sibling field `confirmed` compares against.
pub(crate) const CONFIRMATION_SUFFIX: &str = "_confirmation";

pub(super) fn confirmed(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    let sibling = format!("{}{CONFIRMATION_SUFFIX}", ctx.field);
    let matches = ctx
        .payload
        .get(&sibling)
        .is_some_and(|confirmation| confirmation.loosely_eq(value));
    ensure(matches, || ctx.fail(RuleKind::Confirmed))
}

/// An absent `other` never matches.
pub(super) fn same(ctx: &Ctx<'_>, value: &Value, other: &str) -> Verdict {
    let matches = ctx.payload.get(other).is_some_and(|o| o.loosely_eq(value));
    ensure(matches, || {
        ctx.fail(RuleKind::Same).with(Placeholder::Other, other.to_owned())
    })
}

/// An absent `other` is always different.
pub(super) fn different(ctx: &Ctx<'_>, value: &Value, other: &str) -> Verdict {
    let matches = ctx.payload.get(other).is_some_and(|o| o.loosely_eq(value));
    ensure(!matches, || {
        ctx.fail(RuleKind::Different)
            .with(Placeholder::Other, other.to_owned())
    })
}

fn listed(value: &Value, list: &[String]) -> bool {
    let text = value.to_text();
    list.iter().any(|item| *item == text)
}

pub(super) fn found_in(ctx: &Ctx<'_>, value: &Value, list: &[String]) -> Verdict {
    ensure(listed(value, list), || ctx.fail(RuleKind::FoundIn))
}

pub(super) fn not_in(ctx: &Ctx<'_>, value: &Value, list: &[String]) -> Verdict {
    ensure(!listed(value, list), || ctx.fail(RuleKind::NotIn))
}
