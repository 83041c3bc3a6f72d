//! String length rules. Length is counted in characters of the text form.

use super::{Ctx, Verdict, ensure};
use crate::rule::RuleKind;
use crate::translator::Placeholder;
use crate::value::Value;

fn length(value: &Value) -> usize {
    value.to_text().chars().count()
}

pub(super) fn size(ctx: &Ctx<'_>, value: &Value, expected: usize) -> Verdict {
    ensure(length(value) == expected, || {
        ctx.fail(RuleKind::SizeString)
            .with(Placeholder::Size, expected.to_string())
    })
}

pub(super) fn least(ctx: &Ctx<'_>, value: &Value, bound: usize) -> Verdict {
    ensure(length(value) >= bound, || {
        ctx.fail(RuleKind::LeastString)
            .with(Placeholder::Least, bound.to_string())
    })
}

pub(super) fn most(ctx: &Ctx<'_>, value: &Value, bound: usize) -> Verdict {
    ensure(length(value) <= bound, || {
        ctx.fail(RuleKind::MostString)
            .with(Placeholder::Most, bound.to_string())
    })
}

pub(super) fn between(ctx: &Ctx<'_>, value: &Value, least: usize, most: usize) -> Verdict {
    ensure((least..=most).contains(&length(value)), || {
        ctx.fail(RuleKind::BetweenString)
            .with(Placeholder::Least, least.to_string())
            .with(Placeholder::Most, most.to_string())
    })
}
