//! Rules on the numeric value of a field

use super::{Ctx, Verdict, ensure};
use crate::rule::RuleKind;
use crate::translator::Placeholder;
use crate::value::{Value, display_number};

/// Tolerance of `size_numeric`.
const SIZE_EPSILON: f64 = 0.01;

/// Length of the text form, not counting a decimal point.
fn digit_count(ctx: &Ctx<'_>, value: &Value) -> Result<usize, super::Failure> {
    if value.to_number().is_none() {
        return Err(ctx.fail(RuleKind::Numeric));
    }
    let text = value.to_text();
    let len = text.chars().count();
    Ok(if text.contains('.') { len - 1 } else { len })
}

pub(super) fn digits(ctx: &Ctx<'_>, value: &Value, expected: usize) -> Verdict {
    let count = digit_count(ctx, value)?;
    ensure(count == expected, || {
        ctx.fail(RuleKind::Digits)
            .with(Placeholder::Length, expected.to_string())
    })
}

pub(super) fn digits_between(ctx: &Ctx<'_>, value: &Value, least: usize, most: usize) -> Verdict {
    let count = digit_count(ctx, value)?;
    ensure((least..=most).contains(&count), || {
        ctx.fail(RuleKind::DigitsBetween)
            .with(Placeholder::Least, least.to_string())
            .with(Placeholder::Most, most.to_string())
    })
}

pub(super) fn size(ctx: &Ctx<'_>, value: &Value, expected: f64) -> Verdict {
    ensure(
        value
            .to_number()
            .is_some_and(|n| (n - expected).abs() <= SIZE_EPSILON),
        || {
            ctx.fail(RuleKind::SizeNumeric)
                .with(Placeholder::Size, display_number(expected))
        },
    )
}

pub(super) fn least(ctx: &Ctx<'_>, value: &Value, bound: f64) -> Verdict {
    ensure(value.to_number().is_some_and(|n| n >= bound), || {
        ctx.fail(RuleKind::LeastNumeric)
            .with(Placeholder::Least, display_number(bound))
    })
}

pub(super) fn most(ctx: &Ctx<'_>, value: &Value, bound: f64) -> Verdict {
    ensure(value.to_number().is_some_and(|n| n <= bound), || {
        ctx.fail(RuleKind::MostNumeric)
            .with(Placeholder::Most, display_number(bound))
    })
}

pub(super) fn between(ctx: &Ctx<'_>, value: &Value, least: f64, most: f64) -> Verdict {
    ensure(
        value.to_number().is_some_and(|n| (least..=most).contains(&n)),
        || {
            ctx.fail(RuleKind::BetweenNumeric)
                .with(Placeholder::Least, display_number(least))
                .with(Placeholder::Most, display_number(most))
        },
    )
}
