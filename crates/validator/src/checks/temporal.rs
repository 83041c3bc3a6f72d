//! Calendar date rules

use chrono::NaiveDate;

use super::{Ctx, Verdict, ensure};
use crate::rule::RuleKind;
use crate::translator::Placeholder;
use crate::value::Value;

/// Parses `YYYY-MM-DD`: exactly three `-`-separated integers forming a real
/// calendar date with a year in `1..=9999`.
///
/// Components need not be zero-padded (`2008-1-9` is accepted).
pub(crate) fn parse_ymd(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let (Some(year), Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    if !(1..=9999).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn field_date(ctx: &Ctx<'_>, value: &Value) -> Result<NaiveDate, super::Failure> {
    parse_ymd(&value.to_text()).ok_or_else(|| ctx.fail(RuleKind::Date))
}

pub(super) fn date(ctx: &Ctx<'_>, value: &Value) -> Verdict {
    field_date(ctx, value).map(drop)
}

/// On or after `bound`.
pub(super) fn after(ctx: &Ctx<'_>, value: &Value, bound: NaiveDate) -> Verdict {
    let date = field_date(ctx, value)?;
    ensure(date >= bound, || {
        ctx.fail(RuleKind::After)
            .with(Placeholder::Date, bound.format("%Y-%m-%d").to_string())
    })
}

/// On or before `bound`.
pub(super) fn before(ctx: &Ctx<'_>, value: &Value, bound: NaiveDate) -> Verdict {
    let date = field_date(ctx, value)?;
    ensure(date <= bound, || {
        ctx.fail(RuleKind::Before)
            .with(Placeholder::Date, bound.format("%Y-%m-%d").to_string())
    })
}
