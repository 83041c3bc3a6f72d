//! Rules backed by the record lookup

use super::{Ctx, Verdict, ensure};
use crate::error::Error;
use crate::lookup::{Collection, LookupError};
use crate::rule::RuleKind;
use crate::value::Value;

fn lookup_failed(ctx: &Ctx<'_>, rule: RuleKind) -> impl FnOnce(LookupError) -> Error {
    let field = ctx.field.to_owned();
    move |source| Error::Lookup { rule, field, source }
}

pub(super) fn exists(
    ctx: &Ctx<'_>,
    value: &Value,
    collection: Collection,
    column: &str,
) -> Result<Verdict, Error> {
    let found = ctx
        .lookup
        .record_exists(collection, column, value)
        .map_err(lookup_failed(ctx, RuleKind::Exists))?;
    Ok(ensure(found, || ctx.fail(RuleKind::Exists)))
}

pub(super) fn unique(
    ctx: &Ctx<'_>,
    value: &Value,
    collection: Collection,
    column: &str,
) -> Result<Verdict, Error> {
    let unique = ctx
        .lookup
        .value_is_unique(collection, column, value)
        .map_err(lookup_failed(ctx, RuleKind::Unique))?;
    Ok(ensure(unique, || ctx.fail(RuleKind::Unique)))
}
