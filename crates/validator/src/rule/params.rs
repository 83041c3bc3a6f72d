//! Parameter parsing for rule tokens.
//!
//! Every parser here runs once, when a rule spec is compiled. A malformed
//! parameter is a configuration error and never reaches evaluation.

use chrono::NaiveDate;

use super::RuleKind;
use crate::checks::temporal::parse_ymd;
use crate::error::Error;
use crate::lookup::Collection;

/// Returns the parameter string or fails for a rule that needs one.
pub(super) fn required(kind: RuleKind, params: Option<&str>) -> Result<&str, Error> {
    match params {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(Error::invalid_parameter(kind, "", "missing parameter")),
    }
}

pub(super) fn count(kind: RuleKind, raw: &str) -> Result<usize, Error> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| Error::invalid_parameter(kind, raw, "expected a non-negative integer"))
}

pub(super) fn bound(kind: RuleKind, raw: &str) -> Result<f64, Error> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| Error::invalid_parameter(kind, raw, "expected a number"))
}

/// Splits `MIN,MAX` and checks `MIN <= MAX`.
pub(super) fn pair<T, F>(kind: RuleKind, raw: &str, parse: F) -> Result<(T, T), Error>
where
    T: PartialOrd,
    F: Fn(RuleKind, &str) -> Result<T, Error>,
{
    let Some((least, most)) = raw.split_once(',') else {
        return Err(Error::invalid_parameter(kind, raw, "expected MIN,MAX"));
    };
    let least = parse(kind, least)?;
    let most = parse(kind, most)?;
    if least > most {
        return Err(Error::invalid_parameter(kind, raw, "MIN exceeds MAX"));
    }
    Ok((least, most))
}

pub(super) fn date(kind: RuleKind, raw: &str) -> Result<NaiveDate, Error> {
    parse_ymd(raw).ok_or_else(|| Error::invalid_parameter(kind, raw, "date must match YYYY-MM-DD"))
}

pub(super) fn field(kind: RuleKind, raw: &str) -> Result<String, Error> {
    if raw.contains(',') {
        return Err(Error::invalid_parameter(kind, raw, "expected a single field name"));
    }
    Ok(raw.to_owned())
}

pub(super) fn fields(kind: RuleKind, raw: &str) -> Result<Vec<String>, Error> {
    let names: Vec<String> = raw.split(',').map(str::to_owned).collect();
    if names.iter().any(String::is_empty) {
        return Err(Error::invalid_parameter(kind, raw, "empty field name"));
    }
    Ok(names)
}

pub(super) fn list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_owned).collect()
}

/// Parses `Collection,column` for `exists` and `unique`.
pub(super) fn collection_column(kind: RuleKind, raw: &str) -> Result<(Collection, String), Error> {
    let Some((collection, column)) = raw.split_once(',') else {
        return Err(Error::invalid_parameter(kind, raw, "expected Collection,column"));
    };
    let collection = collection
        .parse::<Collection>()
        .map_err(|_| Error::UnknownCollection {
            rule: kind,
            name: collection.to_owned(),
        })?;
    if column.is_empty() || column.contains(',') {
        return Err(Error::invalid_parameter(kind, raw, "expected a single column name"));
    }
    Ok((collection, column.to_owned()))
}
