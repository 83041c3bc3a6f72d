//! Rules and the rule-token grammar
//!
//! A field's rule string is a `|`-separated list of tokens. Each token is a
//! bare rule name (`required`) or `name:params`, split on the first `:`. List
//! parameters are separated by `,`; `regex:` takes the rest of the token
//! verbatim.
//!
//! Tokens compile into [`Rule`] values with typed parameters. Rules built
//! through the constructors on [`Rule`] bypass the string grammar, so list
//! members containing `,` and patterns containing `|` stay expressible.
//!
//! ```
//! use mealdesk_validator::rule::{Rule, RuleKind, parse_rules};
//!
//! let rules = parse_rules("required|integer|between_numeric:0,100").unwrap();
//! let kinds: Vec<_> = rules.iter().map(Rule::kind).collect();
//! assert_eq!(kinds, [RuleKind::Required, RuleKind::Integer, RuleKind::BetweenNumeric]);
//! ```

mod kind;
mod params;

use std::fmt;

use chrono::NaiveDate;

pub use kind::RuleKind;

use crate::error::Error;
use crate::lookup::Collection;
use crate::value::display_number;

// ============================================================================
// PATTERN
// ============================================================================

/// A compiled `regex` rule pattern, anchored at the start of the value.
///
/// Matching is a prefix match: `^\d+` and `\d+` both accept `"123abc"`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: regex::Regex,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: &str) -> Result<Self, Error> {
        let compiled =
            regex::Regex::new(&format!(r"\A(?:{source})")).map_err(|e| Error::InvalidPattern {
                pattern: source.to_owned(),
                source: e,
            })?;
        Ok(Self {
            source: source.to_owned(),
            compiled,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern matches at the start of `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

// ============================================================================
// RULE
// ============================================================================

/// A rule with its parameters parsed.
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    RequiredWith(Vec<String>),
    RequiredWithout(Vec<String>),
    RequiredIf { other: String, values: Vec<String> },
    Accepted,
    Boolean,
    String,
    Integer,
    Numeric,
    Positive,
    Alpha,
    AlphaNum,
    AlphaDash,
    Email,
    Url,
    Json,
    Date,
    After(NaiveDate),
    Before(NaiveDate),
    Digits(usize),
    DigitsBetween { least: usize, most: usize },
    SizeString(usize),
    SizeNumeric(f64),
    LeastString(usize),
    MostString(usize),
    LeastNumeric(f64),
    MostNumeric(f64),
    BetweenString { least: usize, most: usize },
    BetweenNumeric { least: f64, most: f64 },
    Confirmed,
    Same(String),
    Different(String),
    FoundIn(Vec<String>),
    NotIn(Vec<String>),
    Regex(Pattern),
    Exists { collection: Collection, column: String },
    Unique { collection: Collection, column: String },
}

impl Rule {
    /// The rule's name.
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::RequiredWith(_) => RuleKind::RequiredWith,
            Self::RequiredWithout(_) => RuleKind::RequiredWithout,
            Self::RequiredIf { .. } => RuleKind::RequiredIf,
            Self::Accepted => RuleKind::Accepted,
            Self::Boolean => RuleKind::Boolean,
            Self::String => RuleKind::String,
            Self::Integer => RuleKind::Integer,
            Self::Numeric => RuleKind::Numeric,
            Self::Positive => RuleKind::Positive,
            Self::Alpha => RuleKind::Alpha,
            Self::AlphaNum => RuleKind::AlphaNum,
            Self::AlphaDash => RuleKind::AlphaDash,
            Self::Email => RuleKind::Email,
            Self::Url => RuleKind::Url,
            Self::Json => RuleKind::Json,
            Self::Date => RuleKind::Date,
            Self::After(_) => RuleKind::After,
            Self::Before(_) => RuleKind::Before,
            Self::Digits(_) => RuleKind::Digits,
            Self::DigitsBetween { .. } => RuleKind::DigitsBetween,
            Self::SizeString(_) => RuleKind::SizeString,
            Self::SizeNumeric(_) => RuleKind::SizeNumeric,
            Self::LeastString(_) => RuleKind::LeastString,
            Self::MostString(_) => RuleKind::MostString,
            Self::LeastNumeric(_) => RuleKind::LeastNumeric,
            Self::MostNumeric(_) => RuleKind::MostNumeric,
            Self::BetweenString { .. } => RuleKind::BetweenString,
            Self::BetweenNumeric { .. } => RuleKind::BetweenNumeric,
            Self::Confirmed => RuleKind::Confirmed,
            Self::Same(_) => RuleKind::Same,
            Self::Different(_) => RuleKind::Different,
            Self::FoundIn(_) => RuleKind::FoundIn,
            Self::NotIn(_) => RuleKind::NotIn,
            Self::Regex(_) => RuleKind::Regex,
            Self::Exists { .. } => RuleKind::Exists,
            Self::Unique { .. } => RuleKind::Unique,
        }
    }

    /// Parses a single `name` or `name:params` token.
    pub fn parse(token: &str) -> Result<Self, Error> {
        let (name, raw) = match token.split_once(':') {
            Some((name, raw)) => (name, Some(raw)),
            None => (token, None),
        };
        let kind: RuleKind = name.trim().parse()?;

        if let Some(rule) = Self::bare(kind) {
            return match raw {
                Some(raw) => Err(Error::invalid_parameter(kind, raw, "rule takes no parameters")),
                None => Ok(rule),
            };
        }

        let p = params::required(kind, raw)?;
        let rule = match kind {
            RuleKind::RequiredWith => Self::RequiredWith(params::fields(kind, p)?),
            RuleKind::RequiredWithout => Self::RequiredWithout(params::fields(kind, p)?),
            RuleKind::RequiredIf => {
                let Some((other, values)) = p.split_once(',') else {
                    return Err(Error::invalid_parameter(kind, p, "expected OTHER,VALUE,..."));
                };
                Self::RequiredIf {
                    other: params::field(kind, other)?,
                    values: params::list(values),
                }
            }
            RuleKind::After => Self::After(params::date(kind, p)?),
            RuleKind::Before => Self::Before(params::date(kind, p)?),
            RuleKind::Digits => Self::Digits(params::count(kind, p)?),
            RuleKind::DigitsBetween => {
                let (least, most) = params::pair(kind, p, params::count)?;
                Self::DigitsBetween { least, most }
            }
            RuleKind::SizeString => Self::SizeString(params::count(kind, p)?),
            RuleKind::SizeNumeric => Self::SizeNumeric(params::bound(kind, p)?),
            RuleKind::LeastString => Self::LeastString(params::count(kind, p)?),
            RuleKind::MostString => Self::MostString(params::count(kind, p)?),
            RuleKind::LeastNumeric => Self::LeastNumeric(params::bound(kind, p)?),
            RuleKind::MostNumeric => Self::MostNumeric(params::bound(kind, p)?),
            RuleKind::BetweenString => {
                let (least, most) = params::pair(kind, p, params::count)?;
                Self::BetweenString { least, most }
            }
            RuleKind::BetweenNumeric => {
                let (least, most) = params::pair(kind, p, params::bound)?;
                Self::BetweenNumeric { least, most }
            }
            RuleKind::Same => Self::Same(params::field(kind, p)?),
            RuleKind::Different => Self::Different(params::field(kind, p)?),
            RuleKind::FoundIn => Self::FoundIn(params::list(p)),
            RuleKind::NotIn => Self::NotIn(params::list(p)),
            RuleKind::Regex => Self::Regex(Pattern::new(p)?),
            RuleKind::Exists => {
                let (collection, column) = params::collection_column(kind, p)?;
                Self::Exists { collection, column }
            }
            RuleKind::Unique => {
                let (collection, column) = params::collection_column(kind, p)?;
                Self::Unique { collection, column }
            }
            RuleKind::Required
            | RuleKind::Accepted
            | RuleKind::Boolean
            | RuleKind::String
            | RuleKind::Integer
            | RuleKind::Numeric
            | RuleKind::Positive
            | RuleKind::Alpha
            | RuleKind::AlphaNum
            | RuleKind::AlphaDash
            | RuleKind::Email
            | RuleKind::Url
            | RuleKind::Json
            | RuleKind::Date
            | RuleKind::Confirmed => {
                return Err(Error::invalid_parameter(kind, p, "rule takes no parameters"));
            }
        };
        Ok(rule)
    }

    /// The rule for a parameterless kind, `None` for kinds that take parameters.
    fn bare(kind: RuleKind) -> Option<Self> {
        let rule = match kind {
            RuleKind::Required => Self::Required,
            RuleKind::Accepted => Self::Accepted,
            RuleKind::Boolean => Self::Boolean,
            RuleKind::String => Self::String,
            RuleKind::Integer => Self::Integer,
            RuleKind::Numeric => Self::Numeric,
            RuleKind::Positive => Self::Positive,
            RuleKind::Alpha => Self::Alpha,
            RuleKind::AlphaNum => Self::AlphaNum,
            RuleKind::AlphaDash => Self::AlphaDash,
            RuleKind::Email => Self::Email,
            RuleKind::Url => Self::Url,
            RuleKind::Json => Self::Json,
            RuleKind::Date => Self::Date,
            RuleKind::Confirmed => Self::Confirmed,
            RuleKind::RequiredWith
            | RuleKind::RequiredWithout
            | RuleKind::RequiredIf
            | RuleKind::After
            | RuleKind::Before
            | RuleKind::Digits
            | RuleKind::DigitsBetween
            | RuleKind::SizeString
            | RuleKind::SizeNumeric
            | RuleKind::LeastString
            | RuleKind::MostString
            | RuleKind::LeastNumeric
            | RuleKind::MostNumeric
            | RuleKind::BetweenString
            | RuleKind::BetweenNumeric
            | RuleKind::Same
            | RuleKind::Different
            | RuleKind::FoundIn
            | RuleKind::NotIn
            | RuleKind::Regex
            | RuleKind::Exists
            | RuleKind::Unique => return None,
        };
        Some(rule)
    }

    /// A `regex` rule from a pattern that may contain `|` or `:`.
    pub fn regex(pattern: &str) -> Result<Self, Error> {
        Pattern::new(pattern).map(Self::Regex)
    }

    /// A `found_in` rule whose members may contain `,`.
    pub fn found_in<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::FoundIn(values.into_iter().map(Into::into).collect())
    }

    /// A `not_in` rule whose members may contain `,`.
    pub fn not_in<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NotIn(values.into_iter().map(Into::into).collect())
    }
}

impl Rule {
    /// The token form of the rule, or `None` when a parameter holds a
    /// delimiter the string grammar cannot carry: `|` anywhere, or `,` inside
    /// a list member or a field name.
    pub fn to_token(&self) -> Option<String> {
        let plain = |item: &String| !item.contains(',');
        let expressible = match self {
            Self::RequiredWith(items)
            | Self::RequiredWithout(items)
            | Self::FoundIn(items)
            | Self::NotIn(items) => items.iter().all(plain),
            Self::RequiredIf { other, values } => plain(other) && values.iter().all(plain),
            Self::Same(other) | Self::Different(other) => plain(other),
            Self::Exists { column, .. } | Self::Unique { column, .. } => plain(column),
            Self::Required
            | Self::Accepted
            | Self::Boolean
            | Self::String
            | Self::Integer
            | Self::Numeric
            | Self::Positive
            | Self::Alpha
            | Self::AlphaNum
            | Self::AlphaDash
            | Self::Email
            | Self::Url
            | Self::Json
            | Self::Date
            | Self::After(_)
            | Self::Before(_)
            | Self::Digits(_)
            | Self::DigitsBetween { .. }
            | Self::SizeString(_)
            | Self::SizeNumeric(_)
            | Self::LeastString(_)
            | Self::MostString(_)
            | Self::LeastNumeric(_)
            | Self::MostNumeric(_)
            | Self::BetweenString { .. }
            | Self::BetweenNumeric { .. }
            | Self::Confirmed
            | Self::Regex(_) => true,
        };
        let token = self.to_string();
        (expressible && !token.contains('|')).then_some(token)
    }
}

/// Renders the rule back to token form.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match self {
            Self::RequiredWith(others) | Self::RequiredWithout(others) => {
                write!(f, "{name}:{}", others.join(","))
            }
            Self::RequiredIf { other, values } => write!(f, "{name}:{other},{}", values.join(",")),
            Self::After(d) | Self::Before(d) => write!(f, "{name}:{}", d.format("%Y-%m-%d")),
            Self::Digits(n) | Self::SizeString(n) | Self::LeastString(n) | Self::MostString(n) => {
                write!(f, "{name}:{n}")
            }
            Self::SizeNumeric(n) | Self::LeastNumeric(n) | Self::MostNumeric(n) => {
                write!(f, "{name}:{}", display_number(*n))
            }
            Self::DigitsBetween { least, most } | Self::BetweenString { least, most } => {
                write!(f, "{name}:{least},{most}")
            }
            Self::BetweenNumeric { least, most } => {
                write!(f, "{name}:{},{}", display_number(*least), display_number(*most))
            }
            Self::Same(other) | Self::Different(other) => write!(f, "{name}:{other}"),
            Self::FoundIn(values) | Self::NotIn(values) => write!(f, "{name}:{}", values.join(",")),
            Self::Regex(pattern) => write!(f, "{name}:{}", pattern.as_str()),
            Self::Exists { collection, column } | Self::Unique { collection, column } => {
                write!(f, "{name}:{collection},{column}")
            }
            _ => f.write_str(name),
        }
    }
}

/// Parses a full `|`-separated rule string. Empty tokens are skipped.
pub fn parse_rules(rules: &str) -> Result<Vec<Rule>, Error> {
    rules
        .split('|')
        .filter(|token| !token.trim().is_empty())
        .map(Rule::parse)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
