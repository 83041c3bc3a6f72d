//! The closed set of rule names.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Every rule the engine knows, one variant per rule name.
///
/// Rule names are resolved through [`FromStr`]; there is no dynamic lookup
/// beyond this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    Accepted,
    After,
    Alpha,
    AlphaDash,
    AlphaNum,
    Before,
    BetweenNumeric,
    BetweenString,
    Boolean,
    Confirmed,
    Date,
    Different,
    Digits,
    DigitsBetween,
    Email,
    Exists,
    FoundIn,
    Integer,
    Json,
    LeastNumeric,
    LeastString,
    MostNumeric,
    MostString,
    NotIn,
    Numeric,
    Positive,
    Regex,
    Required,
    RequiredIf,
    RequiredWith,
    RequiredWithout,
    Same,
    SizeNumeric,
    SizeString,
    String,
    Unique,
    Url,
}

impl RuleKind {
    /// All rule kinds in name order.
    pub const ALL: [Self; 37] = [
        Self::Accepted,
        Self::After,
        Self::Alpha,
        Self::AlphaDash,
        Self::AlphaNum,
        Self::Before,
        Self::BetweenNumeric,
        Self::BetweenString,
        Self::Boolean,
        Self::Confirmed,
        Self::Date,
        Self::Different,
        Self::Digits,
        Self::DigitsBetween,
        Self::Email,
        Self::Exists,
        Self::FoundIn,
        Self::Integer,
        Self::Json,
        Self::LeastNumeric,
        Self::LeastString,
        Self::MostNumeric,
        Self::MostString,
        Self::NotIn,
        Self::Numeric,
        Self::Positive,
        Self::Regex,
        Self::Required,
        Self::RequiredIf,
        Self::RequiredWith,
        Self::RequiredWithout,
        Self::Same,
        Self::SizeNumeric,
        Self::SizeString,
        Self::String,
        Self::Unique,
        Self::Url,
    ];

    /// The name used in rule strings.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::After => "after",
            Self::Alpha => "alpha",
            Self::AlphaDash => "alpha_dash",
            Self::AlphaNum => "alpha_num",
            Self::Before => "before",
            Self::BetweenNumeric => "between_numeric",
            Self::BetweenString => "between_string",
            Self::Boolean => "boolean",
            Self::Confirmed => "confirmed",
            Self::Date => "date",
            Self::Different => "different",
            Self::Digits => "digits",
            Self::DigitsBetween => "digits_between",
            Self::Email => "email",
            Self::Exists => "exists",
            Self::FoundIn => "found_in",
            Self::Integer => "integer",
            Self::Json => "json",
            Self::LeastNumeric => "least_numeric",
            Self::LeastString => "least_string",
            Self::MostNumeric => "most_numeric",
            Self::MostString => "most_string",
            Self::NotIn => "not_in",
            Self::Numeric => "numeric",
            Self::Positive => "positive",
            Self::Regex => "regex",
            Self::Required => "required",
            Self::RequiredIf => "required_if",
            Self::RequiredWith => "required_with",
            Self::RequiredWithout => "required_without",
            Self::Same => "same",
            Self::SizeNumeric => "size_numeric",
            Self::SizeString => "size_string",
            Self::String => "string",
            Self::Unique => "unique",
            Self::Url => "url",
        }
    }

    /// Presence-class rules run even when their field is absent.
    pub const fn is_presence_class(self) -> bool {
        matches!(
            self,
            Self::Required | Self::RequiredIf | Self::RequiredWith | Self::RequiredWithout
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownRule { name: s.to_owned() })
    }
}
