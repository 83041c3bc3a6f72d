//! Message translation
//!
//! Each rule has one message template containing `:name:` placeholders.
//! Rendering is a single left-to-right pass: substituted values are never
//! scanned again, so a value that happens to contain `:field:` is inserted
//! verbatim. Values that name fields (`:field:` and `:other:`) are humanised
//! by turning underscores into spaces (`menu_id` becomes `menu id`).

use std::borrow::Cow;
use std::collections::HashMap;

use smallvec::SmallVec;

use crate::error::Error;
use crate::rule::RuleKind;

// ============================================================================
// PLACEHOLDERS
// ============================================================================

/// A placeholder a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Field,
    Other,
    Least,
    Most,
    Size,
    Length,
    Date,
    Value,
}

impl Placeholder {
    pub const ALL: [Self; 8] = [
        Self::Field,
        Self::Other,
        Self::Least,
        Self::Most,
        Self::Size,
        Self::Length,
        Self::Date,
        Self::Value,
    ];

    /// Name between the colons, e.g. `field` for `:field:`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Other => "other",
            Self::Least => "least",
            Self::Most => "most",
            Self::Size => "size",
            Self::Length => "length",
            Self::Date => "date",
            Self::Value => "value",
        }
    }

    /// Whether the substituted value is a field name.
    pub const fn names_a_field(self) -> bool {
        matches!(self, Self::Field | Self::Other)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Values for the placeholders of one message.
///
/// Messages carry at most three values, so they stay inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: SmallVec<[(Placeholder, Cow<'static, str>); 4]>,
}

impl Placeholders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholders holding only `:field:`.
    #[must_use]
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new().with(Placeholder::Field, name)
    }

    /// Sets a value, replacing an earlier one for the same placeholder.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: Placeholder, value: impl Into<Cow<'static, str>>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: Placeholder) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

/// The built-in template for a rule.
pub const fn default_template(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Accepted => "The :field: must be accepted.",
        RuleKind::After => "The :field: must be a date after :date:.",
        RuleKind::Alpha => "The :field: may contain only letters.",
        RuleKind::AlphaDash => "The :field: may only contain letters, numbers, and dashes.",
        RuleKind::AlphaNum => "The :field: may contain only letters and numbers.",
        RuleKind::Before => "The :field: must be a date before :date:.",
        RuleKind::BetweenNumeric => "The :field: must be between :least: and :most:.",
        RuleKind::BetweenString => "The :field: must be between :least: and :most: characters.",
        RuleKind::Boolean => "The :field: must be either true or false.",
        RuleKind::Confirmed => "The :field: confirmation does not match.",
        RuleKind::Date => "The :field: is not a valid date.",
        RuleKind::Different => "The :field: and :other: must be different.",
        RuleKind::Digits => "The :field: must be :length: digits.",
        RuleKind::DigitsBetween => "The :field: must be between :least: and :most: digits.",
        RuleKind::Email => "The :field: must be a valid email address.",
        RuleKind::Exists | RuleKind::FoundIn | RuleKind::NotIn => "The selected :field: is invalid.",
        RuleKind::Integer => "The :field: must be an integer.",
        RuleKind::Json => "The :field: must be valid json format.",
        RuleKind::LeastNumeric => "The :field: must be at least :least:.",
        RuleKind::LeastString => "The :field: must be at least :least: characters.",
        RuleKind::MostNumeric => "The :field: must not be greater than :most:.",
        RuleKind::MostString => "The :field: must not be greater than :most: characters.",
        RuleKind::Numeric => "The :field: must be a number.",
        RuleKind::Positive => "The :field: must be a positive number.",
        RuleKind::Regex | RuleKind::Url => "The :field: format is invalid.",
        RuleKind::Required => "The :field: field is required.",
        RuleKind::RequiredIf => "The :field: field is required when :other: is :value:.",
        RuleKind::RequiredWith => "The :field: field is required when :other: is present.",
        RuleKind::RequiredWithout => "The :field: field is required when :other: is not present.",
        RuleKind::Same => "The :field: and :other: must match.",
        RuleKind::SizeNumeric => "The :field: must be :size:.",
        RuleKind::SizeString => "The :field: must be :size: characters.",
        RuleKind::String => "The :field: must be a string.",
        RuleKind::Unique => "The :field: is already taken.",
    }
}

/// Substitutes `placeholders` into `template` in one pass.
///
/// Unknown or unset placeholders are left as written.
///
/// ```
/// use mealdesk_validator::translator::{Placeholder, Placeholders, render};
///
/// let values = Placeholders::field("menu_id").with(Placeholder::Most, "30");
/// assert_eq!(
///     render("The :field: must not be greater than :most:.", &values),
///     "The menu id must not be greater than 30.",
/// );
/// ```
pub fn render(template: &str, placeholders: &Placeholders) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substituted = after.find(':').and_then(|end| {
            let key = Placeholder::from_name(&after[..end])?;
            let value = placeholders.get(key)?;
            Some((key, value, end))
        });

        match substituted {
            Some((key, value, end)) => {
                if key.names_a_field() {
                    out.extend(value.chars().map(|c| if c == '_' { ' ' } else { c }));
                } else {
                    out.push_str(value);
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Renders the built-in message for `kind`.
pub fn translate(kind: RuleKind, placeholders: &Placeholders) -> String {
    render(default_template(kind), placeholders)
}

/// Renders the built-in message for a rule given by name.
pub fn translate_named(rule: &str, placeholders: &Placeholders) -> Result<String, Error> {
    let kind: RuleKind = rule.parse()?;
    Ok(translate(kind, placeholders))
}

// ============================================================================
// TRANSLATOR
// ============================================================================

/// Built-in templates plus configured overrides.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    overrides: HashMap<RuleKind, String>,
}

impl Translator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the templates of the named rules.
    ///
    /// Fails with [`Error::UnknownRule`] if a key names no rule.
    pub fn with_overrides<I, K, V>(overrides: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let overrides = overrides
            .into_iter()
            .map(|(rule, template)| Ok((rule.as_ref().parse::<RuleKind>()?, template.into())))
            .collect::<Result<_, Error>>()?;
        Ok(Self { overrides })
    }

    pub fn template(&self, kind: RuleKind) -> &str {
        self.overrides
            .get(&kind)
            .map_or_else(|| default_template(kind), String::as_str)
    }

    pub fn translate(&self, kind: RuleKind, placeholders: &Placeholders) -> String {
        render(self.template(kind), placeholders)
    }
}
