//! Rule specs: the compiled rules of every field, in declaration order.

use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Error;
use crate::rule::{Rule, parse_rules};

/// Field name to its ordered rules.
///
/// All rule strings are compiled when the spec is built, so an unknown rule
/// name or a malformed parameter fails here and never during evaluation.
///
/// # Examples
///
/// ```
/// use mealdesk_validator::RuleSpec;
///
/// let spec = RuleSpec::parse([
///     ("email", "required|email|unique:User,email"),
///     ("password", "required|string|confirmed|least_string:6"),
/// ])
/// .unwrap();
///
/// assert_eq!(spec.len(), 2);
/// assert!(RuleSpec::parse([("name", "required|bogus_rule")]).is_err());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, String>")]
pub struct RuleSpec {
    fields: IndexMap<String, Vec<Rule>>,
}

impl RuleSpec {
    /// Compiles `(field, rule string)` pairs.
    pub fn parse<I, K, V>(fields: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut builder = Self::builder();
        for (field, rules) in fields {
            builder = builder.field(field, rules.as_ref())?;
        }
        Ok(builder.build())
    }

    #[must_use]
    pub fn builder() -> RuleSpecBuilder {
        RuleSpecBuilder::default()
    }

    pub fn get(&self, field: &str) -> Option<&[Rule]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of rules across all fields.
    pub fn rule_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }
}

impl TryFrom<IndexMap<String, String>> for RuleSpec {
    type Error = Error;

    fn try_from(fields: IndexMap<String, String>) -> Result<Self, Self::Error> {
        Self::parse(fields)
    }
}

/// Writes each field's rules back as a rule string.
///
/// Fails for rules built in code whose parameters hold `|`, or `,` inside a
/// list, since the string would not parse back to the same rules.
impl Serialize for RuleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, rules) in self.iter() {
            let tokens = rules
                .iter()
                .map(|rule| {
                    rule.to_token().ok_or_else(|| {
                        S::Error::custom(format!(
                            "rule `{rule}` on field `{field}` has no rule-string form"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            map.serialize_entry(field, &tokens.join("|"))?;
        }
        map.end()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`RuleSpec`] field by field.
///
/// A field declared twice keeps its first position and gains the later rules.
#[derive(Debug, Default)]
#[must_use = "builder methods must be chained or built"]
pub struct RuleSpecBuilder {
    fields: IndexMap<String, Vec<Rule>>,
}

impl RuleSpecBuilder {
    /// Adds a field from a `|`-separated rule string.
    pub fn field(self, name: impl Into<String>, rules: &str) -> Result<Self, Error> {
        let rules = parse_rules(rules)?;
        Ok(self.rules(name, rules))
    }

    /// Adds a field from already constructed rules.
    pub fn rules(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.entry(name.into()).or_default().extend(rules);
        self
    }

    pub fn build(self) -> RuleSpec {
        RuleSpec {
            fields: self.fields,
        }
    }
}
