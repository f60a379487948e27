//! Rule table - ordered (pattern, command) pairs built from configuration.
//!
//! Rules are immutable once built. Declaration order is the only tie-break
//! the matcher uses, so the table keeps it exactly as configured, including
//! the order of comma-separated tokens inside one key.

pub mod error;
pub mod pattern;

pub use error::RuleError;
pub use pattern::{DEFAULT_SENTINEL, Pattern};

use serde_yaml::{Mapping, Value};

/// Placeholder replaced by the target path in command templates
pub const PLACEHOLDER: &str = "{}";

/// A single pattern bound to a command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: Pattern,
    command: String,
}

impl Rule {
    #[must_use]
    pub const fn new(pattern: Pattern, command: String) -> Self {
        Self { pattern, command }
    }

    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Command template, still containing any `{}` placeholders
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Ordered rule list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from ordered `(key, command)` pairs.
    ///
    /// Every key is split on `,`; each trimmed token becomes its own rule
    /// sharing the pair's command.
    ///
    /// # Errors
    /// Returns `RuleError` if a token is empty or fails to parse as a pattern.
    pub fn build<I, K, C>(pairs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (K, C)>,
        K: AsRef<str>,
        C: Into<String>,
    {
        let mut rules = Vec::new();
        for (key, command) in pairs {
            let key = key.as_ref();
            let command = command.into();
            for token in key.split(',').map(str::trim) {
                if token.is_empty() {
                    return Err(RuleError::EmptyPattern {
                        key: key.to_string(),
                    });
                }
                rules.push(Rule::new(Pattern::parse(token)?, command.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Build a table from a YAML mapping, in document order.
    ///
    /// # Errors
    /// Returns `RuleError::NonStringKey` / `RuleError::NonStringValue` when an
    /// entry is not a string-to-string pair, plus any error from [`Self::build`].
    pub fn from_mapping(mapping: &Mapping) -> Result<Self, RuleError> {
        let mut pairs = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(RuleError::NonStringKey {
                    key: describe(key),
                });
            };
            let Value::String(command) = value else {
                return Err(RuleError::NonStringValue { key: key.clone() });
            };
            pairs.push((key.as_str(), command.as_str()));
        }
        Self::build(pairs)
    }

    /// Rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose pattern is the `default` sentinel
    #[must_use]
    pub fn default_rule(&self) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.pattern.is_default())
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{value:?}"))
}
