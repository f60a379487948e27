//! First-match rule selection
//!
//! A linear scan over rules in declaration order; for each rule every
//! classification is tried. The first rule matching any classification
//! wins. There is no specificity ranking.

use crate::rules::{Rule, RuleTable};

/// A selected rule together with the classification that selected it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'r, 'c> {
    pub rule: &'r Rule,
    /// `None` when the rule was picked as the `default` fallback
    pub classification: Option<&'c str>,
}

/// Return the first rule whose pattern matches any classification.
///
/// `default` rules are skipped here; see [`fallback`].
#[must_use]
pub fn find_match<'r, 'c, S: AsRef<str>>(
    classifications: &'c [S],
    rules: &'r RuleTable,
) -> Option<Match<'r, 'c>> {
    rules.iter().find_map(|rule| {
        classifications
            .iter()
            .map(AsRef::as_ref)
            .find(|c| rule.pattern().matches(c))
            .map(|c| Match {
                rule,
                classification: Some(c),
            })
    })
}

/// Fallback pass: the first `default` rule, if any.
#[must_use]
pub fn fallback(rules: &RuleTable) -> Option<Match<'_, 'static>> {
    rules.default_rule().map(|rule| Match {
        rule,
        classification: None,
    })
}
