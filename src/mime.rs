//! MIME value parsing and segment-wise wildcard comparison
//!
//! Parsing is deliberately permissive: any string yields a [`Mime`]. Malformed
//! input simply produces segments that fail to match downstream.

use std::fmt;

/// Wildcard segment accepted in MIME patterns
pub const WILDCARD: &str = "*";

/// A parsed `type/subtype` value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mime {
    kind: String,
    subtype: Option<String>,
    value: String,
}

impl Mime {
    /// Parse a MIME string, splitting on the first `/`.
    ///
    /// Without a `/` the whole trimmed input becomes the type and the
    /// subtype is absent.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.split_once('/') {
            Some((kind, subtype)) => {
                let kind = kind.trim().to_string();
                let subtype = subtype.trim().to_string();
                let value = format!("{kind}/{subtype}");
                Self {
                    kind,
                    subtype: Some(subtype),
                    value,
                }
            }
            None => {
                let kind = s.trim().to_string();
                Self {
                    value: kind.clone(),
                    kind,
                    subtype: None,
                }
            }
        }
    }

    /// Top-level type, e.g. `image`
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Subtype, e.g. `gif`; `None` for a bare type
    #[must_use]
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    /// Canonical `type/subtype` (or bare type) string
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Test `candidate` against `self` used as a pattern.
    ///
    /// Each segment is compared independently; a `*` segment in the pattern
    /// matches any non-empty segment of the candidate.
    #[must_use]
    pub fn matches(&self, candidate: &Self) -> bool {
        segment_matches(&self.kind, &candidate.kind)
            && segment_matches(
                self.subtype.as_deref().unwrap_or_default(),
                candidate.subtype.as_deref().unwrap_or_default(),
            )
    }
}

fn segment_matches(pattern: &str, value: &str) -> bool {
    if pattern == WILDCARD {
        !value.is_empty()
    } else {
        pattern == value
    }
}

impl fmt::Display for Mime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
