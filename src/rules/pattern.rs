use std::fmt;

use glob::Pattern as GlobPattern;

use super::error::RuleError;
use crate::mime::Mime;

/// Sentinel key selecting the fallback rule
pub const DEFAULT_SENTINEL: &str = "default";

/// Rule pattern, classified by shape when the rule table is built
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `type/subtype`, either segment may be `*`
    Mime(Mime),
    /// Glob expression matched against the whole classification
    Glob { original: String, spec: GlobPattern },
    /// File extension including the leading `.`
    Extension(String),
    /// The `default` sentinel; never matches during primary matching
    Default,
    /// Any other token, compared verbatim
    Literal(String),
}

impl Pattern {
    /// Classify a trimmed pattern token by its shape.
    ///
    /// Shape checks run in a fixed order: a `/` makes it a MIME pattern,
    /// then glob metacharacters, then a leading `.`, then the sentinel.
    ///
    /// # Errors
    /// * Returns `RuleError::EmptyPattern` if `token` is empty.
    /// * Returns `RuleError::InvalidGlob` if a glob-shaped token fails to parse.
    pub fn parse(token: &str) -> Result<Self, RuleError> {
        if token.is_empty() {
            return Err(RuleError::EmptyPattern {
                key: token.to_string(),
            });
        }
        if token.contains('/') {
            return Ok(Self::Mime(Mime::parse(token)));
        }
        if is_glob_token(token) {
            return GlobPattern::new(token)
                .map(|spec| Self::Glob {
                    original: token.to_string(),
                    spec,
                })
                .map_err(|e| RuleError::glob_parse(token, &e.to_string()));
        }
        if token.starts_with('.') {
            return Ok(Self::Extension(token.to_string()));
        }
        if token == DEFAULT_SENTINEL {
            return Ok(Self::Default);
        }
        Ok(Self::Literal(token.to_string()))
    }

    /// Test a single classification string against this pattern.
    #[must_use]
    pub fn matches(&self, classification: &str) -> bool {
        match self {
            Self::Mime(pattern) => pattern.matches(&Mime::parse(classification)),
            Self::Glob { spec, .. } => spec.matches(classification),
            Self::Extension(ext) | Self::Literal(ext) => ext == classification,
            Self::Default => false,
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    #[must_use]
    pub fn original(&self) -> &str {
        match self {
            Self::Mime(mime) => mime.value(),
            Self::Glob { original, .. } => original,
            Self::Extension(s) | Self::Literal(s) => s,
            Self::Default => DEFAULT_SENTINEL,
        }
    }
}

fn is_glob_token(token: &str) -> bool {
    token.contains('*') || token.contains('?') || token.contains('[')
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.original())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Mime(a), Self::Mime(b)) => a == b,
            (Self::Glob { original: a, .. }, Self::Glob { original: b, .. })
            | (Self::Extension(a), Self::Extension(b))
            | (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Default, Self::Default) => true,
            _ => false,
        }
    }
}

impl Eq for Pattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_detection() {
        assert!(matches!(Pattern::parse("image/*").unwrap(), Pattern::Mime(_)));
        assert!(matches!(Pattern::parse("*.tar.*").unwrap(), Pattern::Glob { .. }));
        assert!(matches!(Pattern::parse(".md").unwrap(), Pattern::Extension(_)));
        assert!(matches!(Pattern::parse("default").unwrap(), Pattern::Default));
        assert!(matches!(Pattern::parse("directory").unwrap(), Pattern::Literal(_)));
    }

    #[test]
    fn test_slash_wins_over_glob() {
        // `*` in a MIME segment is a segment wildcard, not a glob
        let pattern = Pattern::parse("*/gif").unwrap();
        assert!(matches!(pattern, Pattern::Mime(_)));
        assert!(pattern.matches("image/gif"));
        assert!(!pattern.matches("gif"));
    }

    #[test]
    fn test_glob_wins_over_extension() {
        let pattern = Pattern::parse(".m?").unwrap();
        assert!(matches!(pattern, Pattern::Glob { .. }));
        assert!(pattern.matches(".md"));
        assert!(!pattern.matches(".rs"));
    }

    #[test]
    fn test_extension_is_exact() {
        let pattern = Pattern::parse(".md").unwrap();
        assert!(pattern.matches(".md"));
        assert!(!pattern.matches(".MD"));
        assert!(!pattern.matches(".mdx"));
        assert!(!pattern.matches("text/markdown"));
    }

    #[test]
    fn test_default_never_matches() {
        let pattern = Pattern::parse("default").unwrap();
        assert!(pattern.is_default());
        assert!(!pattern.matches("default"));
        assert!(!pattern.matches("text/plain"));
    }

    #[test]
    fn test_invalid_glob_is_error() {
        let err = Pattern::parse("[abc").unwrap_err();
        assert!(matches!(err, RuleError::InvalidGlob { .. }));
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            Pattern::parse("").unwrap_err(),
            RuleError::EmptyPattern { .. }
        ));
    }

    #[test]
    fn test_original_round_trips_text() {
        for token in ["image/gif", "*.log", ".md", "default", "directory"] {
            assert_eq!(Pattern::parse(token).unwrap().original(), token);
        }
    }
}
