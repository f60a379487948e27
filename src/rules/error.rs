use thiserror::Error;

/// Errors produced while turning configuration into a rule table
#[derive(Debug, Error)]
pub enum RuleError {
    /// A mapping key was not a string
    #[error("Rule key {key} is not a string")]
    NonStringKey { key: String },
    /// A mapping value was not a string
    #[error("Command for rule '{key}' is not a string")]
    NonStringValue { key: String },
    /// A comma-separated key produced an empty token
    #[error("Empty pattern in rule key '{key}'")]
    EmptyPattern { key: String },
    /// Glob failed to parse
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },
    /// The document has a shape the loader does not understand
    #[error("Invalid configuration: {detail}")]
    InvalidShape { detail: String },
    /// YAML syntax error
    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RuleError {
    #[must_use]
    pub fn glob_parse(pattern: &str, reason: &str) -> Self {
        Self::InvalidGlob {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn shape<S: Into<String>>(detail: S) -> Self {
        Self::InvalidShape {
            detail: detail.into(),
        }
    }
}
