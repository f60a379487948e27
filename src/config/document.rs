//! Rule file parsing and shape detection
//!
//! Two document shapes are accepted:
//!
//! ```yaml
//! # flat: every entry is a viewer rule
//! ".md": mdcat {}
//! default: bat {}
//! ```
//!
//! ```yaml
//! # structured
//! classifier: content          # or `classifiers: [<shell snippet>, ...]`
//! viewers:                     # alias: file_types
//!   "image/*": timg {}
//! ```

use serde_yaml::{Mapping, Value};

use crate::classify::Classifier;
use crate::rules::{RuleError, RuleTable};

const VIEWERS_KEYS: [&str; 2] = ["viewers", "file_types"];
const CLASSIFIER_KEY: &str = "classifier";
const CLASSIFIERS_KEY: &str = "classifiers";

/// Untyped configuration value, validated once at load time
#[derive(Debug, Clone, PartialEq)]
pub enum RawConfigValue {
    String(String),
    List(Vec<String>),
    Mapping(Mapping),
}

impl RawConfigValue {
    /// Narrow a YAML value to one of the supported shapes.
    ///
    /// # Errors
    /// Returns `RuleError::InvalidShape` for numbers, booleans, nulls, nested
    /// lists and lists containing non-strings.
    pub fn from_yaml(key: &str, value: Value) -> Result<Self, RuleError> {
        match value {
            Value::String(s) => Ok(Self::String(s)),
            Value::Mapping(m) => Ok(Self::Mapping(m)),
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(RuleError::shape(format!(
                        "'{key}' must be a list of strings"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            _ => Err(RuleError::shape(format!(
                "'{key}' must be a string, a list of strings or a mapping"
            ))),
        }
    }
}

/// Classifier strategy plus viewer rules, as loaded from a rule file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDocument {
    pub classifier: Classifier,
    pub rules: RuleTable,
}

impl RuleDocument {
    /// Parse YAML text into a rule document.
    ///
    /// # Errors
    /// Returns `RuleError` for YAML syntax errors, unexpected shapes and
    /// non-string rule keys or commands.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        if is_blank(text) {
            return Ok(Self::default());
        }
        match serde_yaml::from_str::<Value>(text)? {
            Value::Null => Ok(Self::default()),
            Value::Mapping(mapping) if is_structured(&mapping) => Self::from_structured(mapping),
            Value::Mapping(mapping) => Ok(Self {
                classifier: Classifier::default(),
                rules: RuleTable::from_mapping(&mapping)?,
            }),
            _ => Err(RuleError::shape("top level must be a mapping")),
        }
    }

    fn from_structured(mapping: Mapping) -> Result<Self, RuleError> {
        let mut rules: Option<RuleTable> = None;
        let mut classifier: Option<Classifier> = None;

        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(RuleError::NonStringKey {
                    key: format!("{key:?}"),
                });
            };
            let raw = RawConfigValue::from_yaml(&key, value)?;

            match (key.as_str(), raw) {
                (name, RawConfigValue::Mapping(viewers)) if VIEWERS_KEYS.contains(&name) => {
                    if rules.is_some() {
                        return Err(RuleError::shape(
                            "only one of 'viewers' and 'file_types' may be given",
                        ));
                    }
                    rules = Some(RuleTable::from_mapping(&viewers)?);
                }
                (CLASSIFIER_KEY, RawConfigValue::String(name)) => {
                    let parsed = name.parse::<Classifier>().map_err(RuleError::shape)?;
                    set_classifier(&mut classifier, parsed)?;
                }
                (CLASSIFIERS_KEY, RawConfigValue::List(snippets)) => {
                    set_classifier(&mut classifier, Classifier::Commands(snippets))?;
                }
                (name, _) if is_known_key(name) => {
                    return Err(RuleError::shape(format!("'{name}' has the wrong type")));
                }
                (name, _) => {
                    return Err(RuleError::shape(format!("unknown key '{name}'")));
                }
            }
        }

        Ok(Self {
            classifier: classifier.unwrap_or_default(),
            rules: rules.unwrap_or_default(),
        })
    }
}

fn set_classifier(slot: &mut Option<Classifier>, classifier: Classifier) -> Result<(), RuleError> {
    if slot.replace(classifier).is_some() {
        return Err(RuleError::shape(
            "only one of 'classifier' and 'classifiers' may be given",
        ));
    }
    Ok(())
}

fn is_known_key(name: &str) -> bool {
    VIEWERS_KEYS.contains(&name) || name == CLASSIFIER_KEY || name == CLASSIFIERS_KEY
}

fn is_blank(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| line.is_empty() || line.starts_with('#'))
}

/// Structured documents are recognised by any of their reserved keys
fn is_structured(mapping: &Mapping) -> bool {
    mapping
        .keys()
        .any(|key| key.as_str().is_some_and(is_known_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(doc: &RuleDocument) -> Vec<(&str, &str)> {
        doc.rules
            .iter()
            .map(|r| (r.pattern().original(), r.command()))
            .collect()
    }

    #[test]
    fn test_flat_document() {
        let doc = RuleDocument::parse(
            "\".md, .markdown\": mdcat {}\n\"image/*\": timg {}\ndefault: bat {}\n",
        )
        .unwrap();
        assert_eq!(doc.classifier, Classifier::Content);
        assert_eq!(
            commands(&doc),
            vec![
                (".md", "mdcat {}"),
                (".markdown", "mdcat {}"),
                ("image/*", "timg {}"),
                ("default", "bat {}"),
            ]
        );
    }

    #[test]
    fn test_structured_with_builtin_classifier() {
        let doc = RuleDocument::parse(
            "classifier: extension\nviewers:\n  .rs: bat {}\n  default: cat {}\n",
        )
        .unwrap();
        assert_eq!(doc.classifier, Classifier::Extension);
        assert_eq!(commands(&doc), vec![(".rs", "bat {}"), ("default", "cat {}")]);
    }

    #[test]
    fn test_structured_with_command_classifiers() {
        let doc = RuleDocument::parse(
            "classifiers:\n  - file -b --mime-type {}\n  - basename {}\nfile_types:\n  text/*: bat {}\n",
        )
        .unwrap();
        assert_eq!(
            doc.classifier,
            Classifier::Commands(vec![
                "file -b --mime-type {}".to_string(),
                "basename {}".to_string()
            ])
        );
        assert_eq!(commands(&doc), vec![("text/*", "bat {}")]);
    }

    #[test]
    fn test_empty_document() {
        let doc = RuleDocument::parse("").unwrap();
        assert!(doc.rules.is_empty());
        let doc = RuleDocument::parse("# only comments\n").unwrap();
        assert!(doc.rules.is_empty());
    }

    #[test]
    fn test_flat_non_string_value_is_error() {
        let err = RuleDocument::parse(".md: 3\n").unwrap_err();
        assert!(matches!(err, RuleError::NonStringValue { .. }));
    }

    #[test]
    fn test_structured_non_string_command_is_error() {
        let err = RuleDocument::parse("viewers:\n  .md:\n    nested: x\n").unwrap_err();
        assert!(matches!(err, RuleError::NonStringValue { .. }));
    }

    #[test]
    fn test_conflicting_classifiers_is_error() {
        let err = RuleDocument::parse(
            "classifier: content\nclassifiers:\n  - basename {}\nviewers: {}\n",
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::InvalidShape { .. }));
    }

    #[test]
    fn test_unknown_classifier_name_is_error() {
        let err = RuleDocument::parse("classifier: telepathy\nviewers: {}\n").unwrap_err();
        match err {
            RuleError::InvalidShape { detail } => assert!(detail.contains("telepathy")),
            other => panic!("Expected InvalidShape, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_structured_key_is_error() {
        let err = RuleDocument::parse("viewers: {}\nviewer: {}\n").unwrap_err();
        assert!(matches!(err, RuleError::InvalidShape { .. }));
    }

    #[test]
    fn test_non_string_classifier_snippet_is_error() {
        let err = RuleDocument::parse("classifiers: [1, 2]\nviewers: {}\n").unwrap_err();
        assert!(matches!(err, RuleError::InvalidShape { .. }));
    }

    #[test]
    fn test_top_level_list_is_error() {
        let err = RuleDocument::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, RuleError::InvalidShape { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = RuleDocument::parse("viewers: [unclosed\n").unwrap_err();
        assert!(matches!(err, RuleError::Yaml(_)));
    }

    #[test]
    fn test_embedded_default_template_parses() {
        let doc = RuleDocument::parse(crate::config::DEFAULT_TEMPLATE).unwrap();
        assert_eq!(doc.classifier, Classifier::Content);
        assert!(doc.rules.default_rule().is_some());
        assert!(doc.rules.len() >= 8);
    }
}
