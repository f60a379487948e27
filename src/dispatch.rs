//! Dispatch orchestration: classify, match, then execute.
//!
//! The flow is linear:
//! `classify -> match -> (execute matched | execute default | no preview)`.
//! Classification failures abort the dispatch; a missing rule is a normal
//! outcome reported with [`NO_HANDLER_EXIT`].

use std::io::{self, Write};
use std::path::Path;

use log::debug;

use crate::PrevueError;
use crate::classify::Classifier;
use crate::config::RuleDocument;
use crate::exec::{self, Executor};
use crate::matcher::{self, Match};
use crate::output::OutputWriter;
use crate::rules::RuleTable;
use crate::target::Target;

/// Exit code when no rule and no `default` rule matched
pub const NO_HANDLER_EXIT: i32 = 3;

/// Whether the selected command is run or only shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Execute,
    Explain,
}

/// Terminal state of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The selected command ran and exited with `code`
    Executed {
        pattern: String,
        command: String,
        code: i32,
    },
    /// Explain mode: the command that would have run
    Explained {
        pattern: String,
        command: String,
        classifications: Vec<String>,
    },
    /// Neither a rule nor a `default` rule matched
    NoPreview {
        target: Target,
        classifications: Vec<String>,
    },
}

impl Outcome {
    /// Process exit code for this outcome
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Executed { code, .. } => *code,
            Self::Explained { .. } => 0,
            Self::NoPreview { .. } => NO_HANDLER_EXIT,
        }
    }

    /// Render user-facing diagnostics for this outcome.
    ///
    /// Executed outcomes print nothing; the viewer's own output is the preview.
    pub fn report(&self, out: &dyn OutputWriter) {
        match self {
            Self::Executed { .. } => {}
            Self::Explained {
                pattern,
                command,
                classifications,
            } => {
                out.info(&format!("classified as: {}", classifications.join(", ")));
                out.info(&format!("matched rule: {pattern}"));
                out.write(command);
            }
            Self::NoPreview {
                target,
                classifications,
            } => {
                out.warning(&format!(
                    "No preview available for {target} (classified as: {})",
                    describe(classifications)
                ));
            }
        }
    }
}

/// `"<ext>: <mime>"` line shown above a preview when headers are enabled
#[must_use]
pub fn header_line(target: &Target, classifications: &[String]) -> String {
    format!(
        "{}: {}",
        target.extension(),
        classifications.first().map_or("", String::as_str)
    )
}

fn print_header(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()
}

fn describe(classifications: &[String]) -> String {
    if classifications.is_empty() {
        "nothing".to_string()
    } else {
        classifications.join(", ")
    }
}

/// Classifier, rule table and executor for one invocation
#[derive(Debug, Clone)]
pub struct Dispatcher {
    classifier: Classifier,
    rules: RuleTable,
    executor: Executor,
    header: bool,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(classifier: Classifier, rules: RuleTable, executor: Executor) -> Self {
        Self {
            classifier,
            rules,
            executor,
            header: false,
        }
    }

    /// Print [`header_line`] to stdout before running the selected command
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    #[must_use]
    pub fn from_document(document: RuleDocument, executor: Executor) -> Self {
        Self::new(document.classifier, document.rules, executor)
    }

    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Resolve `path` and dispatch it.
    ///
    /// # Errors
    /// Returns `PrevueError::Io` if the path cannot be resolved, plus any
    /// error from [`Self::dispatch_target`].
    pub fn dispatch(&self, path: &Path, mode: Mode) -> Result<Outcome, PrevueError> {
        let target = Target::resolve(path)?;
        debug!("resolved {} to {target}", path.display());
        self.dispatch_target(&target, mode)
    }

    /// Classify, match and execute (or explain) for an already resolved target.
    ///
    /// # Errors
    /// Returns `PrevueError::Classify` if the target cannot be classified,
    /// `PrevueError::Io` if the header cannot be written and
    /// `PrevueError::Exec` if the selected command cannot be started.
    pub fn dispatch_target(&self, target: &Target, mode: Mode) -> Result<Outcome, PrevueError> {
        let classifications = self.classifier.classify(target, &self.executor)?;
        debug!("{target} classified as {classifications:?}");

        let selected = matcher::find_match(classifications.as_slice(), &self.rules)
            .or_else(|| matcher::fallback(&self.rules));

        let Some(Match {
            rule,
            classification,
        }) = selected
        else {
            debug!("no rule for {target}");
            return Ok(Outcome::NoPreview {
                target: target.clone(),
                classifications,
            });
        };

        let pattern = rule.pattern().original().to_string();
        match classification {
            Some(c) => debug!("rule '{pattern}' matched classification '{c}'"),
            None => debug!("falling back to '{pattern}' rule"),
        }

        let command = exec::substitute(rule.command(), target.path());
        match mode {
            Mode::Explain => Ok(Outcome::Explained {
                pattern,
                command,
                classifications,
            }),
            Mode::Execute => {
                if self.header {
                    print_header(&header_line(target, &classifications))?;
                }
                let code = self.executor.run(&command)?;
                Ok(Outcome::Executed {
                    pattern,
                    command,
                    code,
                })
            }
        }
    }
}
