//! Target classification
//!
//! A [`Classifier`] turns a resolved [`Target`] into an ordered list of
//! classification strings for the matcher. Strategies:
//! - `Extension`: the path's extension
//! - `Probe`: MIME type reported by an external `file`-style probe
//! - `Content`: MIME type sniffed from the first bytes of the file
//! - `Commands`: user shell snippets, one classification per output line
//!
//! The builtin strategies report directories as [`DIRECTORY_MIME`] without
//! looking at their content.

pub mod sniff;

use std::io;
use std::str::FromStr;

use log::{debug, warn};
use rayon::prelude::*;
use thiserror::Error;

use crate::exec::{self, ExecError, Executor};
use crate::mime::Mime;
use crate::target::Target;

/// Classification reported for directories
pub const DIRECTORY_MIME: &str = "inode/directory";

/// Default MIME probe; the target path is appended after `--`
pub const DEFAULT_PROBE: [&str; 3] = ["file", "--brief", "--mime-type"];

/// Errors that make classification impossible
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Target could not be stat'd or read
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    /// A probe or classifier command could not be run
    #[error(transparent)]
    Process(#[from] ExecError),
}

impl ClassifyError {
    fn io(target: &Target, source: io::Error) -> Self {
        Self::Io {
            path: target.to_string(),
            source,
        }
    }
}

/// Classification strategy, selected by configuration shape
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Classifier {
    Extension,
    /// External probe argv; the target path is appended
    Probe(Vec<String>),
    #[default]
    Content,
    /// Shell snippets with `{}` placeholders
    Commands(Vec<String>),
}

impl Classifier {
    /// Probe strategy using the stock `file --brief --mime-type` invocation
    #[must_use]
    pub fn probe() -> Self {
        Self::Probe(DEFAULT_PROBE.iter().map(ToString::to_string).collect())
    }

    /// Produce classifications for `target`, in strategy order.
    ///
    /// # Errors
    /// Returns `ClassifyError::Io` if the target cannot be inspected and
    /// `ClassifyError::Process` if a probe or classifier command cannot start.
    pub fn classify(
        &self,
        target: &Target,
        executor: &Executor,
    ) -> Result<Vec<String>, ClassifyError> {
        match self {
            Self::Commands(snippets) => run_commands(snippets, target, executor),
            _ if target.is_dir().map_err(|e| ClassifyError::io(target, e))? => {
                debug!("{target} is a directory");
                Ok(vec![DIRECTORY_MIME.to_string()])
            }
            Self::Extension => Ok(vec![target.extension()]),
            Self::Probe(argv) => probe(argv, target),
            Self::Content => sniff_content(target),
        }
    }
}

fn sniff_content(target: &Target) -> Result<Vec<String>, ClassifyError> {
    let sniffed = sniff::sniff_path(target.path()).map_err(|e| ClassifyError::io(target, e))?;
    let mut classifications = vec![sniffed.mime.clone()];
    if let Some(marker) = &sniffed.marker {
        classifications.push(marker.clone());
    }
    let extension = target.extension();
    if !extension.is_empty() && sniffed.marker.as_ref() != Some(&extension) {
        classifications.push(extension);
    }
    if sniffed.binary && sniffed.mime != sniff::BINARY_MIME {
        classifications.push(sniff::BINARY_MIME.to_string());
    }
    Ok(classifications)
}

fn probe(argv: &[String], target: &Target) -> Result<Vec<String>, ClassifyError> {
    let mut stage: Vec<String> = argv.to_vec();
    stage.push("--".to_string());
    stage.push(target.path().to_string_lossy().into_owned());

    let mut output = Vec::new();
    let code = exec::run_pipeline_into(&[stage], &mut output)?;
    if code != 0 {
        warn!("MIME probe exited with {code} for {target}");
    }

    let text = String::from_utf8_lossy(&output);
    Ok(text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| vec![Mime::parse(line).value().to_string()])
        .unwrap_or_default())
}

fn run_commands(
    snippets: &[String],
    target: &Target,
    executor: &Executor,
) -> Result<Vec<String>, ClassifyError> {
    // All snippets finish before any result is used; collect keeps
    // declaration order regardless of completion order.
    let outputs = snippets
        .par_iter()
        .map(|snippet| executor.capture(&exec::substitute(snippet, target.path())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(outputs
        .iter()
        .flat_map(|captured| captured.stdout.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

impl FromStr for Classifier {
    type Err = String;

    /// Parse a builtin strategy name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extension" | "ext" => Ok(Self::Extension),
            "mime" | "probe" => Ok(Self::probe()),
            "content" | "magic" => Ok(Self::Content),
            other => Err(format!(
                "unknown classifier '{other}' (expected extension, probe or content)"
            )),
        }
    }
}
