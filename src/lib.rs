//! Prevue - rule-driven file previews for terminal pickers
//!
//! A target path is classified (by extension, sniffed or probed MIME type,
//! or user classifier commands), matched against an ordered rule table, and
//! the first matching rule's command is run through the user's shell with
//! `{}` replaced by the target's absolute path.

use std::path::PathBuf;
use thiserror::Error;

pub mod classify;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod exec;
pub mod matcher;
pub mod mime;
pub mod output;
pub mod rules;
pub mod target;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PrevueError {
    /// Malformed rule file
    #[error("Configuration error in {}: {source}", path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: rules::RuleError,
    },
    /// Runtime settings could not be assembled
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),
    /// Target or configuration could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Target could not be classified
    #[error("Classification failed: {0}")]
    Classify(#[from] classify::ClassifyError),
    /// A command could not be started
    #[error("{0}")]
    Exec(#[from] exec::ExecError),
    /// Invalid command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Exit code for fatal errors
pub const FATAL_EXIT: i32 = 1;
