//! Process boundary errors

use thiserror::Error;

/// Errors raised when a child process cannot be run to completion.
///
/// A process that starts and exits non-zero is *not* an error; its exit
/// code is returned to the caller instead.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The executable could not be started (not found, not executable, ...)
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A pipeline stage had no program
    #[error("Pipeline stage {index} is empty")]
    EmptyStage { index: usize },

    /// Streaming or waiting on a started process failed
    #[error("I/O error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    #[must_use]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    #[must_use]
    pub fn io(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            program: program.into(),
            source,
        }
    }
}

/// Result type for process operations
pub type Result<T> = std::result::Result<T, ExecError>;
