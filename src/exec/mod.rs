//! Command execution
//!
//! Viewer commands are `{}`-substituted and handed to the user's shell as
//! `<shell> -c <command>`. The engine does no quoting of its own; the shell
//! parses the resulting line.

mod error;
mod pipeline;

pub use error::{ExecError, Result};
pub use pipeline::{execute_pipeline, run_pipeline_into};

use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{debug, warn};

use crate::rules::PLACEHOLDER;

/// Shell used when neither an override nor `$SHELL` is available
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Exit code reported for a child terminated without one (signal base)
const SIGNAL_EXIT_BASE: i32 = 128;

/// Replace every `{}` in `template` with the target path
#[must_use]
pub fn substitute(template: &str, target: &Path) -> String {
    template.replace(PLACEHOLDER, &target.to_string_lossy())
}

/// Map an exit status to a numeric code, `128 + signal` for signalled children
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }
    1
}

/// Shell interpreter that runs command lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
}

impl Shell {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Pick the first non-empty candidate, else the POSIX fallback.
    ///
    /// Callers pass e.g. an explicit override followed by `$SHELL`.
    #[must_use]
    pub fn resolve<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        candidates
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
            .map_or_else(|| Self::new(FALLBACK_SHELL), Self::new)
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument vector running `command_line` through this shell
    #[must_use]
    pub fn argv(&self, command_line: &str) -> Vec<String> {
        vec![self.program.clone(), "-c".to_string(), command_line.to_string()]
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(FALLBACK_SHELL)
    }
}

/// Output of a captured command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
}

/// Runs substituted command templates through a [`Shell`]
#[derive(Debug, Clone, Default)]
pub struct Executor {
    shell: Shell,
}

impl Executor {
    #[must_use]
    pub const fn new(shell: Shell) -> Self {
        Self { shell }
    }

    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Substitute `target` into `template` and run it with inherited stdio.
    ///
    /// # Errors
    /// Returns `ExecError::Spawn` if the shell cannot be started.
    pub fn execute(&self, template: &str, target: &Path) -> Result<i32> {
        self.run(&substitute(template, target))
    }

    /// Run an already substituted command line with inherited stdio.
    ///
    /// # Errors
    /// Returns `ExecError::Spawn` if the shell cannot be started.
    pub fn run(&self, command_line: &str) -> Result<i32> {
        debug!("running `{command_line}` via {}", self.shell.program);
        let status = Command::new(&self.shell.program)
            .arg("-c")
            .arg(command_line)
            .status()
            .map_err(|e| ExecError::spawn(self.shell.program.clone(), e))?;
        let code = exit_code(status);
        if code != 0 {
            debug!("`{command_line}` exited with {code}");
        }
        Ok(code)
    }

    /// Run a command line and collect its stdout; stderr passes through.
    ///
    /// # Errors
    /// Returns `ExecError` if the shell cannot be started or its output
    /// cannot be read.
    pub fn capture(&self, command_line: &str) -> Result<Captured> {
        let mut buffer = Vec::new();
        let code = run_pipeline_into(&[self.shell.argv(command_line)], &mut buffer)?;
        if code != 0 {
            warn!("`{command_line}` exited with {code}");
        }
        Ok(Captured {
            code,
            stdout: String::from_utf8_lossy(&buffer).into_owned(),
        })
    }
}
