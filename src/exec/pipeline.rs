//! Multi-stage process pipelines
//!
//! Each stage's stdout feeds the next stage's stdin; the final stage's
//! stdout is copied into the caller's writer. Every started stage is reaped
//! before returning, on success and on failure.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::{Child, ChildStdout, Command, Stdio};

use log::debug;

use super::error::{ExecError, Result};
use super::exit_code;

/// Run `stages` as a pipeline with the final output going to stdout.
///
/// Returns the exit code of the last stage. An empty stage list is a no-op
/// returning `0`.
///
/// # Errors
/// Returns `ExecError::Spawn` if any stage fails to start, `ExecError::EmptyStage`
/// for a stage with no program, and `ExecError::Io` if streaming or reaping fails.
pub fn execute_pipeline<S: AsRef<OsStr>>(stages: &[Vec<S>]) -> Result<i32> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let code = run_pipeline_into(stages, &mut handle)?;
    handle
        .flush()
        .map_err(|e| ExecError::io("stdout", e))?;
    Ok(code)
}

/// Run `stages` as a pipeline, copying the final stage's stdout into `out`.
///
/// # Errors
/// See [`execute_pipeline`].
pub fn run_pipeline_into<S, W>(stages: &[Vec<S>], out: &mut W) -> Result<i32>
where
    S: AsRef<OsStr>,
    W: Write + ?Sized,
{
    let mut running: Vec<(String, Child)> = Vec::with_capacity(stages.len());
    let mut upstream: Option<ChildStdout> = None;

    for (index, argv) in stages.iter().enumerate() {
        let Some((program, args)) = argv.split_first() else {
            drop(upstream.take());
            reap_all(&mut running);
            return Err(ExecError::EmptyStage { index });
        };
        let name = program.as_ref().to_string_lossy().into_owned();

        let mut command = Command::new(program);
        command
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        if let Some(previous) = upstream.take() {
            command.stdin(Stdio::from(previous));
        }

        match command.spawn() {
            Ok(mut child) => {
                debug!("pipeline stage {index} started: {name} (pid {})", child.id());
                upstream = child.stdout.take();
                running.push((name, child));
            }
            Err(source) => {
                // Close the previous stage's stdout so earlier stages see a
                // broken pipe instead of blocking on a full one.
                drop(command);
                reap_all(&mut running);
                return Err(ExecError::spawn(name, source));
            }
        }
    }

    let copied = match upstream {
        Some(mut final_stdout) => io::copy(&mut final_stdout, out).map(drop),
        None => Ok(()),
    };

    let mut last_code = 0;
    let mut wait_error = None;
    for (name, child) in &mut running {
        match child.wait() {
            Ok(status) => last_code = exit_code(status),
            Err(e) => {
                wait_error.get_or_insert(ExecError::io(name.clone(), e));
            }
        }
    }

    if let Some(err) = wait_error {
        return Err(err);
    }
    if let Err(e) = copied {
        let name = running
            .last()
            .map_or_else(String::new, |(name, _)| name.clone());
        return Err(ExecError::io(name, e));
    }
    Ok(last_code)
}

fn reap_all(running: &mut [(String, Child)]) {
    for (name, child) in running.iter_mut() {
        if let Err(e) = child.wait() {
            debug!("failed to reap pipeline stage {name}: {e}");
        }
    }
}
