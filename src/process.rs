//! External command execution.
//!
//! Commands run one at a time with stdio inherited, so their output streams
//! straight to the invoking terminal.

use crate::error::{PublishError, Result};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Program plus arguments for one build step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCommand {
    /// Executable name or path
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
}

impl StepCommand {
    /// Build from a program and arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line on whitespace. `None` when there is no program.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs build step commands to completion.
pub trait CommandRunner {
    /// Run `command` in `cwd`. `step` names the pipeline step for error reporting.
    fn run(
        &self,
        step: &str,
        command: &StepCommand,
        cwd: &Path,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Spawns real processes
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// Runner with an optional per-command timeout
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn resolve_program(step: &str, command: &StepCommand, cwd: &Path) -> Result<PathBuf> {
        which::which_in(&command.program, std::env::var_os("PATH"), cwd).map_err(|e| {
            PublishError::step_failed(
                step,
                &command.to_string(),
                format!("cannot find '{}': {}", command.program, e),
            )
            .into()
        })
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, step: &str, command: &StepCommand, cwd: &Path) -> Result<()> {
        let line = command.to_string();
        let program = Self::resolve_program(step, command, cwd)?;
        log::debug!("{} resolved to {}", command.program, program.display());

        let mut child = Command::new(&program)
            .args(&command.args)
            .current_dir(cwd)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PublishError::step_failed(step, &line, e.to_string()))?;

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(PublishError::step_timed_out(step, &line, limit).into());
                }
            },
            None => child.wait().await,
        }
        .map_err(|e| PublishError::step_failed(step, &line, e.to_string()))?;

        if !status.success() {
            return Err(PublishError::step_failed(step, &line, status.to_string()).into());
        }
        Ok(())
    }
}
