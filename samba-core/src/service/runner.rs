use std::process::Command;

use itertools::Itertools;
use log::{debug, info};

use crate::error::RunnerError;

/// Spawn a command line through some backend, optionally waiting for it.
pub trait Spawn: Sync {
    /// Runs `command_line` to completion and returns its exit code.
    fn run(&self, command_line: &str) -> Result<i32, RunnerError>;

    /// Starts `command_line` and returns immediately. The child is not tracked.
    fn detach(&self, command_line: &str) -> Result<(), RunnerError>;
}

/// Runs commands through the platform shell (`sh -c` or `cmd /C`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Shell;

impl Spawn for Shell {
    fn run(&self, command_line: &str) -> Result<i32, RunnerError> {
        debug!("Executing: {command_line}");
        let status = shell_command(command_line)
            .status()
            .map_err(|source| RunnerError::Spawn {
                command: command_line.to_owned(),
                source,
            })?;

        status
            .code()
            .ok_or_else(|| RunnerError::Terminated(command_line.to_owned()))
    }

    fn detach(&self, command_line: &str) -> Result<(), RunnerError> {
        debug!("Executing in background: {command_line}");
        shell_command(command_line)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: command_line.to_owned(),
                source,
            })?;

        Ok(())
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let mut command = Command::new("cmd");
    command.arg("/C").raw_arg(command_line);
    command
}

/// Logs what would run and never creates a process.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRun;

impl Spawn for DryRun {
    fn run(&self, command_line: &str) -> Result<i32, RunnerError> {
        info!("Would execute: {command_line}");
        Ok(0)
    }

    fn detach(&self, command_line: &str) -> Result<(), RunnerError> {
        info!("Would execute in background: {command_line}");
        Ok(())
    }
}

/// Accumulates a command and its arguments, then hands the joined command
/// line to a [`Spawn`] backend.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Runner {
    tokens: Vec<String>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tokens
            .extend(tokens.into_iter().map(|token| token.as_ref().to_owned()));
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces, in insertion order.
    pub fn command_line(&self) -> String {
        self.tokens.iter().join(" ")
    }

    pub fn run_sync(&self, spawner: &dyn Spawn) -> Result<i32, RunnerError> {
        spawner.run(&self.checked_command_line()?)
    }

    /// The child's exit status is never observed on this path.
    pub fn run_async(&self, spawner: &dyn Spawn) -> Result<(), RunnerError> {
        spawner.detach(&self.checked_command_line()?)
    }

    pub fn reset(&mut self) {
        self.tokens.clear();
    }

    fn checked_command_line(&self) -> Result<String, RunnerError> {
        if self.is_empty() {
            return Err(RunnerError::EmptyCommand);
        }
        Ok(self.command_line())
    }
}

/// Wraps `value` in double quotes, escaping `"` and `\`.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
