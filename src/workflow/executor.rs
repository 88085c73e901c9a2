//! Subprocess dispatch for workflow steps.

use super::runner::{Invocation, PlannedStep, StepExecutor};
use crate::error::{AtmosError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Runs steps as child processes in the current working directory.
///
/// Children inherit stdio, so their output streams straight to the terminal.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    /// Program used for `atmos` steps.
    program: PathBuf,
    /// Extra environment for every child.
    env: Vec<(String, String)>,
}

impl ProcessExecutor {
    /// Executor that re-invokes the running binary for `atmos` steps.
    pub fn new() -> Self {
        let program = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("atmos"));
        Self::with_program(program)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.push((name.to_string(), value.to_string()));
        self
    }

    fn command_for(&self, invocation: &Invocation) -> Command {
        let mut command = match invocation {
            Invocation::Shell { command: text } => shell_command(text),
            Invocation::Atmos { args } => {
                let mut command = Command::new(&self.program);
                command.args(args);
                command
            }
        };
        command.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        command
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl StepExecutor for ProcessExecutor {
    fn execute(&mut self, step: &PlannedStep) -> Result<()> {
        let command_line = step.invocation.display();
        info!("Running step '{}': {}", step.name, command_line);

        let status = self
            .command_for(&step.invocation)
            .status()
            .map_err(|e| AtmosError::StepExecution {
                step: step.name.clone(),
                command: command_line.clone(),
                message: format!("failed to start: {}", e),
            })?;

        if status.success() {
            return Ok(());
        }

        let message = match status.code() {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        Err(AtmosError::StepExecution {
            step: step.name.clone(),
            command: command_line,
            message,
        })
    }
}

#[cfg(unix)]
fn shell_command(text: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(text);
    command
}

#[cfg(windows)]
fn shell_command(text: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(text);
    command
}
