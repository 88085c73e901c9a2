//! Workflow execution.
//!
//! Steps run strictly in order and the first failure aborts the run. Every
//! step is announced before it is dispatched; a dry run produces the same
//! announcements and skips only the dispatch.

use super::model::WorkflowDefinition;
use super::steps::{StepType, effective_stack, normalize_step_names, start_index};
use crate::error::{AtmosError, Result};
use std::io::Write;
use std::path::Path;

/// Per-run settings taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    /// `-s/--stack`; beats workflow and step stacks.
    pub command_line_stack: String,
    /// `--from-step`; empty runs every step.
    pub from_step: String,
}

/// What a step dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Command text for the platform shell, unmodified.
    Shell { command: String },
    /// Arguments for a re-invocation of atmos, `-s <stack>` included.
    Atmos { args: Vec<String> },
}

impl Invocation {
    /// Human-readable command line.
    pub fn display(&self) -> String {
        match self {
            Invocation::Shell { command } => command.clone(),
            Invocation::Atmos { args } => {
                shell_words::join(std::iter::once("atmos").chain(args.iter().map(String::as_str)))
            }
        }
    }
}

/// A step ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub name: String,
    pub invocation: Invocation,
    /// Effective stack for `atmos` steps.
    pub stack: Option<String>,
}

/// Runs planned steps.
pub trait StepExecutor {
    fn execute(&mut self, step: &PlannedStep) -> Result<()>;
}

/// Run `workflow` step by step.
///
/// Step names are normalized in `definition` before anything else. Returns
/// the steps that were dispatched (or, under dry run, would have been).
/// Announcements go to `out`.
pub fn execute_workflow(
    workflow: &str,
    path: &Path,
    definition: &mut WorkflowDefinition,
    options: &RunOptions,
    executor: &mut dyn StepExecutor,
    out: &mut dyn Write,
) -> Result<Vec<PlannedStep>> {
    if definition.steps.is_empty() {
        return Err(AtmosError::EmptyWorkflow(workflow.to_string()));
    }

    normalize_step_names(&mut definition.steps);

    announce(
        out,
        &format!(
            "\nExecuting the workflow '{}' from '{}'\n",
            workflow,
            path.display()
        ),
    )?;
    let yaml = serde_yaml::to_string(&*definition).map_err(|e| {
        AtmosError::UserError(format!("failed to render workflow '{}': {}", workflow, e))
    })?;
    announce(out, &yaml)?;

    let start = start_index(workflow, &definition.steps, &options.from_step)?;

    let mut planned = Vec::new();
    for step in &definition.steps[start..] {
        let command = step.command.trim();
        announce(out, &format!("Executing workflow step: {}", command))?;

        let planned_step = match StepType::parse(&step.step_type)? {
            StepType::Shell => PlannedStep {
                name: step.name.clone(),
                invocation: Invocation::Shell {
                    command: command.to_string(),
                },
                stack: None,
            },
            StepType::Atmos => {
                let stack =
                    effective_stack(&definition.stack, &step.stack, &options.command_line_stack);
                let mut args: Vec<String> =
                    command.split_whitespace().map(str::to_string).collect();
                if let Some(stack) = &stack {
                    args.push("-s".to_string());
                    args.push(stack.clone());
                    announce(out, &format!("Stack: {}", stack))?;
                }
                PlannedStep {
                    name: step.name.clone(),
                    invocation: Invocation::Atmos { args },
                    stack,
                }
            }
        };

        if !options.dry_run {
            executor.execute(&planned_step)?;
        }
        announce(out, "")?;

        planned.push(planned_step);
    }

    Ok(planned)
}

fn announce(out: &mut dyn Write, line: &str) -> Result<()> {
    writeln!(out, "{}", line)
        .map_err(|e| AtmosError::UserError(format!("failed to write output: {}", e)))
}
