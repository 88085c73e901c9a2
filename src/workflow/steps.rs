//! Step naming, typing and stack resolution.

use super::model::WorkflowStep;
use crate::error::{AtmosError, Result};

/// How a step is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    /// Re-invoke atmos with the step's arguments.
    Atmos,
    /// Run the command text through the platform shell.
    Shell,
}

impl StepType {
    /// Parse a step's `type`. Blank means `atmos`.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim() {
            "" | "atmos" => Ok(StepType::Atmos),
            "shell" => Ok(StepType::Shell),
            other => Err(AtmosError::InvalidStepType(other.to_string())),
        }
    }
}

/// Give every unnamed step the name `step<index+1>`.
///
/// Runs before `--from-step` lookup so generated names can be targeted.
pub fn normalize_step_names(steps: &mut [WorkflowStep]) {
    for (index, step) in steps.iter_mut().enumerate() {
        if step.name.trim().is_empty() {
            step.name = format!("step{}", index + 1);
        }
    }
}

/// Index of the first step named `from_step`, or 0 when `from_step` is empty.
pub fn start_index(workflow: &str, steps: &[WorkflowStep], from_step: &str) -> Result<usize> {
    let from_step = from_step.trim();
    if from_step.is_empty() {
        return Ok(0);
    }

    steps
        .iter()
        .position(|step| step.name == from_step)
        .ok_or_else(|| AtmosError::InvalidFromStep {
            workflow: workflow.to_string(),
            step: from_step.to_string(),
        })
}

/// First candidate that is non-empty after trimming, trimmed.
pub fn first_non_empty<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| candidate.trim())
        .find(|candidate| !candidate.is_empty())
}

/// Stack for one step: the command line beats the step, which beats the workflow.
pub fn effective_stack(
    workflow_stack: &str,
    step_stack: &str,
    command_line_stack: &str,
) -> Option<String> {
    first_non_empty(&[command_line_stack, step_stack, workflow_stack]).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str) -> WorkflowStep {
        WorkflowStep {
            name: name.to_string(),
            command: "terraform plan vpc".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_step_names() {
        let mut steps = vec![step(""), step("dns"), step(""), step("  ")];
        normalize_step_names(&mut steps);

        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["step1", "dns", "step3", "step4"]);
    }

    #[test]
    fn test_step_type_parse() {
        assert_eq!(StepType::parse("").unwrap(), StepType::Atmos);
        assert_eq!(StepType::parse(" atmos ").unwrap(), StepType::Atmos);
        assert_eq!(StepType::parse("shell").unwrap(), StepType::Shell);

        let err = StepType::parse("bash").unwrap_err();
        assert!(matches!(err, AtmosError::InvalidStepType(ref t) if t == "bash"));
    }

    #[test]
    fn test_start_index() {
        let mut steps = vec![step(""), step("dns"), step("")];
        normalize_step_names(&mut steps);

        assert_eq!(start_index("deploy", &steps, "").unwrap(), 0);
        assert_eq!(start_index("deploy", &steps, "dns").unwrap(), 1);
        assert_eq!(start_index("deploy", &steps, "step3").unwrap(), 2);

        let err = start_index("deploy", &steps, "step9").unwrap_err();
        assert!(matches!(err, AtmosError::InvalidFromStep { .. }));
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&["", " ", "b", "c"]), Some("b"));
        assert_eq!(first_non_empty(&[" a "]), Some("a"));
        assert_eq!(first_non_empty(&["", "  "]), None);
        assert_eq!(first_non_empty(&[]), None);
    }

    #[test]
    fn test_effective_stack_precedence() {
        assert_eq!(effective_stack("dev", "", ""), Some("dev".to_string()));
        assert_eq!(effective_stack("dev", "staging", ""), Some("staging".to_string()));
        assert_eq!(effective_stack("dev", "staging", "prod"), Some("prod".to_string()));
        assert_eq!(effective_stack("", "", "prod"), Some("prod".to_string()));
        assert_eq!(effective_stack(" ", "", ""), None);
    }
}
