//! Workflows: named, ordered lists of atmos and shell steps.
//!
//! A manifest is loaded from the workflows directory, unnamed steps are given
//! positional names, and the steps are dispatched one at a time through a
//! [`StepExecutor`], stopping at the first failure.

pub mod executor;
pub mod model;
pub mod runner;
pub mod steps;

pub use executor::ProcessExecutor;
pub use model::{WorkflowDefinition, WorkflowFile, WorkflowStep, resolve_workflow_path};
pub use runner::{Invocation, PlannedStep, RunOptions, StepExecutor, execute_workflow};
pub use steps::{StepType, effective_stack, first_non_empty, normalize_step_names, start_index};
