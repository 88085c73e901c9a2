//! Implementation of `atmos workflow`.

use crate::cli::{GlobalArgs, WorkflowArgs};
use crate::error::Result;
use crate::workflow::{
    ProcessExecutor, RunOptions, WorkflowFile, execute_workflow, resolve_workflow_path,
};

/// Execute the `workflow` command.
///
/// The workflow's own stack settings are overridden by `--stack`.
pub fn cmd_workflow(global: &GlobalArgs, args: WorkflowArgs) -> Result<()> {
    let config = super::load_config(global, false)?;

    let path = resolve_workflow_path(&config, &args.file)?;
    let mut definition = WorkflowFile::load(&path)?.take_workflow(&args.workflow, &path)?;

    let options = RunOptions {
        dry_run: global.dry_run,
        command_line_stack: global.stack().unwrap_or_default().to_string(),
        from_step: args.from_step.unwrap_or_default(),
    };

    let mut executor = ProcessExecutor::new();
    let mut stdout = std::io::stdout();
    execute_workflow(
        &args.workflow,
        &path,
        &mut definition,
        &options,
        &mut executor,
        &mut stdout,
    )?;

    Ok(())
}
