//! Command implementations for atmos.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command loads the CLI config first; handlers never
//! exit the process themselves.

mod describe;
mod generate;
mod workflow;

use crate::cli::{
    Cli, Command, ComponentAction, DescribeAction, GenerateTarget, GlobalArgs,
};
use crate::config::{CliConfiguration, ComponentType, init_cli_config};
use crate::error::Result;
use crate::logging;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Command::Workflow(args) => workflow::cmd_workflow(&global, args),
        Command::Terraform(cmd) => match cmd.action {
            ComponentAction::Generate(generate) => match generate.target {
                GenerateTarget::Varfile(args) => {
                    generate::cmd_generate_varfile(&global, ComponentType::Terraform, args)
                }
            },
        },
        Command::Helmfile(cmd) => match cmd.action {
            ComponentAction::Generate(generate) => match generate.target {
                GenerateTarget::Varfile(args) => {
                    generate::cmd_generate_varfile(&global, ComponentType::Helmfile, args)
                }
            },
        },
        Command::Describe(cmd) => match cmd.action {
            DescribeAction::Config(args) => describe::cmd_describe_config(&global, args),
            DescribeAction::Stack(args) => describe::cmd_describe_stack(&global, args),
        },
    }
}

/// Load the CLI config for `global` and apply its verbosity to logging.
fn load_config(global: &GlobalArgs, process_stacks: bool) -> Result<CliConfiguration> {
    let config = init_cli_config(&global.to_info(), process_stacks)?;
    logging::set_verbose(config.logs.verbose);
    Ok(config)
}
