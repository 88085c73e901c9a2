//! CLI argument parsing for atmos.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::ConfigAndStacksInfo;
use crate::config::env::parse_bool;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Atmos: layered CLI configuration, stack resolution and workflows for
/// Terraform and Helmfile components.
///
/// `atmos.yaml` is read from the system dir, `~/.atmos`, the current
/// directory and `ATMOS_CLI_CONFIG_PATH`, then overridden by `ATMOS_*`
/// environment variables and the flags below.
#[derive(Parser, Debug)]
#[command(name = "atmos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Stack (logical name or stack config file path).
    #[arg(short = 's', long, global = true)]
    pub stack: Option<String>,

    /// Announce what would happen without running steps or writing files.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Base path for all relative paths in the CLI config.
    #[arg(long, global = true, value_name = "PATH")]
    pub base_path: Option<String>,

    /// Stacks base path (same as `--stacks-dir`, which wins if both are set).
    #[arg(long, global = true, value_name = "PATH")]
    pub config_dir: Option<String>,

    /// Stacks base path.
    #[arg(long, global = true, value_name = "PATH")]
    pub stacks_dir: Option<String>,

    /// Terraform components base path.
    #[arg(long, global = true, value_name = "PATH")]
    pub terraform_dir: Option<String>,

    /// Terraform executable.
    #[arg(long, global = true, value_name = "COMMAND")]
    pub terraform_command: Option<String>,

    /// Helmfile components base path.
    #[arg(long, global = true, value_name = "PATH")]
    pub helmfile_dir: Option<String>,

    /// Helmfile executable.
    #[arg(long, global = true, value_name = "COMMAND")]
    pub helmfile_command: Option<String>,

    /// Workflow manifests base path.
    #[arg(long, global = true, value_name = "PATH")]
    pub workflows_dir: Option<String>,

    /// Run `terraform init` before `terraform deploy`.
    #[arg(long, global = true, value_name = "BOOL", value_parser = parse_flag_bool)]
    pub deploy_run_init: Option<bool>,

    /// Generate the Terraform backend file.
    #[arg(long, global = true, value_name = "BOOL", value_parser = parse_flag_bool)]
    pub auto_generate_backend_file: Option<bool>,

    /// Print diagnostics about config and stack processing.
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_flag_bool
    )]
    pub logs_verbose: Option<bool>,
}

impl GlobalArgs {
    /// Overrides for the config loader.
    pub fn to_info(&self) -> ConfigAndStacksInfo {
        ConfigAndStacksInfo {
            stack: self.stack.clone().unwrap_or_default(),
            base_path: self.base_path.clone(),
            config_dir: self.config_dir.clone(),
            stacks_dir: self.stacks_dir.clone(),
            terraform_dir: self.terraform_dir.clone(),
            terraform_command: self.terraform_command.clone(),
            helmfile_dir: self.helmfile_dir.clone(),
            helmfile_command: self.helmfile_command.clone(),
            workflows_dir: self.workflows_dir.clone(),
            deploy_run_init: self.deploy_run_init,
            auto_generate_backend_file: self.auto_generate_backend_file,
            logs_verbose: self.logs_verbose,
            atmos_base_path: None,
            atmos_cli_config_path: None,
        }
    }

    /// `--stack` trimmed, if non-empty.
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

fn parse_flag_bool(value: &str) -> Result<bool, String> {
    parse_bool("flag", value).map_err(|e| e.to_string())
}

/// Available commands for atmos.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a workflow from a workflow manifest.
    ///
    /// Steps run in order and the first failing step stops the workflow.
    Workflow(WorkflowArgs),

    /// Terraform component commands.
    Terraform(ComponentCommand),

    /// Helmfile component commands.
    Helmfile(ComponentCommand),

    /// Show the finalized CLI config or a merged stack.
    Describe(DescribeCommand),
}

/// Arguments for the `workflow` command.
#[derive(Args, Debug)]
pub struct WorkflowArgs {
    /// Name of the workflow in the manifest.
    pub workflow: String,

    /// Workflow manifest, relative to the workflows base path
    /// (`.yaml` is appended when there is no extension).
    #[arg(short = 'f', long)]
    pub file: String,

    /// Start from the step with this name (unnamed steps are `step1`, `step2`, ...).
    #[arg(long)]
    pub from_step: Option<String>,
}

#[derive(Args, Debug)]
pub struct ComponentCommand {
    #[command(subcommand)]
    pub action: ComponentAction,
}

#[derive(Subcommand, Debug)]
pub enum ComponentAction {
    /// Generate files for a component.
    Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
    #[command(subcommand)]
    pub target: GenerateTarget,
}

#[derive(Subcommand, Debug)]
pub enum GenerateTarget {
    /// Write the component's variables for a stack to a varfile.
    Varfile(VarfileArgs),
}

/// Arguments for `generate varfile`.
#[derive(Args, Debug)]
pub struct VarfileArgs {
    /// Component name.
    pub component: String,

    /// Output file (default: next to the component, named after the stack).
    #[arg(short = 'f', long)]
    pub file: Option<String>,
}

#[derive(Args, Debug)]
pub struct DescribeCommand {
    #[command(subcommand)]
    pub action: DescribeAction,
}

#[derive(Subcommand, Debug)]
pub enum DescribeAction {
    /// Print the finalized CLI config.
    Config(FormatArgs),

    /// Print the merged stack selected with `--stack`.
    Stack(FormatArgs),
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
