//! Environment and command-line overrides applied on top of the merged files.
//!
//! Precedence, lowest to highest: merged `atmos.yaml` files, environment
//! variables, command-line flags, the embedding caller's base path. Each
//! function here applies exactly one of those layers and the loader calls
//! them in that order.

use super::env::{self, EnvVars};
use super::model::CliConfiguration;
use super::types::ConfigAndStacksInfo;
use crate::error::Result;
use tracing::info;

/// Apply `ATMOS_*` environment variables.
pub fn apply_env(config: &mut CliConfiguration, env: &EnvVars) -> Result<()> {
    set_string(env, env::BASE_PATH, &mut config.base_path);

    set_string(env, env::STACKS_BASE_PATH, &mut config.stacks.base_path);
    set_list(env, env::STACKS_INCLUDED_PATHS, &mut config.stacks.included_paths);
    set_list(env, env::STACKS_EXCLUDED_PATHS, &mut config.stacks.excluded_paths);
    set_string(env, env::STACKS_NAME_PATTERN, &mut config.stacks.name_pattern);

    let terraform = &mut config.components.terraform;
    set_string(env, env::TERRAFORM_BASE_PATH, &mut terraform.base_path);
    set_bool(env, env::TERRAFORM_APPLY_AUTO_APPROVE, &mut terraform.apply_auto_approve)?;
    set_bool(env, env::TERRAFORM_DEPLOY_RUN_INIT, &mut terraform.deploy_run_init)?;
    set_bool(
        env,
        env::TERRAFORM_AUTO_GENERATE_BACKEND_FILE,
        &mut terraform.auto_generate_backend_file,
    )?;

    let helmfile = &mut config.components.helmfile;
    set_string(env, env::HELMFILE_BASE_PATH, &mut helmfile.base_path);
    set_string(env, env::HELMFILE_KUBECONFIG_PATH, &mut helmfile.kubeconfig_path);
    set_string(
        env,
        env::HELMFILE_HELM_AWS_PROFILE_PATTERN,
        &mut helmfile.helm_aws_profile_pattern,
    );
    set_string(
        env,
        env::HELMFILE_CLUSTER_NAME_PATTERN,
        &mut helmfile.cluster_name_pattern,
    );

    set_string(env, env::WORKFLOWS_BASE_PATH, &mut config.workflows.base_path);

    set_bool(env, env::LOGS_VERBOSE, &mut config.logs.verbose)?;

    Ok(())
}

/// Apply command-line flags.
pub fn apply_command_line(config: &mut CliConfiguration, info: &ConfigAndStacksInfo) {
    set_arg("--base-path", &info.base_path, &mut config.base_path);
    set_arg("--config-dir", &info.config_dir, &mut config.stacks.base_path);
    set_arg("--stacks-dir", &info.stacks_dir, &mut config.stacks.base_path);
    set_arg(
        "--terraform-dir",
        &info.terraform_dir,
        &mut config.components.terraform.base_path,
    );
    set_arg(
        "--terraform-command",
        &info.terraform_command,
        &mut config.components.terraform.command,
    );
    set_arg(
        "--helmfile-dir",
        &info.helmfile_dir,
        &mut config.components.helmfile.base_path,
    );
    set_arg(
        "--helmfile-command",
        &info.helmfile_command,
        &mut config.components.helmfile.command,
    );
    set_arg("--workflows-dir", &info.workflows_dir, &mut config.workflows.base_path);

    if let Some(value) = info.deploy_run_init {
        info!("Using command line argument '--deploy-run-init={}'", value);
        config.components.terraform.deploy_run_init = value;
    }
    if let Some(value) = info.auto_generate_backend_file {
        info!("Using command line argument '--auto-generate-backend-file={}'", value);
        config.components.terraform.auto_generate_backend_file = value;
    }
    if let Some(value) = info.logs_verbose {
        info!("Using command line argument '--logs-verbose={}'", value);
        config.logs.verbose = value;
    }
}

/// Apply the embedding caller's base path, which beats every other source.
pub fn apply_caller_override(config: &mut CliConfiguration, info: &ConfigAndStacksInfo) {
    if let Some(base_path) = info.atmos_base_path.as_deref().filter(|p| !p.is_empty()) {
        info!("Using base path '{}' supplied by the caller", base_path);
        config.base_path = base_path.to_string();
    }
}

fn set_string(env: &EnvVars, name: &str, field: &mut String) {
    if let Some(value) = env.get(name) {
        info!("Found ENV var {}={}", name, value);
        *field = value.to_string();
    }
}

fn set_list(env: &EnvVars, name: &str, field: &mut Vec<String>) {
    if let Some(values) = env.get_list(name) {
        info!("Found ENV var {}={}", name, values.join(","));
        *field = values;
    }
}

fn set_bool(env: &EnvVars, name: &str, field: &mut bool) -> Result<()> {
    if let Some(value) = env.get_bool(name)? {
        info!("Found ENV var {}={}", name, value);
        *field = value;
    }
    Ok(())
}

fn set_arg(flag: &str, value: &Option<String>, field: &mut String) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        info!("Using command line argument '{}={}'", flag, value);
        *field = value.to_string();
    }
}
