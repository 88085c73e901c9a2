//! CLI config initialization.
//!
//! Finds and merges `atmos.yaml` from the five tiers, applies environment,
//! command-line and caller overrides, derives absolute paths and, when
//! asked, resolves the requested stack to its config files.

use super::env::{self, EnvVars};
use super::merge::deep_merge;
use super::model::CliConfiguration;
use super::overlay;
use super::sources::{ConfigSearchPaths, ConfigSource};
use super::types::ConfigAndStacksInfo;
use crate::error::{AtmosError, Result};
use crate::paths::{join_absolute_path, join_absolute_paths};
use crate::stacks;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Initialize the CLI config from the running process's environment.
///
/// Tier directories are discovered from the platform, the working directory
/// and `ATMOS_CLI_CONFIG_PATH`; see [`init_cli_config_with`].
pub fn init_cli_config(
    info: &ConfigAndStacksInfo,
    process_stacks: bool,
) -> Result<CliConfiguration> {
    let env = EnvVars::from_process();
    let paths = ConfigSearchPaths::discover(&env, info.atmos_cli_config_path.as_deref())?;
    init_cli_config_with(&paths, &env, info, process_stacks)
}

/// Initialize the CLI config from explicit tier directories and environment.
///
/// Returns either a fully initialized configuration or an error; a partially
/// built configuration is never handed out.
pub fn init_cli_config_with(
    paths: &ConfigSearchPaths,
    env: &EnvVars,
    info: &ConfigAndStacksInfo,
    process_stacks: bool,
) -> Result<CliConfiguration> {
    // Fail on a malformed verbose flag before touching any file.
    env.get_bool(env::LOGS_VERBOSE)?;

    info!(
        "Searching, processing and merging atmos CLI configurations (atmos.yaml) in the following order: \
         system dir, home dir, current dir, ENV vars, provider config path"
    );

    let merged = merge_config_files(&paths.sources())?;

    let mut config: CliConfiguration = serde_yaml::from_value(merged).map_err(|e| {
        AtmosError::InvalidConfig(format!("failed to decode the merged CLI config: {}", e))
    })?;

    overlay::apply_env(&mut config, env)?;
    overlay::apply_command_line(&mut config, info);
    overlay::apply_caller_override(&mut config, info);

    check_config(&config)?;
    resolve_absolute_paths(&mut config)?;

    if process_stacks {
        let resolution = stacks::find_stack_config_files(&config, &info.stack)?;
        if let Some(first) = resolution.relative_paths.first()
            && resolution.kind == super::StackType::Directory
        {
            info!(
                "The stack '{}' matches the stack config file {}",
                info.stack, first
            );
        }
        config.stack_config_files_absolute_paths = resolution.absolute_paths;
        config.stack_config_files_relative_paths = resolution.relative_paths;
        config.stack_type = Some(resolution.kind);
    }

    match serde_yaml::to_string(&config) {
        Ok(yaml) => info!("Final CLI configuration:\n{}", yaml),
        Err(e) => warn!("Failed to render the final CLI configuration: {}", e),
    }

    config.initialized = true;
    Ok(config)
}

/// Merge every existing tier file in order.
///
/// Missing files are skipped. Returns `ConfigNotFound` when none exist.
pub fn merge_config_files(sources: &[ConfigSource]) -> Result<Value> {
    let mut merged = Value::Null;
    let mut found = false;

    for source in sources {
        let file = source.file();
        if !file.is_file() {
            info!(
                "No config file 'atmos.yaml' found in path '{}' ({})",
                file.display(),
                source.tier
            );
            continue;
        }

        info!("Found CLI config in '{}' ({})", file.display(), source.tier);
        let fragment = read_config_fragment(&file)?;
        merged = deep_merge(merged, fragment);
        found = true;
        info!("Processed CLI config '{}'", file.display());
    }

    if !found {
        return Err(AtmosError::ConfigNotFound {
            searched: sources.iter().map(ConfigSource::file).collect(),
        });
    }

    Ok(merged)
}

fn read_config_fragment(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| AtmosError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| AtmosError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Mapping(_) | Value::Null => Ok(value),
        _ => Err(AtmosError::ConfigParse {
            path: path.to_path_buf(),
            message: "expected a YAML mapping at the top level".to_string(),
        }),
    }
}

/// Validate settings every command depends on.
fn check_config(config: &CliConfiguration) -> Result<()> {
    if config.stacks.base_path.is_empty() {
        return Err(AtmosError::InvalidConfig(
            "stack base path must be provided in 'stacks.base_path' config or \
             ATMOS_STACKS_BASE_PATH ENV variable"
                .to_string(),
        ));
    }

    if config.stacks.included_paths.is_empty() {
        return Err(AtmosError::InvalidConfig(
            "at least one path must be provided in 'stacks.included_paths' config or \
             ATMOS_STACKS_INCLUDED_PATHS ENV variable"
                .to_string(),
        ));
    }

    Ok(())
}

/// Fill in the absolute-path fields from `base_path` and the relative settings.
fn resolve_absolute_paths(config: &mut CliConfiguration) -> Result<()> {
    let base = PathBuf::from(&config.base_path);

    let stacks_base = join_absolute_path(&base, &config.stacks.base_path)?;
    config.include_stack_absolute_paths =
        join_absolute_paths(&stacks_base, &config.stacks.included_paths)?;
    config.exclude_stack_absolute_paths =
        join_absolute_paths(&stacks_base, &config.stacks.excluded_paths)?;
    config.stacks_base_absolute_path = stacks_base;

    config.terraform_dir_absolute_path =
        join_absolute_path(&base, &config.components.terraform.base_path)?;
    config.helmfile_dir_absolute_path =
        join_absolute_path(&base, &config.components.helmfile.base_path)?;
    config.workflows_dir_absolute_path =
        join_absolute_path(&base, &config.workflows.base_path)?;

    Ok(())
}
