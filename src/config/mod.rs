//! CLI configuration for atmos.
//!
//! This module defines the `CliConfiguration` struct that represents the
//! merged `atmos.yaml`, the five config tiers it is read from, and the
//! environment/command-line overlay applied on top. The loader turns all of
//! that into a read-only configuration with absolute paths filled in.

pub mod env;
mod loader;
pub mod merge;
mod model;
mod operations;
pub mod overlay;
pub mod sources;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use env::EnvVars;
pub use loader::{init_cli_config, init_cli_config_with, merge_config_files};
pub use merge::{deep_merge, deep_merge_all};
pub use model::{
    CliConfiguration, Components, HelmfileSettings, Logs, Stacks, TerraformSettings, Workflows,
};
pub use sources::{CLI_CONFIG_FILE_NAME, ConfigSearchPaths, ConfigSource, ConfigTier};
pub use types::{ComponentType, ConfigAndStacksInfo, StackType};
