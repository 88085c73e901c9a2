//! The five config tiers and their candidate directories.

use super::env::{self, EnvVars};
use crate::error::Result;
use crate::paths;
use std::path::PathBuf;

/// Name of the CLI config file looked up in every tier.
pub const CLI_CONFIG_FILE_NAME: &str = "atmos.yaml";

/// System-wide config directory on non-Windows platforms.
pub const SYSTEM_DIR_CONFIG_PATH: &str = "/usr/local/etc/atmos";

/// Directory under the user's home holding the user-level config.
pub const HOME_CONFIG_DIR_NAME: &str = ".atmos";

/// Configuration tier, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// `/usr/local/etc/atmos`, or `%LOCALAPPDATA%/atmos` on Windows.
    System = 0,
    /// `~/.atmos`
    Home = 1,
    /// The current working directory.
    CurrentDir = 2,
    /// The directory in `ATMOS_CLI_CONFIG_PATH`.
    EnvPath = 3,
    /// A directory supplied by an embedding caller (highest file priority).
    Caller = 4,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::System => write!(f, "system dir"),
            ConfigTier::Home => write!(f, "home dir"),
            ConfigTier::CurrentDir => write!(f, "current dir"),
            ConfigTier::EnvPath => write!(f, "ENV var {}", env::CLI_CONFIG_PATH),
            ConfigTier::Caller => write!(f, "provider config path"),
        }
    }
}

/// One candidate location for an `atmos.yaml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub tier: ConfigTier,
    pub dir: PathBuf,
}

impl ConfigSource {
    /// Path of the config file this source would contribute.
    pub fn file(&self) -> PathBuf {
        self.dir.join(CLI_CONFIG_FILE_NAME)
    }
}

/// Directories for each tier. `None` means the tier is not configured.
///
/// These are plain values so tests can point every tier at a temp dir.
#[derive(Debug, Clone, Default)]
pub struct ConfigSearchPaths {
    pub system_dir: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
    pub current_dir: Option<PathBuf>,
    pub env_dir: Option<PathBuf>,
    pub caller_dir: Option<PathBuf>,
}

impl ConfigSearchPaths {
    /// Discover the tier directories from the platform, the process working
    /// directory, the given environment snapshot and the caller's override.
    pub fn discover(env: &EnvVars, caller_dir: Option<&str>) -> Result<Self> {
        let system_dir = if cfg!(windows) {
            env.get(env::WINDOWS_APP_DATA)
                .map(|dir| PathBuf::from(dir).join("atmos"))
        } else {
            Some(PathBuf::from(SYSTEM_DIR_CONFIG_PATH))
        };

        let home_dir = paths::home_dir()?.join(HOME_CONFIG_DIR_NAME);
        let current_dir = paths::current_dir()?;

        Ok(Self {
            system_dir,
            home_dir: Some(home_dir),
            current_dir: Some(current_dir),
            env_dir: env.get(env::CLI_CONFIG_PATH).map(PathBuf::from),
            caller_dir: caller_dir.filter(|d| !d.is_empty()).map(PathBuf::from),
        })
    }

    /// Configured sources in fixed precedence order, lowest first.
    pub fn sources(&self) -> Vec<ConfigSource> {
        [
            (ConfigTier::System, &self.system_dir),
            (ConfigTier::Home, &self.home_dir),
            (ConfigTier::CurrentDir, &self.current_dir),
            (ConfigTier::EnvPath, &self.env_dir),
            (ConfigTier::Caller, &self.caller_dir),
        ]
        .into_iter()
        .filter_map(|(tier, dir)| {
            dir.as_ref().map(|dir| ConfigSource {
                tier,
                dir: dir.clone(),
            })
        })
        .collect()
    }
}
