//! Tests for config loading and precedence.

use crate::config::{
    CliConfiguration, ConfigAndStacksInfo, ConfigSearchPaths, ConfigTier, EnvVars, StackType,
    env, init_cli_config_with,
};
use crate::error::AtmosError;
use crate::test_support::{ALL_TIERS, TierDirs, capture_logs, create_stack_repo};

const STACKS_SECTION: &str = r#"
stacks:
  base_path: stacks
  included_paths:
    - "**/*"
"#;

/// The eight places a base path can come from, lowest precedence first.
#[derive(Debug, Clone, Copy)]
enum Level {
    Tier(ConfigTier),
    Env,
    CommandLine,
    Caller,
}

fn all_levels() -> Vec<Level> {
    ALL_TIERS
        .iter()
        .map(|tier| Level::Tier(*tier))
        .chain([Level::Env, Level::CommandLine, Level::Caller])
        .collect()
}

fn load(
    dirs: &TierDirs,
    env: &EnvVars,
    info: &ConfigAndStacksInfo,
) -> crate::error::Result<CliConfiguration> {
    init_cli_config_with(&dirs.search_paths(), env, info, false)
}

#[test]
fn test_base_path_precedence_is_total() {
    let levels = all_levels();

    for (low_index, low) in levels.iter().enumerate() {
        for (high_index, high) in levels.iter().enumerate().skip(low_index + 1) {
            let dirs = TierDirs::new();
            let mut env = EnvVars::default();
            let mut info = ConfigAndStacksInfo::default();
            let mut system_yaml = STACKS_SECTION.to_string();

            for (index, level) in [(low_index, low), (high_index, high)] {
                let value = format!("level{}", index);
                match level {
                    Level::Tier(ConfigTier::System) => {
                        system_yaml.push_str(&format!("base_path: {}\n", value));
                    }
                    Level::Tier(tier) => dirs.write(*tier, &format!("base_path: {}\n", value)),
                    Level::Env => env = env.clone().with(env::BASE_PATH, &value),
                    Level::CommandLine => info.base_path = Some(value),
                    Level::Caller => info.atmos_base_path = Some(value),
                }
            }
            dirs.write(ConfigTier::System, &system_yaml);

            let config = load(&dirs, &env, &info).unwrap();
            assert_eq!(
                config.base_path,
                format!("level{}", high_index),
                "{:?} should override {:?}",
                high,
                low
            );
        }
    }
}

#[test]
fn test_files_merge_keywise_across_tiers() {
    let dirs = TierDirs::new();
    dirs.write(
        ConfigTier::System,
        r#"
base_path: /repo
components:
  terraform:
    base_path: components/terraform
    apply_auto_approve: true
stacks:
  base_path: stacks
  included_paths: ["orgs/**/*", "catalog/**/*"]
"#,
    );
    dirs.write(
        ConfigTier::Home,
        r#"
components:
  terraform:
    base_path: infra/terraform
stacks:
  included_paths: ["orgs/**/*"]
"#,
    );

    let config = load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()).unwrap();

    assert_eq!(config.components.terraform.base_path, "infra/terraform");
    assert!(config.components.terraform.apply_auto_approve);
    // Lists are replaced, not appended.
    assert_eq!(config.stacks.included_paths, vec!["orgs/**/*"]);
    assert_eq!(config.stacks.base_path, "stacks");
}

#[test]
fn test_verbose_precedence() {
    let dirs = TierDirs::new();
    dirs.write(
        ConfigTier::CurrentDir,
        &format!("{}logs:\n  verbose: true\n", STACKS_SECTION),
    );
    let info = ConfigAndStacksInfo::default();

    let config = load(&dirs, &EnvVars::default(), &info).unwrap();
    assert!(config.logs.verbose);

    let env = EnvVars::default().with(env::LOGS_VERBOSE, "false");
    let config = load(&dirs, &env, &info).unwrap();
    assert!(!config.logs.verbose);

    let info = ConfigAndStacksInfo {
        logs_verbose: Some(true),
        ..Default::default()
    };
    let config = load(&dirs, &env, &info).unwrap();
    assert!(config.logs.verbose);
}

#[test]
fn test_verbose_diagnostics_follow_tier_order() {
    let dirs = TierDirs::new();
    dirs.write(ConfigTier::System, STACKS_SECTION);
    dirs.write(ConfigTier::CurrentDir, "base_path: /repo\n");
    let file = |tier: ConfigTier| dirs.dir(tier).join("atmos.yaml").display().to_string();

    let (config, output) =
        capture_logs(true, || load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()));
    assert_eq!(config.unwrap().base_path, "/repo");

    let expected = [
        format!("Found CLI config in '{}'", file(ConfigTier::System)),
        format!("Processed CLI config '{}'", file(ConfigTier::System)),
        format!("No config file 'atmos.yaml' found in path '{}'", file(ConfigTier::Home)),
        format!("Found CLI config in '{}'", file(ConfigTier::CurrentDir)),
        format!("Processed CLI config '{}'", file(ConfigTier::CurrentDir)),
        format!("No config file 'atmos.yaml' found in path '{}'", file(ConfigTier::EnvPath)),
        format!("No config file 'atmos.yaml' found in path '{}'", file(ConfigTier::Caller)),
        "Final CLI configuration:".to_string(),
    ];
    let mut from = 0;
    for line in &expected {
        let position = output[from..]
            .find(line.as_str())
            .unwrap_or_else(|| panic!("missing or out of order: {line}\n{output}"));
        from += position + line.len();
    }

    let (_, output) =
        capture_logs(false, || load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()));
    assert!(output.is_empty(), "unexpected output: {output}");
}

#[test]
fn test_invalid_verbose_env_is_rejected() {
    let dirs = TierDirs::new();
    dirs.write(ConfigTier::CurrentDir, STACKS_SECTION);
    let env = EnvVars::default().with(env::LOGS_VERBOSE, "maybe");

    let err = load(&dirs, &env, &ConfigAndStacksInfo::default()).unwrap_err();
    assert!(matches!(err, AtmosError::InvalidValue { .. }));
}

#[test]
fn test_no_config_anywhere() {
    let dirs = TierDirs::new();

    let err = load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()).unwrap_err();
    match err {
        AtmosError::ConfigNotFound { searched } => {
            assert_eq!(searched.len(), 5);
            for tier in ALL_TIERS {
                assert!(searched.contains(&dirs.dir(tier).join("atmos.yaml")));
            }
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_yaml_names_the_file() {
    let dirs = TierDirs::new();
    dirs.write(ConfigTier::System, STACKS_SECTION);
    dirs.write(ConfigTier::Home, "stacks: [unclosed\n");

    let err = load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()).unwrap_err();
    match err {
        AtmosError::ConfigParse { path, .. } => {
            assert_eq!(path, dirs.dir(ConfigTier::Home).join("atmos.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_stacks_settings_is_invalid() {
    let dirs = TierDirs::new();
    dirs.write(ConfigTier::System, "base_path: /repo\n");

    let err = load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()).unwrap_err();
    assert!(matches!(err, AtmosError::InvalidConfig(_)));

    // Env vars can supply what the files lack.
    let env = EnvVars::default()
        .with(env::STACKS_BASE_PATH, "stacks")
        .with(env::STACKS_INCLUDED_PATHS, "orgs/**/*,catalog/*");
    let config = load(&dirs, &env, &ConfigAndStacksInfo::default()).unwrap();
    assert_eq!(config.stacks.included_paths, vec!["orgs/**/*", "catalog/*"]);
}

#[test]
fn test_absolute_paths_are_derived() {
    let dirs = TierDirs::new();
    dirs.write(
        ConfigTier::System,
        r#"
base_path: /repo/infra
components:
  terraform:
    base_path: components/terraform
  helmfile:
    base_path: ./components/../helmfile
stacks:
  base_path: stacks
  included_paths: ["orgs/**/*"]
  excluded_paths: ["**/_defaults.yaml"]
workflows:
  base_path: /shared/workflows
"#,
    );

    let config = load(&dirs, &EnvVars::default(), &ConfigAndStacksInfo::default()).unwrap();

    assert!(config.initialized);
    assert_eq!(
        config.stacks_base_absolute_path,
        std::path::PathBuf::from("/repo/infra/stacks")
    );
    assert_eq!(
        config.include_stack_absolute_paths,
        vec![std::path::PathBuf::from("/repo/infra/stacks/orgs/**/*")]
    );
    assert_eq!(
        config.exclude_stack_absolute_paths,
        vec![std::path::PathBuf::from("/repo/infra/stacks/**/_defaults.yaml")]
    );
    assert_eq!(
        config.terraform_dir_absolute_path,
        std::path::PathBuf::from("/repo/infra/components/terraform")
    );
    assert_eq!(
        config.helmfile_dir_absolute_path,
        std::path::PathBuf::from("/repo/infra/helmfile")
    );
    assert_eq!(
        config.workflows_dir_absolute_path,
        std::path::PathBuf::from("/shared/workflows")
    );
    assert_eq!(config.stack_type, None);
    assert!(config.stack_config_files_absolute_paths.is_empty());
}

#[test]
fn test_stacks_dir_flag_beats_config_dir_flag() {
    let dirs = TierDirs::new();
    dirs.write(ConfigTier::System, &format!("base_path: /repo\n{}", STACKS_SECTION));
    let info = ConfigAndStacksInfo {
        config_dir: Some("from-config-dir".to_string()),
        stacks_dir: Some("from-stacks-dir".to_string()),
        ..Default::default()
    };

    let config = load(&dirs, &EnvVars::default(), &info).unwrap();
    assert_eq!(config.stacks.base_path, "from-stacks-dir");
    assert_eq!(
        config.stacks_base_absolute_path,
        std::path::PathBuf::from("/repo/from-stacks-dir")
    );
}

#[test]
fn test_process_stacks_resolves_files() {
    let repo = create_stack_repo();
    let paths = ConfigSearchPaths {
        current_dir: Some(repo.path().to_path_buf()),
        ..Default::default()
    };
    let info = ConfigAndStacksInfo {
        atmos_base_path: Some(repo.path().to_string_lossy().into_owned()),
        ..ConfigAndStacksInfo::for_stack("orgs-acme-dev")
    };

    let config = init_cli_config_with(&paths, &EnvVars::default(), &info, true).unwrap();
    assert_eq!(config.stack_type, Some(StackType::Logical));
    assert_eq!(config.stack_config_files_relative_paths, vec!["orgs/acme/dev"]);
    assert_eq!(
        config.stack_config_files_absolute_paths,
        vec![repo.path().join("stacks/orgs/acme/dev.yaml")]
    );

    let info = ConfigAndStacksInfo {
        stack: "orgs/globex/dev".to_string(),
        ..info
    };
    let config = init_cli_config_with(&paths, &EnvVars::default(), &info, true).unwrap();
    assert_eq!(config.stack_type, Some(StackType::Directory));
}

#[test]
fn test_process_stacks_unknown_stack() {
    let repo = create_stack_repo();
    let paths = ConfigSearchPaths {
        current_dir: Some(repo.path().to_path_buf()),
        ..Default::default()
    };
    let info = ConfigAndStacksInfo {
        atmos_base_path: Some(repo.path().to_string_lossy().into_owned()),
        ..ConfigAndStacksInfo::for_stack("nope")
    };

    let err = init_cli_config_with(&paths, &EnvVars::default(), &info, true).unwrap_err();
    assert!(matches!(err, AtmosError::StackNotFound { .. }));
}

#[test]
fn test_from_yaml_defaults() {
    let config = CliConfiguration::from_yaml("").unwrap();
    assert_eq!(config.components.terraform.command, "terraform");
    assert_eq!(config.components.helmfile.command, "helmfile");
    assert!(config.components.helmfile.use_eks);
    assert!(!config.initialized);

    let config = CliConfiguration::from_yaml(
        "components:\n  helmfile:\n    use_eks: false\nsome_future_key: 1\n",
    )
    .unwrap();
    assert!(!config.components.helmfile.use_eks);
    assert_eq!(config.components.helmfile.command, "helmfile");
}

#[test]
fn test_logs_section_holds_only_verbose() {
    let config =
        CliConfiguration::from_yaml("logs:\n  verbose: true\n  colors: false\n").unwrap();
    assert!(config.logs.verbose);

    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("verbose: true"));
    assert!(!yaml.contains("colors"));
}

#[test]
fn test_derived_fields_are_not_read_from_files() {
    let config = CliConfiguration::from_yaml(
        "initialized: true\nstacks_base_absolute_path: /etc\n",
    )
    .unwrap();
    assert!(!config.initialized);
    assert_eq!(config.stacks_base_absolute_path, std::path::PathBuf::new());
}
