use crate::config::{ConfigSearchPaths, ConfigTier};
use crate::logging;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Write `content` to `root/rel`, creating parent directories.
pub(crate) fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// One temp directory per config tier, all empty until written.
pub(crate) struct TierDirs {
    root: TempDir,
}

impl TierDirs {
    pub(crate) fn new() -> Self {
        let root = TempDir::new().unwrap();
        for tier in ALL_TIERS {
            std::fs::create_dir_all(root.path().join(tier_dir_name(tier))).unwrap();
        }
        Self { root }
    }

    pub(crate) fn dir(&self, tier: ConfigTier) -> PathBuf {
        self.root.path().join(tier_dir_name(tier))
    }

    /// Write `atmos.yaml` for `tier`.
    pub(crate) fn write(&self, tier: ConfigTier, yaml: &str) {
        std::fs::write(self.dir(tier).join("atmos.yaml"), yaml).unwrap();
    }

    /// Search paths with every tier pointed at its temp directory.
    pub(crate) fn search_paths(&self) -> ConfigSearchPaths {
        ConfigSearchPaths {
            system_dir: Some(self.dir(ConfigTier::System)),
            home_dir: Some(self.dir(ConfigTier::Home)),
            current_dir: Some(self.dir(ConfigTier::CurrentDir)),
            env_dir: Some(self.dir(ConfigTier::EnvPath)),
            caller_dir: Some(self.dir(ConfigTier::Caller)),
        }
    }
}

pub(crate) const ALL_TIERS: [ConfigTier; 5] = [
    ConfigTier::System,
    ConfigTier::Home,
    ConfigTier::CurrentDir,
    ConfigTier::EnvPath,
    ConfigTier::Caller,
];

fn tier_dir_name(tier: ConfigTier) -> &'static str {
    match tier {
        ConfigTier::System => "system",
        ConfigTier::Home => "home",
        ConfigTier::CurrentDir => "cwd",
        ConfigTier::EnvPath => "env",
        ConfigTier::Caller => "caller",
    }
}

/// A repository with an `atmos.yaml` and a small stack tree:
///
/// ```text
/// atmos.yaml
/// stacks/catalog/vpc.yaml
/// stacks/orgs/acme/_defaults.yaml
/// stacks/orgs/acme/dev.yaml        (tenant acme, stage dev)
/// stacks/orgs/acme/prod.yaml       (tenant acme, stage prod)
/// stacks/orgs/globex/dev.yml       (tenant globex, stage dev)
/// ```
pub(crate) fn create_stack_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_file(
        root,
        "atmos.yaml",
        r#"
base_path: "."
components:
  terraform:
    base_path: components/terraform
  helmfile:
    base_path: components/helmfile
stacks:
  base_path: stacks
  included_paths:
    - "orgs/**/*"
  excluded_paths:
    - "**/_defaults.yaml"
workflows:
  base_path: stacks/workflows
"#,
    );

    write_file(
        root,
        "stacks/catalog/vpc.yaml",
        "components:\n  terraform:\n    vpc:\n      vars:\n        cidr: 10.0.0.0/16\n",
    );
    write_file(
        root,
        "stacks/orgs/acme/_defaults.yaml",
        "vars:\n  tenant: acme\n",
    );
    write_file(
        root,
        "stacks/orgs/acme/dev.yaml",
        r#"
vars:
  tenant: acme
  stage: dev
  region: us-east-2
components:
  terraform:
    vpc:
      vars:
        cidr: 10.1.0.0/16
        tags:
          team: platform
  helmfile:
    nginx:
      vars:
        replicas: 2
"#,
    );
    write_file(
        root,
        "stacks/orgs/acme/prod.yaml",
        "vars:\n  tenant: acme\n  stage: prod\ncomponents:\n  terraform:\n    vpc:\n      vars:\n        cidr: 10.2.0.0/16\n",
    );
    write_file(
        root,
        "stacks/orgs/globex/dev.yml",
        "vars:\n  tenant: globex\n  stage: dev\n",
    );

    temp_dir
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|poison| poison.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber at the verbose or quiet level and
/// return what it logged.
pub(crate) fn capture_logs<T>(verbose: bool, f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(logging::default_level(verbose)))
        .with_writer(capture.clone())
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}
