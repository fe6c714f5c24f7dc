//! Local cache of per-organization task configuration.
//!
//! Each organization maps to `<config_home>/src/<org>` holding the shared
//! `Taskfile.yml` and a `taskfiles/` folder of auxiliary definitions. The
//! directory's existence is the sole freshness signal: once populated it is
//! never re-downloaded until explicitly removed.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use ghtask_gh_tooling::RemoteSource;
use tracing::debug;
use tracing::warn;

use crate::error::ContextError;

/// File name of the organization-wide task definition.
pub const TASKFILE_NAME: &str = "Taskfile.yml";

/// Folder of auxiliary task definitions next to the taskfile.
pub const TASKFILES_DIR_NAME: &str = "taskfiles";

/// Environment override for the cache root, taking precedence over the
/// platform config directory.
pub const GH_TASK_HOME_ENV: &str = "GH_TASK_HOME";

const CONFIG_DIR_NAME: &str = "gh-task";

/// Result of probing an organization's cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgDirState {
    pub exists: bool,
    pub path: PathBuf,
}

/// Store mapping organization names to local cache directories.
#[derive(Debug, Clone)]
pub struct TaskfileCache {
    config_home: PathBuf,
}

impl TaskfileCache {
    /// Resolves the per-user configuration root. `GH_TASK_HOME` wins when
    /// set; on macOS the root is deliberately `~/.config/gh-task` rather
    /// than the platform-default `Application Support` directory.
    pub fn discover() -> Result<Self, ContextError> {
        if let Some(home) = env::var_os(GH_TASK_HOME_ENV)
            && !home.is_empty()
        {
            return Ok(Self::new(PathBuf::from(home)));
        }
        let config_root = platform_config_root()?;
        Ok(Self::new(config_root.join(CONFIG_DIR_NAME)))
    }

    /// Uses an explicit configuration root.
    pub fn new(config_home: impl Into<PathBuf>) -> Self {
        Self {
            config_home: config_home.into(),
        }
    }

    pub fn config_home(&self) -> &Path {
        &self.config_home
    }

    /// Creates the configuration root if absent.
    pub fn ensure_config_home(&self) -> Result<(), ContextError> {
        fs::create_dir_all(&self.config_home)?;
        Ok(())
    }

    /// Cache directory for `org`: `<config_home>/src/<org>`.
    pub fn org_home(&self, org: &str) -> PathBuf {
        self.config_home.join("src").join(org)
    }

    /// Expected taskfile path for `org`.
    pub fn taskfile_path(&self, org: &str) -> PathBuf {
        self.org_home(org).join(TASKFILE_NAME)
    }

    /// Creates the cache directory for `org` (and all parents). Idempotent.
    pub fn ensure_org_dir(&self, org: &str) -> Result<PathBuf, ContextError> {
        let dir = self.org_home(org);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Stats the cache directory for `org`. Absence is not an error, but any
    /// other stat failure (e.g. permissions) propagates rather than being
    /// misread as "absent".
    pub fn probe(&self, org: &str) -> Result<OrgDirState, ContextError> {
        let path = self.org_home(org);
        match fs::metadata(&path) {
            Ok(_) => Ok(OrgDirState { exists: true, path }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Ok(OrgDirState { exists: false, path })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Recursively deletes the cache directory for `org`. Absence is not an
    /// error.
    pub fn remove(&self, org: &str) -> Result<(), ContextError> {
        match fs::remove_dir_all(self.org_home(org)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the cache directory for `org`, downloading the taskfile and
    /// auxiliary folder on first use. An existing directory is returned
    /// unchanged, whatever its contents.
    pub async fn populate(
        &self,
        org: &str,
        remote: &dyn RemoteSource,
    ) -> Result<PathBuf, ContextError> {
        let state = self.probe(org)?;
        if state.exists {
            debug!("cache for {org} already present at {}", state.path.display());
            return Ok(state.path);
        }

        let dir = self.ensure_org_dir(org)?;
        if let Err(err) = download_org_data(org, &dir, remote).await {
            // A half-populated directory would satisfy the existence check
            // forever and block any retry, so drop it before reporting.
            if let Err(cleanup_err) = fs::remove_dir_all(&dir) {
                warn!(
                    "could not clean up partial cache at {}: {cleanup_err}",
                    dir.display()
                );
            }
            return Err(err);
        }
        Ok(dir)
    }
}

async fn download_org_data(
    org: &str,
    dir: &Path,
    remote: &dyn RemoteSource,
) -> Result<(), ContextError> {
    remote.download_file(org, TASKFILE_NAME, dir).await?;
    remote.download_folder(org, TASKFILES_DIR_NAME, dir).await?;
    Ok(())
}

fn platform_config_root() -> Result<PathBuf, ContextError> {
    if cfg!(target_os = "macos") {
        let home = dirs::home_dir().ok_or_else(|| {
            ContextError::Io(io::Error::other("home directory is not set"))
        })?;
        Ok(home.join(".config"))
    } else {
        dirs::config_dir()
            .ok_or_else(|| ContextError::Io(io::Error::other("config directory is not set")))
    }
}
