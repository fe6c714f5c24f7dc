//! Resolution of the repository the command was invoked from.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::path::PathBuf;

use ghtask_gh_tooling::RemoteSource;
use ghtask_gh_tooling::SHARED_CONFIG_REPO;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::TaskfileCache;
use crate::error::ContextError;
use crate::git;
use crate::peer_deps::check_peer_deps;

/// The repository context of one invocation.
///
/// Construction is atomic: either every field is resolved (with `branch`
/// degrading to empty on lookup failure) or an error is returned, and
/// `repo_owner` is never empty on success.
#[derive(Debug, Clone)]
pub struct CurrentRepo {
    pub repo_name: String,
    pub repo_owner: String,
    /// Current branch, or empty when undeterminable (detached `HEAD`,
    /// non-repository directory).
    pub branch: String,
    /// Working directory at invocation time.
    pub path: PathBuf,
    /// Peer capability name to availability.
    pub peer_deps: HashMap<String, bool>,
}

/// Working directory of the invocation.
pub fn invocation_dir() -> Result<PathBuf, ContextError> {
    env::current_dir().map_err(ContextError::WorkingDir)
}

/// Computes [`CurrentRepo`] once per working directory and memoizes it for
/// the lifetime of the invocation. A different `cwd` (reentrant use)
/// invalidates the memo and recomputes.
#[derive(Default)]
pub struct CurrentRepoResolver {
    memo: Mutex<Option<CurrentRepo>>,
}

impl CurrentRepoResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn resolve(
        &self,
        cwd: &Path,
        cache: &TaskfileCache,
        remote: &dyn RemoteSource,
    ) -> Result<CurrentRepo, ContextError> {
        {
            let memo = self.memo.lock().await;
            if let Some(current) = memo.as_ref()
                && current.path == cwd
            {
                debug!("reusing resolved context for {}", cwd.display());
                return Ok(current.clone());
            }
        }

        let repo = git::detect_repo(cwd)
            .await
            .ok_or(ContextError::NotAGitHubRepository)?;

        // No download is attempted for an organization without the
        // shared-config repository; the check must precede populate.
        if !remote
            .org_has_repo(&repo.owner, SHARED_CONFIG_REPO)
            .await
            .is_present()
        {
            return Err(ContextError::MissingSharedConfigRepo {
                org: repo.owner,
            });
        }

        cache.populate(&repo.owner, remote).await?;

        // Branch lookup and the peer-dependency check are independent; run
        // them as one joined pair so both results land before the value is
        // materialized.
        let (branch, peer_deps) = tokio::join!(git::current_branch(cwd), check_peer_deps(remote));

        let current = CurrentRepo {
            repo_name: repo.name,
            repo_owner: repo.owner,
            branch: branch.unwrap_or_default(),
            path: cwd.to_path_buf(),
            peer_deps: peer_deps.availability(),
        };

        *self.memo.lock().await = Some(current.clone());
        Ok(current)
    }
}
