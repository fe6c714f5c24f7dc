//! Assembly of the per-invocation execution context and task-file path
//! resolution.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use ghtask_gh_tooling::RemoteSource;
use ghtask_gh_tooling::SHARED_CONFIG_REPO;
use tracing::debug;

use crate::cache::TaskfileCache;
use crate::current::CurrentRepo;
use crate::current::CurrentRepoResolver;
use crate::error::ContextError;

/// Immutable execution context, built once per invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    config_home: PathBuf,
    orgs: Vec<String>,
    current: CurrentRepo,
}

impl ExecutionContext {
    /// Per-user configuration root.
    pub fn config_home(&self) -> &Path {
        &self.config_home
    }

    /// Organizations of the authenticated identity that expose the
    /// shared-configuration repository. Order is not meaningful.
    pub fn orgs(&self) -> &[String] {
        &self.orgs
    }

    pub fn current(&self) -> &CurrentRepo {
        &self.current
    }
}

/// Entry point for context resolution, owned by the invocation.
pub struct ContextResolver {
    cache: TaskfileCache,
    remote: Arc<dyn RemoteSource>,
    current: CurrentRepoResolver,
}

impl ContextResolver {
    pub fn new(cache: TaskfileCache, remote: Arc<dyn RemoteSource>) -> Self {
        Self {
            cache,
            remote,
            current: CurrentRepoResolver::new(),
        }
    }

    pub fn cache(&self) -> &TaskfileCache {
        &self.cache
    }

    /// Resolves (or reuses) the current repository for `cwd`.
    pub async fn current_repo(&self, cwd: &Path) -> Result<CurrentRepo, ContextError> {
        self.current
            .resolve(cwd, &self.cache, self.remote.as_ref())
            .await
    }

    /// Builds the full execution context: current repository, configuration
    /// root, and the organizations carrying shared task configuration. Any
    /// failure aborts; no partial context is returned.
    pub async fn build_context(&self, cwd: &Path) -> Result<ExecutionContext, ContextError> {
        let current = self.current_repo(cwd).await?;
        self.cache.ensure_config_home()?;
        let orgs = self.active_orgs().await?;
        Ok(ExecutionContext {
            config_home: self.cache.config_home().to_path_buf(),
            orgs,
            current,
        })
    }

    /// Resolves the path the dispatcher hands to the task binary:
    /// `<config_home>/src/<org>/Taskfile.yml`, downloading the
    /// organization's configuration on first use.
    pub async fn resolve_taskfile_path(&self, cwd: &Path) -> Result<PathBuf, ContextError> {
        let context = self.build_context(cwd).await?;
        let org = &context.current().repo_owner;

        if !self
            .remote
            .org_has_repo(org, SHARED_CONFIG_REPO)
            .await
            .is_present()
        {
            return Err(ContextError::MissingSharedConfigRepo { org: org.clone() });
        }

        // populate() creates the directory on the download path; creating it
        // here first would register the org as cached before any download.
        let taskfile = self.cache.taskfile_path(org);
        if !taskfile.is_file() {
            self.cache.populate(org, self.remote.as_ref()).await?;
            if !taskfile.is_file() {
                return Err(ContextError::TaskfileMissingAfterDownload { path: taskfile });
            }
        }

        debug!("resolved taskfile at {}", taskfile.display());
        Ok(taskfile)
    }

    /// Organizations of the authenticated identity that expose the
    /// shared-configuration repository.
    async fn active_orgs(&self) -> Result<Vec<String>, ContextError> {
        let orgs = self.remote.list_member_orgs().await?;
        let mut active = Vec::new();
        for org in orgs {
            if self
                .remote
                .org_has_repo(&org, SHARED_CONFIG_REPO)
                .await
                .is_present()
            {
                active.push(org);
            }
        }
        Ok(active)
    }
}
