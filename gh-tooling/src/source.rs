use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GhCliError;

/// Whether an organization exposes a given repository.
///
/// `Unknown` records that the listing query itself failed. Callers that only
/// need a yes/no answer collapse it through [`RepoPresence::is_present`],
/// which treats a failed query the same as an absent repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoPresence {
    Present,
    Absent,
    Unknown,
}

impl RepoPresence {
    /// Fail-closed view: `Unknown` collapses into `false`.
    pub fn is_present(self) -> bool {
        matches!(self, RepoPresence::Present)
    }
}

/// Remote operations against the collaboration platform.
///
/// The production implementation is [`crate::GhCli`]; tests substitute their
/// own. All operations are request/response with no local side effects beyond
/// what the caller asks for (the download destinations).
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Lists the non-archived, public, source repositories of `org`. The
    /// filter set is fixed policy, not configurable.
    async fn list_repos(&self, org: &str) -> Result<Vec<String>, GhCliError>;

    /// Downloads a single file from `<org>/.github` into `dest_dir` and
    /// returns the downloaded path.
    async fn download_file(
        &self,
        org: &str,
        file: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GhCliError>;

    /// Downloads a folder from `<org>/.github` into `dest_dir` and returns
    /// the downloaded path.
    async fn download_folder(
        &self,
        org: &str,
        folder: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GhCliError>;

    /// Raw output of the installed-extension listing.
    async fn list_installed_extensions(&self) -> Result<String, GhCliError>;

    /// Best-effort install of an extension. The outcome is deliberately not
    /// reported: callers record that the attempt happened, nothing more.
    async fn install_extension(&self, name: &str);

    /// Organizations the authenticated identity belongs to, following
    /// pagination cursors until exhausted.
    async fn list_member_orgs(&self) -> Result<Vec<String>, GhCliError>;

    /// Whether `org` exposes `repo`, built from [`RemoteSource::list_repos`].
    /// A failed listing yields `Unknown` rather than an error.
    async fn org_has_repo(&self, org: &str, repo: &str) -> RepoPresence {
        match self.list_repos(org).await {
            Ok(repos) if repos.iter().any(|name| name == repo) => RepoPresence::Present,
            Ok(_) => RepoPresence::Absent,
            Err(err) => {
                debug!("repo listing for {org} failed: {err}");
                RepoPresence::Unknown
            }
        }
    }
}
