//! Shared fixtures: an in-memory remote source and throwaway git repos.

// Each integration-test crate pulls in this module and uses a different
// subset of it.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ghtask_gh_tooling::GhCliError;
use ghtask_gh_tooling::RemoteSource;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    ListRepos(String),
    DownloadFile(String, String),
    DownloadFolder(String, String),
    ListExtensions,
    InstallExtension(String),
    ListOrgs,
}

/// Scripted [`RemoteSource`] recording every call it serves.
pub struct MockRemote {
    repos: BTreeMap<String, Vec<String>>,
    installed_extensions: String,
    extension_listing_delay: Option<Duration>,
    calls: Mutex<Vec<RemoteCall>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            repos: BTreeMap::new(),
            installed_extensions: "gh download  yuler/gh-download  v1.1.0".to_string(),
            extension_listing_delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Registers `org` with the given repositories.
    pub fn with_org(mut self, org: &str, repos: &[&str]) -> Self {
        self.repos
            .insert(org.to_string(), repos.iter().map(|r| (*r).to_string()).collect());
        self
    }

    pub fn with_installed_extensions(mut self, text: &str) -> Self {
        self.installed_extensions = text.to_string();
        self
    }

    /// Delays the extension listing so the peer-dependency check finishes
    /// after the branch lookup.
    pub fn with_extension_listing_delay(mut self, delay: Duration) -> Self {
        self.extension_listing_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of download operations served (file and folder combined).
    pub fn download_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    RemoteCall::DownloadFile(_, _) | RemoteCall::DownloadFolder(_, _)
                )
            })
            .count()
    }

    pub fn count_of(&self, wanted: &RemoteCall) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RemoteSource for MockRemote {
    async fn list_repos(&self, org: &str) -> Result<Vec<String>, GhCliError> {
        self.record(RemoteCall::ListRepos(org.to_string()));
        Ok(self.repos.get(org).cloned().unwrap_or_default())
    }

    async fn download_file(
        &self,
        org: &str,
        file: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GhCliError> {
        self.record(RemoteCall::DownloadFile(org.to_string(), file.to_string()));
        let path = dest_dir.join(file);
        std::fs::write(&path, "version: '3'\n\ntasks:\n  hello:\n    cmds:\n      - echo hi\n")?;
        Ok(path)
    }

    async fn download_folder(
        &self,
        org: &str,
        folder: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GhCliError> {
        self.record(RemoteCall::DownloadFolder(org.to_string(), folder.to_string()));
        let path = dest_dir.join(folder);
        std::fs::create_dir_all(&path)?;
        std::fs::write(path.join("lint.yml"), "version: '3'\n")?;
        Ok(path)
    }

    async fn list_installed_extensions(&self) -> Result<String, GhCliError> {
        self.record(RemoteCall::ListExtensions);
        if let Some(delay) = self.extension_listing_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.installed_extensions.clone())
    }

    async fn install_extension(&self, name: &str) {
        self.record(RemoteCall::InstallExtension(name.to_string()));
    }

    async fn list_member_orgs(&self) -> Result<Vec<String>, GhCliError> {
        self.record(RemoteCall::ListOrgs);
        Ok(self.repos.keys().cloned().collect())
    }
}

/// Runs `git` in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Fresh repository on branch `trunk` with `origin` pointing at `remote_url`.
pub fn git_fixture(remote_url: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q", "-b", "trunk"]);
    git(dir.path(), &["remote", "add", "origin", remote_url]);
    dir
}

/// Like [`git_fixture`], but with `HEAD` detached so no branch name resolves.
pub fn detached_git_fixture(remote_url: &str) -> TempDir {
    let dir = git_fixture(remote_url);
    git(
        dir.path(),
        &[
            "-c",
            "user.name=test",
            "-c",
            "user.email=test@example.com",
            "commit",
            "--allow-empty",
            "-q",
            "-m",
            "init",
        ],
    );
    git(dir.path(), &["checkout", "-q", "--detach"]);
    dir
}
