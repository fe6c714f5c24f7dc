//! Local git queries used to derive the current repository.
//!
//! Everything here is advisory or detection-only; no state is mutated. Each
//! query shells out to `git` in the given directory and treats any failure as
//! "no answer" rather than an error.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Remotes consulted for the repository identity, in preference order.
const REMOTE_PREFERENCE: &[&str] = &["upstream", "github", "origin"];

/// Owner and name parsed from a GitHub-style remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub owner: String,
    pub name: String,
}

async fn git_output(cwd: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let out = String::from_utf8(output.stdout).ok()?;
    let out = out.trim();
    (!out.is_empty()).then(|| out.to_string())
}

/// Name of the checked-out branch, or `None` for detached `HEAD`, a
/// non-repository directory, or any git failure.
pub async fn current_branch(cwd: &Path) -> Option<String> {
    git_output(cwd, &["branch", "--show-current"]).await
}

/// Repository identity from the first configured remote in
/// [`REMOTE_PREFERENCE`] that parses as `<owner>/<name>`.
pub async fn detect_repo(cwd: &Path) -> Option<RemoteRepo> {
    for remote in REMOTE_PREFERENCE {
        let key = format!("remote.{remote}.url");
        let Some(url) = git_output(cwd, &["config", "--get", &key]).await else {
            continue;
        };
        if let Some(repo) = parse_remote_url(&url) {
            return Some(repo);
        }
    }
    None
}

/// Parses `owner/name` out of the common remote URL shapes:
/// `git@host:owner/name.git`, `ssh://git@host/owner/name` and
/// `https://host/owner/name`.
fn parse_remote_url(url: &str) -> Option<RemoteRepo> {
    let url = url.trim();
    let path = if let Some((_, rest)) = url.split_once("://") {
        // scheme://[user@]host/owner/name
        let (_, path) = rest.split_once('/')?;
        path
    } else if let Some((prefix, path)) = url.split_once(':') {
        // scp-like git@host:owner/name
        if !prefix.contains('@') {
            return None;
        }
        path
    } else {
        return None;
    };

    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let owner = segments.next()?;
    let name = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    Some(RemoteRepo {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
