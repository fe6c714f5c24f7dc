use std::path::PathBuf;

use ghtask_gh_tooling::GhCliError;
use thiserror::Error;

/// Fatal errors from context resolution. Each bubbles up unchanged to the
/// dispatch boundary, which prints it and exits non-zero; nothing here is
/// retried internally.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("not inside a git repository with a recognized GitHub remote")]
    NotAGitHubRepository,

    #[error("could not determine the working directory")]
    WorkingDir(#[source] std::io::Error),

    #[error("gh-task: .github repo required for organization {org}")]
    MissingSharedConfigRepo { org: String },

    #[error("taskfile not found at {} even after download", path.display())]
    TaskfileMissingAfterDownload { path: PathBuf },

    #[error(transparent)]
    Remote(#[from] GhCliError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
