//! Typed wrapper around the `gh` CLI.
//!
//! Every remote operation this extension performs goes through the GitHub CLI
//! rather than a bespoke HTTP client: `gh` already owns authentication, host
//! configuration and pagination credentials, so we shell out to it and decode
//! its output. [`GhCli`] is the production implementation; [`RemoteSource`] is
//! the seam consumers (and tests) program against.

mod cli;
mod error;
mod orgs;
mod queries;
mod source;

pub use cli::GhCli;
pub use error::GhCliError;
pub use source::RemoteSource;
pub use source::RepoPresence;

/// Name of the repository expected to hold an organization's shared task
/// configuration.
pub const SHARED_CONFIG_REPO: &str = ".github";
