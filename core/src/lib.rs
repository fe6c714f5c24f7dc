//! Organization-context resolution and local-cache management for `gh-task`.
//!
//! Given the repository the command runs from, this crate determines the
//! owning organization, keeps a per-organization cache of the shared task
//! configuration under the user's config root, and assembles the immutable
//! [`context::ExecutionContext`] the command dispatcher consumes.

pub mod cache;
pub mod context;
pub mod current;
pub mod error;
pub mod git;
pub mod peer_deps;

pub use cache::TaskfileCache;
pub use context::ContextResolver;
pub use context::ExecutionContext;
pub use current::CurrentRepo;
pub use error::ContextError;
