//! Detection (and best-effort install) of peer `gh` extensions.

use std::collections::HashMap;

use ghtask_gh_tooling::RemoteSource;
use tracing::debug;

/// Extensions the download queries depend on.
pub const PEER_EXTENSIONS: &[&str] = &["yuler/gh-download"];

/// Availability of one peer capability. `Unknown` means the extension listing
/// itself failed, which the public map collapses into "unavailable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    Available,
    Missing,
    Unknown,
}

impl CapabilityStatus {
    pub fn is_available(self) -> bool {
        matches!(self, CapabilityStatus::Available)
    }
}

/// Outcome of one peer-dependency pass.
#[derive(Debug, Default)]
pub struct PeerDepsReport {
    statuses: HashMap<String, CapabilityStatus>,
    attempted_installs: Vec<String>,
}

impl PeerDepsReport {
    pub fn status(&self, name: &str) -> CapabilityStatus {
        self.statuses
            .get(name)
            .copied()
            .unwrap_or(CapabilityStatus::Unknown)
    }

    /// Capability name to available flag, with `Unknown` collapsed to
    /// `false`.
    pub fn availability(&self) -> HashMap<String, bool> {
        self.statuses
            .iter()
            .map(|(name, status)| (name.clone(), status.is_available()))
            .collect()
    }

    /// Extensions an install was attempted for, in check order. The attempts
    /// are best-effort; nothing records whether they succeeded.
    pub fn attempted_installs(&self) -> &[String] {
        &self.attempted_installs
    }
}

/// Checks each required capability against the installed-extension listing.
/// Missing ones trigger a best-effort install whose result is ignored. A
/// failed listing yields an all-unknown report instead of an error.
pub async fn check_peer_deps(remote: &dyn RemoteSource) -> PeerDepsReport {
    let mut report = PeerDepsReport::default();

    let installed = match remote.list_installed_extensions().await {
        Ok(text) => text,
        Err(err) => {
            debug!("extension listing failed: {err}");
            for ext in PEER_EXTENSIONS {
                report
                    .statuses
                    .insert((*ext).to_string(), CapabilityStatus::Unknown);
            }
            return report;
        }
    };

    for ext in PEER_EXTENSIONS {
        if installed.contains(ext) {
            report
                .statuses
                .insert((*ext).to_string(), CapabilityStatus::Available);
        } else {
            report
                .statuses
                .insert((*ext).to_string(), CapabilityStatus::Missing);
            remote.install_extension(ext).await;
            report.attempted_installs.push((*ext).to_string());
        }
    }
    report
}
