use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;
use tracing::warn;

use crate::error::GhCliError;
use crate::orgs::parse_org_page;
use crate::queries;
use crate::source::RemoteSource;

/// Handle to the `gh` executable.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: PathBuf,
}

impl GhCli {
    /// Locates `gh` on `PATH`.
    pub fn discover() -> Result<Self, GhCliError> {
        let program = which::which("gh")?;
        Ok(Self { program })
    }

    /// Uses an explicit executable path instead of searching `PATH`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs `gh` with `args` and returns its stdout as UTF-8. A non-zero exit
    /// maps to [`GhCliError::CommandFailed`] carrying the captured stderr.
    async fn output(&self, args: &[OsString]) -> Result<String, GhCliError> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;
        let command = render_command(args);
        if !output.status.success() {
            return Err(GhCliError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout)
            .map_err(|source| GhCliError::OutputUtf8 { command, source })
    }
}

#[async_trait]
impl RemoteSource for GhCli {
    async fn list_repos(&self, org: &str) -> Result<Vec<String>, GhCliError> {
        let out = self.output(&queries::repo_list_args(org)).await?;
        Ok(out
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn download_file(
        &self,
        org: &str,
        file: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GhCliError> {
        let (args, out_path) = queries::download_file_args(org, file, dest_dir);
        self.output(&args).await?;
        debug!("downloaded {org}/{file} to {}", out_path.display());
        Ok(out_path)
    }

    async fn download_folder(
        &self,
        org: &str,
        folder: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GhCliError> {
        let (args, out_path) = queries::download_folder_args(org, folder, dest_dir);
        self.output(&args).await?;
        debug!("downloaded {org}/{folder}/ to {}", out_path.display());
        Ok(out_path)
    }

    async fn list_installed_extensions(&self) -> Result<String, GhCliError> {
        self.output(&queries::extension_list_args()).await
    }

    async fn install_extension(&self, name: &str) {
        if let Err(err) = self.output(&queries::extension_install_args(name)).await {
            warn!("best-effort install of extension {name} failed: {err}");
        }
    }

    async fn list_member_orgs(&self) -> Result<Vec<String>, GhCliError> {
        let mut orgs = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let args = queries::org_page_args(cursor.as_deref());
            let command = render_command(&args);
            let out = self.output(&args).await?;
            let (page, next_cursor) = parse_org_page(&command, &out)?;
            orgs.extend(page);
            match next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(orgs)
    }
}

fn render_command(args: &[OsString]) -> String {
    let mut rendered = OsString::from("gh");
    for arg in args {
        rendered.push(OsStr::new(" "));
        rendered.push(arg);
    }
    rendered.to_string_lossy().into_owned()
}
