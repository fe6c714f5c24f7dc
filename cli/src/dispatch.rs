//! Launch of the external task binary with transparent stdio.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;

const TASK_BIN: &str = "task";

/// `--taskfile <path> --dir <cwd>` followed by the forwarded arguments.
fn task_argv(taskfile: &Path, dir: &Path, forwarded: &[OsString]) -> Vec<OsString> {
    let mut argv = vec![
        OsString::from("--taskfile"),
        taskfile.as_os_str().to_os_string(),
        OsString::from("--dir"),
        dir.as_os_str().to_os_string(),
    ];
    argv.extend(forwarded.iter().cloned());
    argv
}

/// Runs the task binary with inherited stdio and returns its exit code. A
/// signal-terminated child (no exit code) maps to `1`, as does any spawn
/// failure at the caller.
pub(crate) async fn run_task(
    taskfile: &Path,
    dir: &Path,
    forwarded: &[OsString],
) -> anyhow::Result<i32> {
    let status = Command::new(TASK_BIN)
        .args(task_argv(taskfile, dir, forwarded))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("failed to launch `{TASK_BIN}`"))?;
    Ok(status.code().unwrap_or(1))
}
