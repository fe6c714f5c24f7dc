use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors returned while invoking the `gh` CLI or decoding its output.
#[derive(Debug, Error)]
pub enum GhCliError {
    #[error("`gh` executable not found on PATH; install the GitHub CLI first")]
    GhNotFound(#[from] which::Error),

    #[error("gh command `{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("gh command `{command}` produced non-UTF-8 output")]
    OutputUtf8 {
        command: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("failed to decode output of gh command `{command}`")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
