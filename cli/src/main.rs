use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use ghtask_core::ContextResolver;
use ghtask_core::TaskfileCache;
use ghtask_core::current::invocation_dir;
use ghtask_gh_tooling::GhCli;
use tracing_subscriber::EnvFilter;

mod dispatch;

/// GitHub CLI extension for organization-level taskfile execution.
///
/// Resolves the `Taskfile.yml` shared through the organization's `.github`
/// repository (downloading it into the local cache on first use) and runs the
/// `task` binary against it. All arguments are forwarded verbatim.
#[derive(Debug, Parser)]
#[clap(bin_name = "gh task", version)]
struct Cli {
    /// Print the path to the Taskfile instead of executing it.
    #[clap(long, short = 'p')]
    print_path: bool,

    /// Arguments forwarded to the task binary.
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

#[tokio::main]
async fn main() {
    let default_level = "error";
    let _ = tracing_subscriber::fmt()
        // Fall back to `default_level` if the environment variable is unset
        // or holds an invalid filter.
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let cwd = invocation_dir()?;
    let remote = Arc::new(GhCli::discover()?);
    let cache = TaskfileCache::discover()?;
    let resolver = ContextResolver::new(cache, remote);

    let taskfile = resolver.resolve_taskfile_path(&cwd).await?;

    if cli.print_path {
        println!("{}", taskfile.display());
        return Ok(0);
    }

    dispatch::run_task(&taskfile, &cwd, &cli.args).await
}
