//! Argument vectors for the fixed set of `gh` invocations this crate issues.
//!
//! Kept as plain constructors so the exact command lines stay testable
//! without spawning anything.

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// GraphQL document for one page of the viewer's organization memberships.
pub(crate) const ORG_PAGE_QUERY: &str = "query($cursor: String) { viewer { organizations(first: 100, after: $cursor) { nodes { login } pageInfo { hasNextPage endCursor } } } }";

/// `gh repo list` filtered to non-archived, public, source repositories.
pub(crate) fn repo_list_args(org: &str) -> Vec<OsString> {
    [
        "repo",
        "list",
        org,
        "-L",
        "100",
        "--no-archived",
        "--source",
        "--visibility",
        "public",
        "--json",
        "name",
        "--jq",
        ".[].name",
    ]
    .into_iter()
    .map(OsString::from)
    .collect()
}

/// `gh download <org>/.github <asset> --outfile <dest>/<asset>`.
///
/// Requires the `gh-download` peer extension; also returns the destination
/// path the file lands at.
pub(crate) fn download_file_args(
    org: &str,
    asset: &str,
    dest_dir: &Path,
) -> (Vec<OsString>, PathBuf) {
    let out_path = dest_dir.join(asset);
    let args = vec![
        OsString::from("download"),
        OsString::from(format!("{org}/{}", crate::SHARED_CONFIG_REPO)),
        OsString::from(asset),
        OsString::from("--outfile"),
        out_path.as_os_str().to_os_string(),
    ];
    (args, out_path)
}

/// `gh download <org>/.github <asset> --outdir <dest>/<asset>`.
pub(crate) fn download_folder_args(
    org: &str,
    asset: &str,
    dest_dir: &Path,
) -> (Vec<OsString>, PathBuf) {
    let out_path = dest_dir.join(asset);
    let args = vec![
        OsString::from("download"),
        OsString::from(format!("{org}/{}", crate::SHARED_CONFIG_REPO)),
        OsString::from(asset),
        OsString::from("--outdir"),
        out_path.as_os_str().to_os_string(),
    ];
    (args, out_path)
}

pub(crate) fn extension_list_args() -> Vec<OsString> {
    vec![OsString::from("extension"), OsString::from("list")]
}

pub(crate) fn extension_install_args(name: &str) -> Vec<OsString> {
    vec![
        OsString::from("extension"),
        OsString::from("install"),
        OsString::from(name),
    ]
}

/// One page of the organization membership query. `cursor` is absent on the
/// first page.
pub(crate) fn org_page_args(cursor: Option<&str>) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("api"),
        OsString::from("graphql"),
        OsString::from("-f"),
        OsString::from(format!("query={ORG_PAGE_QUERY}")),
    ];
    if let Some(cursor) = cursor {
        args.push(OsString::from("-f"));
        args.push(OsString::from(format!("cursor={cursor}")));
    }
    args
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn repo_list_uses_fixed_filters() {
        assert_eq!(
            strings(&repo_list_args("acme")),
            vec![
                "repo",
                "list",
                "acme",
                "-L",
                "100",
                "--no-archived",
                "--source",
                "--visibility",
                "public",
                "--json",
                "name",
                "--jq",
                ".[].name",
            ]
        );
    }

    #[test]
    fn download_file_targets_shared_config_repo() {
        let (args, out) = download_file_args("acme", "Taskfile.yml", Path::new("/tmp/cache"));
        assert_eq!(out, PathBuf::from("/tmp/cache/Taskfile.yml"));
        assert_eq!(
            strings(&args),
            vec![
                "download",
                "acme/.github",
                "Taskfile.yml",
                "--outfile",
                "/tmp/cache/Taskfile.yml",
            ]
        );
    }

    #[test]
    fn download_folder_uses_outdir() {
        let (args, out) = download_folder_args("acme", "taskfiles", Path::new("/tmp/cache"));
        assert_eq!(out, PathBuf::from("/tmp/cache/taskfiles"));
        assert_eq!(
            strings(&args),
            vec![
                "download",
                "acme/.github",
                "taskfiles",
                "--outdir",
                "/tmp/cache/taskfiles",
            ]
        );
    }

    #[test]
    fn org_page_args_omit_cursor_on_first_page() {
        let first = strings(&org_page_args(None));
        assert_eq!(first.len(), 4);
        assert!(first[3].starts_with("query="));

        let rest = strings(&org_page_args(Some("abc123")));
        assert_eq!(rest[4], "-f");
        assert_eq!(rest[5], "cursor=abc123");
    }
}
