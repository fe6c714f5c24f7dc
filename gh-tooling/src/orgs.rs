//! Decoding of the paginated organization-membership query.

use serde::Deserialize;

use crate::error::GhCliError;

#[derive(Debug, Deserialize)]
struct OrgPageResponse {
    data: OrgPageData,
}

#[derive(Debug, Deserialize)]
struct OrgPageData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    organizations: OrganizationConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationConnection {
    nodes: Vec<OrgNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct OrgNode {
    login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

/// One decoded page: the logins it carries plus the cursor for the next page,
/// if any.
pub(crate) fn parse_org_page(
    command: &str,
    json: &str,
) -> Result<(Vec<String>, Option<String>), GhCliError> {
    let response: OrgPageResponse =
        serde_json::from_str(json).map_err(|source| GhCliError::Decode {
            command: command.to_string(),
            source,
        })?;
    let connection = response.data.viewer.organizations;
    let logins = connection
        .nodes
        .into_iter()
        .map(|node| node.login)
        .collect();
    let next_cursor = if connection.page_info.has_next_page {
        connection.page_info.end_cursor
    } else {
        None
    };
    Ok((logins, next_cursor))
}
