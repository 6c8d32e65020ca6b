use crate::domain::IssueId;

/// Collection endpoint, relative to the API base URL.
pub const ISSUES_PATH: &str = "issues/";

const ISSUE_DETAIL_ROUTE_PREFIX: &str = "/viewissue";

/// Front-end route of the detail page for one issue.
pub fn issue_detail_route(issue_id: IssueId) -> String {
    format!("{ISSUE_DETAIL_ROUTE_PREFIX}/{}", issue_id.0)
}
