//! Response shapes for the GitHub GraphQL queries.
//!
//! Count fragments are optional: several are only requested when the matching feature flag
//! is set, and the aggregator decides which absences are errors.

use crate::facts::streak::ContributionCalendar;
use serde::Deserialize;

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Splits the response into its data, or the platform errors it carries.
    ///
    /// # Errors
    ///
    /// Returns the error list when the response reports at least one error.
    pub fn into_result(self) -> Result<Option<T>, Vec<GraphQlError>> {
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(errors),
            _ => Ok(self.data),
        }
    }
}

/// A platform-level error reported inside a GraphQL response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

impl GraphQlError {
    /// Whether GitHub says the requested account does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind.as_deref() == Some("NOT_FOUND")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

/// Payload of the full-profile query.
#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<User>,
}

/// Payload of the repository continuation query.
#[derive(Debug, Deserialize)]
pub struct RepositoriesData {
    pub user: Option<RepositoriesOwner>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoriesOwner {
    pub repositories: Option<RepositoryConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: Option<String>,
    pub login: String,
    pub commits: Option<CommitContributions>,
    pub reviews: Option<ReviewContributions>,
    pub calendar: Option<CalendarContributions>,
    pub repositories_contributed_to: Option<TotalCount>,
    pub pull_requests: Option<TotalCount>,
    pub merged_pull_requests: Option<TotalCount>,
    pub open_issues: Option<TotalCount>,
    pub closed_issues: Option<TotalCount>,
    pub followers: Option<TotalCount>,
    pub repository_discussions: Option<TotalCount>,
    pub repository_discussion_comments: Option<TotalCount>,
    pub repositories: Option<RepositoryConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitContributions {
    pub total_commit_contributions: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewContributions {
    pub total_pull_request_review_contributions: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarContributions {
    pub contribution_calendar: Option<ContributionCalendar>,
}

/// One page of a user's repositories.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    pub total_count: Option<u64>,
    #[serde(default)]
    pub nodes: Vec<RepositoryNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A repository owned by the user, with its star count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRepositoryNode")]
pub struct RepositoryNode {
    pub name: String,
    pub star_count: u64,
}

impl RepositoryNode {
    #[must_use]
    pub fn new(name: impl Into<String>, star_count: u64) -> Self {
        Self {
            name: name.into(),
            star_count,
        }
    }
}

#[derive(Deserialize)]
struct RawRepositoryNode {
    name: String,
    stargazers: TotalCount,
}

impl From<RawRepositoryNode> for RepositoryNode {
    fn from(raw: RawRepositoryNode) -> Self {
        Self {
            name: raw.name,
            star_count: raw.stargazers.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_not_found_response() {
        let json = r#"{
            "data": { "user": null },
            "errors": [
                {
                    "type": "NOT_FOUND",
                    "path": ["user"],
                    "message": "Could not resolve to a User with the login of 'ghost-user'."
                }
            ]
        }"#;

        let response: GraphQlResponse<UserData> = serde_json::from_str(json).unwrap();
        let errors = response.into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_not_found());
    }

    #[test]
    fn test_empty_error_list_is_success() {
        let json = r#"{ "data": { "user": null }, "errors": [] }"#;
        let response: GraphQlResponse<UserData> = serde_json::from_str(json).unwrap();
        let data = response.into_result().unwrap().unwrap();
        assert!(data.user.is_none());
    }

    #[test]
    fn test_repository_node_flattens_stargazers() {
        let json = r#"{ "name": "octo", "stargazers": { "totalCount": 42 } }"#;
        let node: RepositoryNode = serde_json::from_str(json).unwrap();
        assert_eq!(node, RepositoryNode::new("octo", 42));
    }

    #[test]
    fn test_deserialize_user_without_optional_fragments() {
        let json = r#"{
            "name": null,
            "login": "octocat",
            "commits": { "totalCommitContributions": 12 },
            "reviews": { "totalPullRequestReviewContributions": 3 },
            "repositoriesContributedTo": { "totalCount": 4 },
            "pullRequests": { "totalCount": 5 },
            "openIssues": { "totalCount": 1 },
            "closedIssues": { "totalCount": 2 },
            "followers": { "totalCount": 7 },
            "repositories": {
                "totalCount": 1,
                "nodes": [ { "name": "hello", "stargazers": { "totalCount": 9 } } ],
                "pageInfo": { "hasNextPage": false, "endCursor": "Y3Vyc29yOjE=" }
            }
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert!(user.name.is_none());
        assert!(user.merged_pull_requests.is_none());
        assert!(user.repository_discussions.is_none());
        assert!(user.calendar.is_none());

        let repositories = user.repositories.unwrap();
        assert_eq!(repositories.total_count, Some(1));
        assert_eq!(repositories.nodes, vec![RepositoryNode::new("hello", 9)]);
        assert!(!repositories.page_info.has_next_page);
    }
}
