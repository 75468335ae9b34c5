//! GraphQL documents and variables sent to GitHub.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Maximum page size GitHub accepts for a connection.
pub const REPOSITORIES_PER_PAGE: u32 = 100;

/// Full-profile query, used for the first page.
///
/// Optional fragments are gated with `@include` so that GitHub only computes them on request.
/// The `calendar` collection uses GitHub's default one-year window ending now, independent of
/// `startTime`, so streaks always reflect recent activity.
pub const USER_INFO: &str = r"
query userInfo(
  $login: String!
  $first: Int!
  $after: String
  $includeMergedPullRequests: Boolean!
  $includeDiscussions: Boolean!
  $includeDiscussionsAnswers: Boolean!
  $startTime: DateTime = null
) {
  user(login: $login) {
    name
    login
    commits: contributionsCollection(from: $startTime) {
      totalCommitContributions
    }
    reviews: contributionsCollection {
      totalPullRequestReviewContributions
    }
    calendar: contributionsCollection {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST, REPOSITORY]) {
      totalCount
    }
    pullRequests(first: 1) {
      totalCount
    }
    mergedPullRequests: pullRequests(states: MERGED) @include(if: $includeMergedPullRequests) {
      totalCount
    }
    openIssues: issues(states: OPEN) {
      totalCount
    }
    closedIssues: issues(states: CLOSED) {
      totalCount
    }
    followers {
      totalCount
    }
    repositoryDiscussions @include(if: $includeDiscussions) {
      totalCount
    }
    repositoryDiscussionComments(onlyAnswers: true) @include(if: $includeDiscussionsAnswers) {
      totalCount
    }
    repositories(first: $first, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}, after: $after) {
      totalCount
      nodes {
        name
        stargazers {
          totalCount
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
";

/// Repository-only continuation query, used for every page after the first.
pub const USER_REPOSITORIES: &str = r"
query userRepos($login: String!, $first: Int!, $after: String) {
  user(login: $login) {
    repositories(first: $first, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}, after: $after) {
      totalCount
      nodes {
        name
        stargazers {
          totalCount
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
";

/// Optional fragments requested from the full-profile query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFlags {
    pub include_merged_pull_requests: bool,
    pub include_discussions: bool,
    pub include_discussion_answers: bool,
}

/// Variables shared by both queries; `after` is the pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    pub login: String,
    pub first: u32,
    pub after: Option<String>,
    pub include_merged_pull_requests: bool,
    pub include_discussions: bool,
    pub include_discussions_answers: bool,
    pub start_time: Option<DateTime<Utc>>,
}

impl QueryVariables {
    /// Variables for the first page of a user's profile.
    #[must_use]
    pub fn first_page(login: &str, flags: QueryFlags, start_time: Option<DateTime<Utc>>) -> Self {
        Self {
            login: login.to_string(),
            first: REPOSITORIES_PER_PAGE,
            after: None,
            include_merged_pull_requests: flags.include_merged_pull_requests,
            include_discussions: flags.include_discussions,
            include_discussions_answers: flags.include_discussion_answers,
            start_time,
        }
    }

    /// Variables for the continuation query, starting after `cursor`.
    #[must_use]
    pub fn next_page<'a>(&'a self, cursor: &'a str) -> PageVariables<'a> {
        PageVariables {
            login: &self.login,
            first: self.first,
            after: cursor,
        }
    }
}

/// Variables of the repository continuation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageVariables<'a> {
    pub login: &'a str,
    pub first: u32,
    pub after: &'a str,
}
