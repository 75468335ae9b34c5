//! Cursor-paginated walk over a user's repositories.
//!
//! The first page comes from the full-profile query, so it also carries every other field the
//! aggregator needs. Later pages use the repository-only continuation query. Repositories are
//! ordered by star count, which lets the walk stop as soon as a page contains a repository
//! without stars.

use crate::facts::StatsError;
use crate::facts::hosting::Client;
use crate::facts::hosting::queries::{self, QueryFlags, QueryVariables};
use crate::facts::hosting::types::{GraphQlError, GraphQlResponse, PageInfo, RepositoriesData, RepositoryConnection, RepositoryNode, User, UserData};
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = "     repos";

/// Outcome of a profile fetch.
#[derive(Debug)]
pub enum ProfileFetch {
    /// Every page needed was fetched.
    Complete(FetchedProfile),

    /// A page carried platform errors; they are handed back untouched and nothing is merged.
    Rejected(Vec<GraphQlError>),
}

/// The first page's profile plus the repositories gathered across all pages.
#[derive(Debug)]
pub struct FetchedProfile {
    /// Profile fields from the first page. Its `repositories` connection has been moved out.
    pub user: User,

    /// Repositories in the order GitHub returned them, highest star count first.
    pub repositories: Vec<RepositoryNode>,

    /// Number of repositories the user owns, including any that were not fetched.
    pub total_repositories: u64,
}

/// Where the walk stands after a page; only lives for one fetch.
#[derive(Debug, Default)]
struct PaginationState {
    cursor: Option<String>,
    has_more: bool,
}

impl PaginationState {
    fn after(page_info: &PageInfo, multi_page: bool, nodes: &[RepositoryNode]) -> Self {
        let has_more = should_fetch_next_page(multi_page, nodes, page_info.has_next_page);

        if page_info.has_next_page && !has_more {
            if multi_page {
                log::debug!(target: LOG_TARGET, "Page contains a repository without stars; not requesting further pages");
            } else {
                log::debug!(target: LOG_TARGET, "Multi-page fetching is disabled; not requesting further pages");
            }
        }

        Self {
            cursor: page_info.end_cursor.clone(),
            has_more,
        }
    }
}

/// Whether another page is worth requesting.
///
/// Requires multi-page fetching to be enabled, GitHub to report a next page, and every
/// repository on the current page to have at least one star. A zero-star repository on a page
/// ordered by stars means the remaining repositories add nothing to the star total.
#[must_use]
pub fn should_fetch_next_page(multi_page: bool, nodes: &[RepositoryNode], has_next_page: bool) -> bool {
    multi_page && has_next_page && nodes.iter().all(|node| node.star_count > 0)
}

/// Fetch a user's profile and repositories, following pages while worthwhile.
///
/// Pages are requested strictly one after another since each cursor comes from the previous
/// page. Transport failures abort the walk with [`StatsError::Request`].
pub async fn fetch_profile(
    client: &Client,
    login: &str,
    flags: QueryFlags,
    start_time: Option<DateTime<Utc>>,
    multi_page: bool,
) -> Result<ProfileFetch, StatsError> {
    let variables = QueryVariables::first_page(login, flags, start_time);

    log::debug!(target: LOG_TARGET, "Requesting profile and first repository page for '{login}'");
    let first: GraphQlResponse<UserData> = client.graphql(queries::USER_INFO, &variables).await?;

    let mut user = match first.into_result() {
        Ok(data) => data.and_then(|d| d.user).ok_or_else(|| StatsError::upstream_data("user"))?,
        Err(errors) => return Ok(ProfileFetch::Rejected(errors)),
    };

    let connection = user.repositories.take().ok_or_else(|| StatsError::upstream_data("repositories"))?;
    let total_repositories = connection.total_count.ok_or_else(|| StatsError::upstream_data("repositories.totalCount"))?;

    let mut state = PaginationState::after(&connection.page_info, multi_page, &connection.nodes);
    let mut repositories = connection.nodes;
    let mut page_count = 1;

    while state.has_more {
        let Some(cursor) = state.cursor.take() else {
            log::debug!(target: LOG_TARGET, "GitHub reported another page without a cursor; stopping");
            break;
        };

        page_count += 1;

        log::debug!(target: LOG_TARGET, "Requesting repository page {page_count} for '{login}'");
        let next: GraphQlResponse<RepositoriesData> = client.graphql(queries::USER_REPOSITORIES, &variables.next_page(&cursor)).await?;

        let page = match next.into_result() {
            Ok(data) => continuation_page(data)?,
            Err(errors) => return Ok(ProfileFetch::Rejected(errors)),
        };

        state = PaginationState::after(&page.page_info, multi_page, &page.nodes);
        repositories.extend(page.nodes);
    }

    log::debug!(
        target: LOG_TARGET,
        "Fetched {} of {total_repositories} repositories for '{login}' in {page_count} page(s)",
        repositories.len()
    );

    Ok(ProfileFetch::Complete(FetchedProfile {
        user,
        repositories,
        total_repositories,
    }))
}

fn continuation_page(data: Option<RepositoriesData>) -> Result<RepositoryConnection, StatsError> {
    data.and_then(|d| d.user)
        .and_then(|owner| owner.repositories)
        .ok_or_else(|| StatsError::upstream_data("repositories"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starred_page(count: usize) -> Vec<RepositoryNode> {
        (0..count).map(|i| RepositoryNode::new(format!("repo-{i}"), 1000 - i as u64)).collect()
    }

    #[test]
    fn test_full_starred_page_continues() {
        assert!(should_fetch_next_page(true, &starred_page(100), true));
    }

    #[test]
    fn test_zero_star_repository_stops() {
        let mut nodes = starred_page(100);
        nodes[99].star_count = 0;
        assert!(!should_fetch_next_page(true, &nodes, true));
    }

    #[test]
    fn test_disabled_multi_page_stops() {
        assert!(!should_fetch_next_page(false, &starred_page(100), true));
    }

    #[test]
    fn test_last_page_stops() {
        assert!(!should_fetch_next_page(true, &starred_page(100), false));
    }

    #[test]
    fn test_pagination_state_tracks_cursor() {
        let page_info = PageInfo {
            has_next_page: true,
            end_cursor: Some("Y3Vyc29yOjEwMA==".to_string()),
        };

        let state = PaginationState::after(&page_info, true, &starred_page(3));
        assert!(state.has_more);
        assert_eq!(state.cursor.as_deref(), Some("Y3Vyc29yOjEwMA=="));
    }

    #[test]
    fn test_missing_continuation_user_is_upstream_error() {
        let data = RepositoriesData { user: None };
        assert!(matches!(continuation_page(Some(data)), Err(StatsError::UpstreamData(_))));
        assert!(matches!(continuation_page(None), Err(StatsError::UpstreamData(_))));
    }
}
