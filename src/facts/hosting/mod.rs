mod client;
mod commits;
mod queries;
mod repositories;
mod types;

pub use client::{Client, DEFAULT_API_BASE_URL, RateLimitInfo};
pub use commits::fetch_total_commits;
pub use queries::{PageVariables, QueryFlags, QueryVariables, REPOSITORIES_PER_PAGE, USER_INFO, USER_REPOSITORIES};
pub use repositories::{FetchedProfile, ProfileFetch, fetch_profile, should_fetch_next_page};
pub use types::{
    CalendarContributions, CommitContributions, GraphQlError, GraphQlResponse, PageInfo, RepositoriesData, RepositoriesOwner,
    RepositoryConnection, RepositoryNode, ReviewContributions, TotalCount, User, UserData,
};
