use crate::config::Config;
use crate::facts::StatsError;
use crate::facts::exclusions::ExclusionSet;
use crate::facts::hosting::{Client, GraphQlError, ProfileFetch, QueryFlags, TotalCount, fetch_profile, fetch_total_commits};
use crate::facts::rank::{PercentileRank, RankCalculator, RankInputs};
use crate::facts::streak::{Streaks, compute_streaks};
use crate::facts::user_stats::AggregatedStats;
use crate::misc::wrap_text_multiline;
use chrono::{DateTime, NaiveDate, Utc};

/// Log target for collector
const LOG_TARGET: &str = " collector";

/// Width platform error messages are wrapped to before the first line is kept.
const ERROR_MESSAGE_WIDTH: usize = 90;

const USER_NOT_FOUND_FALLBACK: &str = "Could not fetch user.";
const GRAPHQL_FALLBACK: &str = "Something went wrong while trying to retrieve the stats data using the GraphQL API.";

/// Inputs for one aggregation.
#[derive(Debug, Clone, Default)]
pub struct StatsRequest {
    pub username: String,

    /// Use the all-time commit total from commit search instead of the contribution window.
    pub include_all_commits: bool,

    /// Repositories left out of the star total, on top of the configured ones.
    pub excluded_repos: Vec<String>,

    pub include_merged_prs: bool,
    pub include_discussions: bool,
    pub include_discussion_answers: bool,

    /// Start the commit contribution window on January 1 of this year (UTC).
    pub commits_since_year: Option<i32>,
}

impl StatsRequest {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    const fn query_flags(&self) -> QueryFlags {
        QueryFlags {
            include_merged_pull_requests: self.include_merged_prs,
            include_discussions: self.include_discussions,
            include_discussion_answers: self.include_discussion_answers,
        }
    }
}

/// Gathers a user's statistics from GitHub and folds them into an [`AggregatedStats`] record.
#[derive(Debug)]
pub struct Collector<R = PercentileRank> {
    client: Client,
    multi_page: bool,
    process_exclusions: Vec<String>,
    rank: R,
}

impl Collector {
    #[must_use]
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            multi_page: config.fetch_multi_page_stars,
            process_exclusions: config.exclude_repo.clone(),
            rank: PercentileRank,
        }
    }
}

impl<R: RankCalculator> Collector<R> {
    /// Replace the rank calculator.
    #[must_use]
    pub fn with_rank_calculator<C: RankCalculator>(self, rank: C) -> Collector<C> {
        Collector {
            client: self.client,
            multi_page: self.multi_page,
            process_exclusions: self.process_exclusions,
            rank,
        }
    }

    /// Collect and aggregate the statistics described by `request`.
    ///
    /// `now` is the point in time streaks are evaluated against.
    ///
    /// # Errors
    ///
    /// Fails without a partial record if the username is empty, GitHub reports an error for
    /// the profile query, a required value is missing, or a request fails after retries.
    pub async fn aggregate(&self, request: &StatsRequest, now: DateTime<Utc>) -> Result<AggregatedStats, StatsError> {
        if request.username.is_empty() {
            return Err(StatsError::MissingParameter("username"));
        }

        let login = request.username.as_str();
        let start_time = request.commits_since_year.and_then(commit_window_start);

        let profile = match fetch_profile(&self.client, login, request.query_flags(), start_time, self.multi_page).await? {
            ProfileFetch::Complete(profile) => profile,
            ProfileFetch::Rejected(errors) => {
                for e in &errors {
                    log::error!(
                        target: LOG_TARGET,
                        "GitHub reported an error for '{login}': {}",
                        e.message.as_deref().unwrap_or("<no message>")
                    );
                }
                return Err(classify_platform_errors(&errors));
            }
        };

        let user = profile.user;

        let display_name = user.name.filter(|name| !name.is_empty()).unwrap_or_else(|| user.login.clone());

        let total_commits = if request.include_all_commits {
            fetch_total_commits(&self.client, login).await?
        } else {
            required(
                user.commits.and_then(|c| c.total_commit_contributions),
                "contributionsCollection.totalCommitContributions",
            )?
        };

        let total_prs = required_count(user.pull_requests, "pullRequests.totalCount")?;
        let (total_prs_merged, merged_prs_percentage) = if request.include_merged_prs {
            let merged = required_count(user.merged_pull_requests, "mergedPullRequests.totalCount")?;
            (merged, merged_percentage(merged, total_prs))
        } else {
            (0, 0.0)
        };

        let total_reviews = required(
            user.reviews.and_then(|r| r.total_pull_request_review_contributions),
            "contributionsCollection.totalPullRequestReviewContributions",
        )?;

        let total_issues = required_count(user.open_issues, "openIssues.totalCount")?
            + required_count(user.closed_issues, "closedIssues.totalCount")?;

        let total_discussions_started = if request.include_discussions {
            required_count(user.repository_discussions, "repositoryDiscussions.totalCount")?
        } else {
            0
        };

        let total_discussions_answered = if request.include_discussion_answers {
            required_count(user.repository_discussion_comments, "repositoryDiscussionComments.totalCount")?
        } else {
            0
        };

        let contributed_to_count = required_count(user.repositories_contributed_to, "repositoriesContributedTo.totalCount")?;
        let followers = required_count(user.followers, "followers.totalCount")?;

        let streaks = user
            .calendar
            .and_then(|c| c.contribution_calendar)
            .map(|calendar| compute_streaks(&calendar, now.date_naive()))
            .unwrap_or_default();

        let exclusions = ExclusionSet::merge(&request.excluded_repos, &self.process_exclusions);
        let total_stars = exclusions.total_stars(&profile.repositories);

        let rank = self.rank.rank(&RankInputs {
            all_commits: request.include_all_commits,
            commits: total_commits,
            prs: total_prs,
            reviews: total_reviews,
            issues: total_issues,
            repos: profile.total_repositories,
            stars: total_stars,
            followers,
        });

        log::debug!(target: LOG_TARGET, "Aggregated statistics for '{login}': rank {} ({:.2})", rank.level, rank.percentile);

        let Streaks { current, longest } = streaks;

        Ok(AggregatedStats {
            display_name,
            total_commits,
            total_prs,
            total_prs_merged,
            merged_prs_percentage,
            total_reviews,
            total_issues,
            total_stars,
            total_discussions_started,
            total_discussions_answered,
            contributed_to_count,
            current_streak: current,
            longest_streak: longest,
            rank,
        })
    }
}

/// January 1 of `year`, midnight UTC.
fn commit_window_start(year: i32) -> Option<DateTime<Utc>> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|date| date.and_hms_opt(0, 0, 0));
    if start.is_none() {
        log::warn!(target: LOG_TARGET, "Ignoring out-of-range commit year {year}");
    }
    start.map(|naive| naive.and_utc())
}

/// Turn platform errors on the profile query into the matching [`StatsError`].
///
/// Only the first error is inspected.
fn classify_platform_errors(errors: &[GraphQlError]) -> StatsError {
    let Some(first) = errors.first() else {
        return StatsError::GraphQl(GRAPHQL_FALLBACK.to_string());
    };

    if first.is_not_found() {
        return StatsError::UserNotFound(first.message.clone().unwrap_or_else(|| USER_NOT_FOUND_FALLBACK.to_string()));
    }

    first
        .message
        .as_deref()
        .and_then(|message| wrap_text_multiline(message, ERROR_MESSAGE_WIDTH, 1).into_iter().next())
        .map_or_else(|| StatsError::GraphQl(GRAPHQL_FALLBACK.to_string()), StatsError::GraphQl)
}

/// Merged pull requests as a percentage of all pull requests; zero when there are none.
#[expect(clippy::cast_precision_loss, reason = "counts far below 2^52 are exact")]
fn merged_percentage(merged: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    (merged as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

fn required(value: Option<u64>, field: &str) -> Result<u64, StatsError> {
    value.ok_or_else(|| StatsError::upstream_data(field))
}

fn required_count(value: Option<TotalCount>, field: &str) -> Result<u64, StatsError> {
    required(value.map(|c| c.total_count), field)
}
