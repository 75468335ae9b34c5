//! Data collection and aggregation for GitHub user statistics
//!
//! This module talks to GitHub and folds the responses into a single
//! [`AggregatedStats`] record per user.
//!
//! # Implementation Model
//!
//! The [`Collector`] drives one aggregation:
//! - **Profile and repositories**: a full-profile GraphQL query for the first page, then
//!   repository-only continuation pages, ordered by star count and cut short once a page
//!   contains a repository without stars
//! - **All-time commits**: the commit search endpoint, used when the contribution window
//!   is not enough
//! - **Streaks**: computed from the contribution calendar against an injected "now"
//! - **Rank**: delegated to a [`RankCalculator`]
//!
//! All requests go through [`resilient_http`], which masks transient failures with
//! exponential backoff. Failures surface as a [`StatsError`]; partial records are never
//! produced.

mod collector;
mod error;
mod exclusions;
pub mod hosting;
mod rank;
pub mod resilient_http;
mod streak;
mod user_stats;

pub use collector::{Collector, StatsRequest};
pub use error::StatsError;
pub use exclusions::ExclusionSet;
pub use rank::{PercentileRank, Rank, RankCalculator, RankInputs, RankLevel};
pub use resilient_http::RetryPolicy;
pub use streak::{ContributionCalendar, ContributionDay, ContributionWeek, Streaks, compute_streaks};
pub use user_stats::AggregatedStats;
