//! Rank scoring for aggregated statistics.
//!
//! The aggregator only depends on [`RankCalculator`]; [`PercentileRank`] is the default
//! scoring model.

use serde::Serialize;
use strum::Display;

/// Letter tier of a rank, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum RankLevel {
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    S,
    #[strum(serialize = "A+")]
    #[serde(rename = "A+")]
    APlus,
    #[strum(serialize = "A")]
    #[serde(rename = "A")]
    A,
    #[strum(serialize = "A-")]
    #[serde(rename = "A-")]
    AMinus,
    #[strum(serialize = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    #[strum(serialize = "B")]
    #[serde(rename = "B")]
    B,
    #[strum(serialize = "B-")]
    #[serde(rename = "B-")]
    BMinus,
    #[strum(serialize = "C+")]
    #[serde(rename = "C+")]
    CPlus,
    #[strum(serialize = "C")]
    #[serde(rename = "C")]
    C,
}

/// A user's rank: tier plus percentile, where lower percentiles are better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rank {
    pub level: RankLevel,
    pub percentile: f64,
}

impl Default for Rank {
    /// The baseline rank for users without meaningful activity.
    fn default() -> Self {
        Self {
            level: RankLevel::C,
            percentile: 100.0,
        }
    }
}

/// Metrics a rank is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankInputs {
    /// Whether `commits` is an all-time total rather than a one-year window.
    pub all_commits: bool,
    pub commits: u64,
    pub prs: u64,
    pub reviews: u64,
    pub issues: u64,
    pub repos: u64,
    pub stars: u64,
    pub followers: u64,
}

/// Turns aggregated metrics into a [`Rank`].
pub trait RankCalculator {
    fn rank(&self, inputs: &RankInputs) -> Rank;
}

/// Weighted blend of per-metric cumulative distributions.
///
/// Activity counts use an exponential CDF, popularity counts a heavier-tailed `x / (1 + x)`
/// curve; each is normalized by a typical (median) value for that metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileRank;

const COMMITS_MEDIAN: f64 = 250.0;
const ALL_COMMITS_MEDIAN: f64 = 1000.0;
const COMMITS_WEIGHT: f64 = 2.0;
const PRS_MEDIAN: f64 = 50.0;
const PRS_WEIGHT: f64 = 3.0;
const ISSUES_MEDIAN: f64 = 25.0;
const ISSUES_WEIGHT: f64 = 1.0;
const REVIEWS_MEDIAN: f64 = 2.0;
const REVIEWS_WEIGHT: f64 = 1.0;
const STARS_MEDIAN: f64 = 50.0;
const STARS_WEIGHT: f64 = 4.0;
const FOLLOWERS_MEDIAN: f64 = 10.0;
const FOLLOWERS_WEIGHT: f64 = 1.0;
const TOTAL_WEIGHT: f64 = COMMITS_WEIGHT + PRS_WEIGHT + ISSUES_WEIGHT + REVIEWS_WEIGHT + STARS_WEIGHT + FOLLOWERS_WEIGHT;

/// Upper percentile bound of each level, paired with that level.
const LEVELS: [(f64, RankLevel); 9] = [
    (1.0, RankLevel::S),
    (12.5, RankLevel::APlus),
    (25.0, RankLevel::A),
    (37.5, RankLevel::AMinus),
    (50.0, RankLevel::BPlus),
    (62.5, RankLevel::B),
    (75.0, RankLevel::BMinus),
    (87.5, RankLevel::CPlus),
    (100.0, RankLevel::C),
];

fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2.0_f64.powf(-x)
}

const fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}

#[expect(clippy::cast_precision_loss, reason = "counts far below 2^52 are exact")]
const fn ratio(value: u64, median: f64) -> f64 {
    value as f64 / median
}

impl RankCalculator for PercentileRank {
    fn rank(&self, inputs: &RankInputs) -> Rank {
        let commits_median = if inputs.all_commits { ALL_COMMITS_MEDIAN } else { COMMITS_MEDIAN };

        let score = COMMITS_WEIGHT * exponential_cdf(ratio(inputs.commits, commits_median))
            + PRS_WEIGHT * exponential_cdf(ratio(inputs.prs, PRS_MEDIAN))
            + ISSUES_WEIGHT * exponential_cdf(ratio(inputs.issues, ISSUES_MEDIAN))
            + REVIEWS_WEIGHT * exponential_cdf(ratio(inputs.reviews, REVIEWS_MEDIAN))
            + STARS_WEIGHT * log_normal_cdf(ratio(inputs.stars, STARS_MEDIAN))
            + FOLLOWERS_WEIGHT * log_normal_cdf(ratio(inputs.followers, FOLLOWERS_MEDIAN));

        let percentile = (1.0 - score / TOTAL_WEIGHT) * 100.0;
        if !percentile.is_finite() {
            return Rank::default();
        }

        LEVELS
            .iter()
            .find(|(bound, _)| percentile <= *bound)
            .map_or_else(Rank::default, |&(_, level)| Rank { level, percentile })
    }
}
