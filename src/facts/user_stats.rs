use crate::facts::rank::Rank;
use serde::Serialize;

/// Everything the aggregator reports about one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStats {
    /// Profile name, or the login when the profile has none.
    pub display_name: String,

    pub total_commits: u64,

    #[serde(rename = "totalPRs")]
    pub total_prs: u64,

    /// Zero unless merged pull requests were requested.
    #[serde(rename = "totalPRsMerged")]
    pub total_prs_merged: u64,

    /// Share of pull requests that were merged, in `[0, 100]`.
    #[serde(rename = "mergedPRsPercentage")]
    pub merged_prs_percentage: f64,

    pub total_reviews: u64,
    pub total_issues: u64,

    /// Stars across owned repositories, exclusions removed.
    pub total_stars: u64,

    pub total_discussions_started: u64,
    pub total_discussions_answered: u64,
    pub contributed_to_count: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub rank: Rank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::rank::RankLevel;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let stats = AggregatedStats {
            display_name: "The Octocat".to_string(),
            total_commits: 12,
            total_prs: 4,
            total_prs_merged: 2,
            merged_prs_percentage: 50.0,
            total_reviews: 1,
            total_issues: 3,
            total_stars: 99,
            total_discussions_started: 0,
            total_discussions_answered: 0,
            contributed_to_count: 7,
            current_streak: 2,
            longest_streak: 9,
            rank: Rank::default(),
        };

        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["displayName"], "The Octocat");
        assert_eq!(json["totalPRs"], 4);
        assert_eq!(json["totalPRsMerged"], 2);
        assert_eq!(json["mergedPRsPercentage"], 50.0);
        assert_eq!(json["contributedToCount"], 7);
        assert_eq!(json["longestStreak"], 9);
        assert_eq!(json["rank"]["level"], RankLevel::C.to_string());
        assert_eq!(json["rank"]["percentile"], 100.0);
    }
}
