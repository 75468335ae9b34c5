use crate::Result;
use crate::facts::AggregatedStats;
use core::fmt::Write;

pub fn generate<W: Write>(stats: &AggregatedStats, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(stats)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Rank, RankLevel};

    #[test]
    fn test_json_report_round_trips_through_value() {
        let stats = AggregatedStats {
            display_name: "octocat".to_string(),
            total_commits: 321,
            total_prs: 10,
            total_prs_merged: 0,
            merged_prs_percentage: 0.0,
            total_reviews: 4,
            total_issues: 6,
            total_stars: 1500,
            total_discussions_started: 0,
            total_discussions_answered: 0,
            contributed_to_count: 12,
            current_streak: 0,
            longest_streak: 14,
            rank: Rank {
                level: RankLevel::AMinus,
                percentile: 30.5,
            },
        };

        let mut output = String::new();
        generate(&stats, &mut output).unwrap();

        assert!(output.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["displayName"], "octocat");
        assert_eq!(value["totalStars"], 1500);
        assert_eq!(value["rank"]["level"], "A-");
        assert_eq!(value["rank"]["percentile"], 30.5);
    }
}
