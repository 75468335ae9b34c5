use crate::Result;
use crate::facts::{AggregatedStats, RankLevel, StatsRequest};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(stats: &AggregatedStats, request: &StatsRequest, use_colors: bool, writer: &mut W) -> Result<()> {
    let mut rows: Vec<(String, String)> = vec![
        ("Total Stars Earned".to_string(), stats.total_stars.to_string()),
        (commits_label(request), stats.total_commits.to_string()),
        ("Total PRs".to_string(), stats.total_prs.to_string()),
    ];

    if request.include_merged_prs {
        rows.push(("Total PRs Merged".to_string(), stats.total_prs_merged.to_string()));
        rows.push(("Merged PRs Percentage".to_string(), format!("{:.2}%", stats.merged_prs_percentage)));
    }

    rows.push(("Total PR Reviews".to_string(), stats.total_reviews.to_string()));
    rows.push(("Total Issues".to_string(), stats.total_issues.to_string()));

    if request.include_discussions {
        rows.push(("Total Discussions Started".to_string(), stats.total_discussions_started.to_string()));
    }

    if request.include_discussion_answers {
        rows.push(("Total Discussions Answered".to_string(), stats.total_discussions_answered.to_string()));
    }

    rows.push(("Contributed to (last year)".to_string(), stats.contributed_to_count.to_string()));
    rows.push(("Current Streak".to_string(), days(stats.current_streak)));
    rows.push(("Longest Streak".to_string(), days(stats.longest_streak)));

    let title = format!("{}'s GitHub Stats", stats.display_name);
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0).max("Rank".len());

    for (label, value) in &rows {
        writeln!(writer, "  {label:<width$} : {value}")?;
    }

    let level = stats.rank.level.to_string();
    let level = if use_colors {
        match stats.rank.level {
            RankLevel::S | RankLevel::APlus | RankLevel::A | RankLevel::AMinus => level.green().bold().to_string(),
            RankLevel::BPlus | RankLevel::B | RankLevel::BMinus => level.yellow().bold().to_string(),
            RankLevel::CPlus | RankLevel::C => level.red().bold().to_string(),
        }
    } else {
        level
    };

    writeln!(writer, "  {:<width$} : {level} (top {:.1}%)", "Rank", stats.rank.percentile)?;
    Ok(())
}

fn commits_label(request: &StatsRequest) -> String {
    if request.include_all_commits {
        "Total Commits".to_string()
    } else if let Some(year) = request.commits_since_year {
        format!("Total Commits ({year})")
    } else {
        "Total Commits (last year)".to_string()
    }
}

fn days(count: u32) -> String {
    if count == 1 { "1 day".to_string() } else { format!("{count} days") }
}
