//! Contribution streaks derived from GitHub's contribution calendar.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

/// Contributions recorded for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    #[serde(deserialize_with = "deserialize_day")]
    pub date: NaiveDate,
    pub contribution_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

/// Weeks of daily contribution counts, as reported by GitHub.
///
/// The first and last weeks may be partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContributionCalendar {
    #[serde(default)]
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|week| &week.contribution_days)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    /// Consecutive active days ending today.
    pub current: u32,

    /// Longest run of consecutive active days anywhere in the calendar.
    pub longest: u32,
}

/// Compute the current and longest contribution streaks.
///
/// `today` is the UTC date the streaks are evaluated against. A day counts as active when it
/// has at least one contribution; duplicate entries for a date count once. The current
/// streak is the run of active days ending at `today`, so it is zero whenever `today` itself
/// has no contributions. A run that ended yesterday therefore yields a current streak of 0.
#[must_use]
pub fn compute_streaks(calendar: &ContributionCalendar, today: NaiveDate) -> Streaks {
    let active: BTreeSet<NaiveDate> = calendar
        .days()
        .filter(|day| day.contribution_count > 0)
        .map(|day| day.date)
        .collect();

    if active.is_empty() {
        return Streaks::default();
    }

    Streaks {
        current: current_streak(&active, today),
        longest: longest_streak(&active),
    }
}

fn longest_streak(active: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in active {
        run = if previous.and_then(|p| p.succ_opt()) == Some(date) { run + 1 } else { 1 };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}

fn current_streak(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = Some(today);

    while let Some(date) = day.filter(|d| active.contains(d)) {
        streak += 1;
        day = date.pred_opt();
    }

    streak
}

/// Accepts plain dates as well as full timestamps; timestamps are reduced to their UTC date.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc).date_naive()))
}

fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid contribution date '{raw}'")))
}
