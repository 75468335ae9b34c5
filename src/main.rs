//! Summarize a GitHub user's activity.
//!
//! # Overview
//!
//! `github-stats` collects a user's public activity from the GitHub GraphQL API: stars earned
//! across owned repositories, commits, pull requests, reviews, issues, discussions, and
//! contribution streaks. It folds them into a single record, assigns a rank, and prints the
//! result to the terminal or as JSON.
//!
//! # Basic Usage
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! github-stats stats octocat
//! ```
//!
//! **All-time commits instead of the last year's contributions:**
//! ```bash
//! github-stats stats octocat --include-all-commits
//! ```
//!
//! **Commits since the start of a year:**
//! ```bash
//! github-stats stats octocat --commits-year 2023
//! ```
//!
//! **Optional metrics:**
//! ```bash
//! github-stats stats octocat --include-merged-prs --include-discussions --include-discussion-answers
//! ```
//!
//! **Leave repositories out of the star total:**
//! ```bash
//! github-stats stats octocat --exclude-repo dotfiles,homework
//! ```
//!
//! **Machine-readable output:**
//! ```bash
//! github-stats stats octocat --format json
//! ```
//!
//! # Configuration
//!
//! Settings are read from the first of `stats.toml`, `stats.yml`, `stats.yaml` or `stats.json`
//! in the current directory, or from `--config PATH`. All fields are optional:
//!
//! ```toml
//! # Follow repository pages past the first 100 repositories when counting stars
//! fetch_multi_page_stars = false
//!
//! # Repositories never counted towards stars
//! exclude_repo = ["dotfiles"]
//!
//! api_base_url = "https://api.github.com"
//! max_retry_attempts = 3
//! retry_base_delay_ms = 1000
//! request_timeout_secs = 60
//! ```
//!
//! `FETCH_MULTI_PAGE_STARS` and `EXCLUDE_REPO` (comma separated) override or extend the
//! file. Generate a default file with `github-stats init`, and check one with
//! `github-stats validate`.
//!
//! # Star Counting
//!
//! Repositories are fetched 100 at a time, most-starred first. Unless
//! `fetch_multi_page_stars` is enabled only the first page is read, and even then paging
//! stops at the first page that contains a repository without stars.
//!
//! # GitHub API Rate Limiting
//!
//! Unauthenticated requests are heavily rate limited, and the GraphQL API requires a token.
//! Provide one through `GITHUB_TOKEN` or `--github-token`. Transient failures and throttling
//! responses are retried with exponential backoff.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use github_stats::Result;

mod commands;

use crate::commands::{InitArgs, StatsArgs, ValidateArgs, init_config, process_stats, validate_config};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "github-stats", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect and report a user's GitHub statistics
    Stats(Box<StatsArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Stats(stats_args) => process_stats(stats_args).await,
        Command::Init(init_args) => init_config(init_args),
        Command::Validate(validate_args) => validate_config(validate_args),
    }
}
