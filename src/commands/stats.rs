use super::common::{LogLevel, init_logging, print_warnings};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use github_stats::Result;
use github_stats::config::Config;
use github_stats::facts::hosting::Client;
use github_stats::facts::{Collector, StatsRequest};
use github_stats::misc::ColorMode;
use github_stats::reports::{generate_console, generate_json};
use ohno::IntoAppError;

/// Output format for the statistics report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable lines
    Console,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// GitHub login of the user to report on
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Count all-time commits via commit search instead of the last year's contributions
    #[arg(long)]
    pub include_all_commits: bool,

    /// Repositories to leave out of the star total (comma separated)
    #[arg(long, value_name = "REPO", value_delimiter = ',')]
    pub exclude_repo: Vec<String>,

    /// Repositories always left out of the star total, merged with the configuration file
    #[arg(long, value_name = "REPO", value_delimiter = ',', env = "EXCLUDE_REPO")]
    pub global_exclude_repo: Vec<String>,

    /// Report merged pull requests and the merged percentage
    #[arg(long)]
    pub include_merged_prs: bool,

    /// Report discussions started
    #[arg(long)]
    pub include_discussions: bool,

    /// Report discussions answered
    #[arg(long)]
    pub include_discussion_answers: bool,

    /// Count commit contributions from January 1 of this year
    #[arg(long, value_name = "YEAR", value_parser = clap::value_parser!(i32).range(2005..=9999))]
    pub commits_year: Option<i32>,

    /// Report format
    #[arg(long, value_name = "FORMAT", default_value = "console")]
    pub format: OutputFormat,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Path to configuration file [default: one of stats.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Follow repository pages past the first one when counting stars
    #[arg(long, env = "FETCH_MULTI_PAGE_STARS")]
    pub fetch_multi_page_stars: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl StatsArgs {
    fn request(&self) -> StatsRequest {
        StatsRequest {
            username: self.username.clone(),
            include_all_commits: self.include_all_commits,
            excluded_repos: self.exclude_repo.clone(),
            include_merged_prs: self.include_merged_prs,
            include_discussions: self.include_discussions,
            include_discussion_answers: self.include_discussion_answers,
            commits_since_year: self.commits_year,
        }
    }
}

pub async fn process_stats(args: &StatsArgs) -> Result<()> {
    init_logging(args.log_level);

    let (mut config, warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    print_warnings(&warnings);

    if args.fetch_multi_page_stars {
        config.fetch_multi_page_stars = true;
    }
    config.merge_exclusions(args.global_exclude_repo.iter().cloned());

    let client = Client::new(args.github_token.as_deref(), config.api_base_url.clone(), config.retry_policy())?;
    let collector = Collector::new(client, &config);

    let request = args.request();
    let stats = collector
        .aggregate(&request, Utc::now())
        .await
        .into_app_err_with(|| format!("collecting GitHub statistics for '{}'", request.username))?;

    let mut output = String::new();
    match args.format {
        OutputFormat::Console => generate_console(&stats, &request, args.color.enabled(), &mut output)?,
        OutputFormat::Json => generate_json(&stats, &mut output)?,
    }

    print!("{output}");
    Ok(())
}
