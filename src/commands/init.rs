use camino::Utf8PathBuf;
use clap::Parser;
use github_stats::Result;
use github_stats::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (.toml, .yml, .yaml or .json)
    #[arg(value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    Config::default().save(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
