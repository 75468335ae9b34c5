use crate::Result;
use crate::facts::RetryPolicy;
use crate::facts::hosting::DEFAULT_API_BASE_URL;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// File name written by `init` when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "stats.toml";

/// Retry counts above this are almost certainly a mistake.
const MAX_SENSIBLE_RETRY_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Follow repository pages past the first one when counting stars
    #[serde(default)]
    pub fetch_multi_page_stars: bool,

    /// Repositories never counted towards a user's stars
    #[serde(default)]
    pub exclude_repo: Vec<String>,

    /// Root of the GitHub API; GraphQL lives at `{api_base_url}/graphql`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Retries after a transient failure, on top of the first attempt
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,

    /// Delay before the first retry in milliseconds, doubled for each further retry
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Upper bound for a single request attempt in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_max_retry_attempts() -> u32 {
    3
}

const fn default_retry_base_delay_ms() -> u64 {
    1000
}

const fn default_request_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Returns the configuration along with any validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading github-stats configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base_dir.join("stats.toml"),
                base_dir.join("stats.yml"),
                base_dir.join("stats.yaml"),
                base_dir.join("stats.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading github-stats configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Add process-wide exclusions coming from outside the file, skipping blanks and names
    /// already listed.
    pub fn merge_exclusions(&mut self, extra: impl IntoIterator<Item = String>) {
        for name in extra {
            let name = name.trim();
            if !name.is_empty() && !self.exclude_repo.iter().any(|existing| existing == name) {
                self.exclude_repo.push(name.to_string());
            }
        }
    }

    /// Retry and timeout settings for the HTTP client.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retry_attempts: self.max_retry_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Detect settings that are legal but almost certainly unintended
    fn validate(&self, warnings: &mut Vec<String>) {
        let mut seen = HashSet::new();
        for name in &self.exclude_repo {
            if name.trim().is_empty() {
                warnings.push("exclude_repo contains a blank entry, which matches no repository".to_string());
            } else if !seen.insert(name.as_str()) {
                warnings.push(format!("exclude_repo lists '{name}' more than once"));
            }
        }

        if self.request_timeout_secs == 0 {
            warnings.push("request_timeout_secs is 0, so every request will time out immediately".to_string());
        }

        if self.max_retry_attempts > MAX_SENSIBLE_RETRY_ATTEMPTS {
            warnings.push(format!(
                "max_retry_attempts is {}, more than {MAX_SENSIBLE_RETRY_ATTEMPTS}; failing requests will take a long time to give up",
                self.max_retry_attempts
            ));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            warnings.push(format!("api_base_url '{}' is not an http(s) URL", self.api_base_url));
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_multi_page_stars: false,
            exclude_repo: Vec::new(),
            api_base_url: default_api_base_url(),
            max_retry_attempts: default_max_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warnings_for(config: &Config) -> Vec<String> {
        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        warnings
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert!(!config.fetch_multi_page_stars);
        assert!(config.exclude_repo.is_empty());
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert!(warnings_for(&config).is_empty());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: core::result::Result<Config, _> = toml::from_str("fetch_multi_page_starz = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_retry_policy_conversion() {
        let config = Config {
            max_retry_attempts: 5,
            retry_base_delay_ms: 250,
            request_timeout_secs: 10,
            ..Config::default()
        };

        let policy = config.retry_policy();
        assert_eq!(policy.max_retry_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(250));
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_duplicate_and_blank_exclusions_warn() {
        let config = Config {
            exclude_repo: vec!["dotfiles".to_string(), " ".to_string(), "dotfiles".to_string()],
            ..Config::default()
        };

        let warnings = warnings_for(&config);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("blank")));
        assert!(warnings.iter().any(|w| w.contains("'dotfiles' more than once")));
    }

    #[test]
    fn test_zero_timeout_and_excessive_retries_warn() {
        let config = Config {
            request_timeout_secs: 0,
            max_retry_attempts: 50,
            ..Config::default()
        };

        let warnings = warnings_for(&config);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("request_timeout_secs")));
        assert!(warnings.iter().any(|w| w.contains("max_retry_attempts")));
    }

    #[test]
    fn test_non_http_base_url_warns() {
        let config = Config {
            api_base_url: "api.github.com".to_string(),
            ..Config::default()
        };

        assert_eq!(warnings_for(&config).len(), 1);
    }

    #[test]
    fn test_merge_exclusions_skips_blanks_and_duplicates() {
        let mut config = Config {
            exclude_repo: vec!["a".to_string()],
            ..Config::default()
        };

        config.merge_exclusions(["a", " b ", "", "c"].map(String::from));
        assert_eq!(config.exclude_repo, vec!["a", "b", "c"]);
    }
}
