//! Tool configuration
//!
//! Settings are read from `stats.toml`, `stats.yml`, `stats.yaml` or `stats.json` (or an
//! explicit path). Every field is optional. Suspicious values produce warnings rather than
//! errors.

#[expect(clippy::module_inception, reason = "mirrors the file layout used for the other modules")]
mod config;

pub use config::{Config, DEFAULT_CONFIG_FILE};
