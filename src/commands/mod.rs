//! Command-line interface for github-stats
//!
//! - **stats**: collect a user's statistics from GitHub and print them as a console report
//!   or as JSON
//! - **init**: write a default configuration file
//! - **validate**: load a configuration file and report any warnings
//!
//! The `common` module holds the pieces shared between commands: logging setup and
//! configuration warning output.

mod common;
mod init;
mod stats;
mod validate;

pub use init::{InitArgs, init_config};
pub use stats::{StatsArgs, process_stats};
pub use validate::{ValidateArgs, validate_config};
