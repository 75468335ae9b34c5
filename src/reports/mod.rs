//! Report generation for aggregated user statistics
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: aligned `label : value` lines with an optionally colorized rank
//! - **JSON**: the [`AggregatedStats`](crate::facts::AggregatedStats) record as pretty-printed JSON
//!
//! Both write into any [`core::fmt::Write`] so callers decide where the text ends up.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
