//! All-time commit totals via the commit search endpoint.
//!
//! The profile query only counts commits inside one contribution window, so the true total
//! has to come from search.

use crate::facts::StatsError;
use crate::facts::hosting::Client;
use crate::misc::is_valid_login;
use serde_json::Value;

const LOG_TARGET: &str = "   commits";

/// Fetch the number of commits authored by `login` across all repositories.
pub async fn fetch_total_commits(client: &Client, login: &str) -> Result<u64, StatsError> {
    if !is_valid_login(login) {
        return Err(StatsError::InvalidIdentifier(login.to_string()));
    }

    let body = client.search_commits(login).await?;
    let total = total_count(&body)?;

    log::info!(target: LOG_TARGET, "Commit search reports {total} commits for '{login}'");
    Ok(total)
}

fn total_count(body: &Value) -> Result<u64, StatsError> {
    body.get("total_count")
        .and_then(Value::as_u64)
        .ok_or_else(|| StatsError::upstream_data("total_count"))
}
