use regex::Regex;
use std::sync::LazyLock;

/// GitHub logins are at most 39 characters long.
const MAX_LOGIN_LEN: usize = 39;

/// Alphanumeric runs joined by single hyphens; no leading, trailing or doubled hyphens.
static LOGIN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").expect("invalid regex"));

/// Check whether `login` follows GitHub's username syntax.
#[must_use]
pub fn is_valid_login(login: &str) -> bool {
    login.len() <= MAX_LOGIN_LEN && LOGIN_REGEX.is_match(login)
}
