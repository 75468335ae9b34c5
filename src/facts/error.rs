use core::fmt;

/// Failures surfaced by the statistics aggregation pipeline.
///
/// Every variant aborts the whole aggregation; no partial record is ever produced.
#[derive(Debug)]
pub enum StatsError {
    /// A required input parameter was not supplied.
    MissingParameter(&'static str),

    /// The username does not follow GitHub's login syntax.
    InvalidIdentifier(String),

    /// GitHub reports that the account does not exist.
    UserNotFound(String),

    /// A required value is missing from a response that otherwise looks successful.
    UpstreamData(String),

    /// GitHub's GraphQL layer reported a failure without a more specific classification.
    GraphQl(String),

    /// The request could not be completed, even after retries.
    Request(ohno::AppError),
}

impl StatsError {
    pub(crate) fn upstream_data(field: impl Into<String>) -> Self {
        Self::UpstreamData(field.into())
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter(name) => write!(f, "missing required parameter '{name}'"),
            Self::InvalidIdentifier(login) => write!(f, "'{login}' is not a valid GitHub username"),
            Self::UserNotFound(message) | Self::GraphQl(message) => f.write_str(message),
            Self::UpstreamData(field) => write!(f, "GitHub returned no usable value for '{field}'"),
            Self::Request(e) => write!(f, "request to GitHub failed: {e}"),
        }
    }
}

impl core::error::Error for StatsError {}

impl From<ohno::AppError> for StatsError {
    fn from(e: ohno::AppError) -> Self {
        Self::Request(e)
    }
}
