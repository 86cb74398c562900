use thiserror::Error;

use crate::util::ProcessError;

/// Failure of an issue tracker call
///
/// The `Display` text of each variant is what the dashboard shows the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("gh CLI not found. Please install GitHub CLI: https://cli.github.com")]
    NotInstalled,
    #[error("GitHub not authenticated. Run 'gh auth login'")]
    NotAuthenticated,
    #[error("GitHub API rate limited. Please wait and try again")]
    RateLimited,
    #[error("Network error. Check your internet connection")]
    Network,
    #[error("issue #{number} in {repo} not found or already closed")]
    IssueNotFound { repo: String, number: u64 },
    #[error("failed to fetch from repos: {}", .0.join(", "))]
    PartialFetch(Vec<String>),
    #[error("failed to parse gh output: {0}")]
    Parse(String),
    #[error("gh error: {0}")]
    Other(String),
}

const NOT_INSTALLED: &[&str] = &[
    "executable file not found",
    "command not found",
    "no such file",
    "exec format error",
];
const NOT_AUTHENTICATED: &[&str] = &[
    "authentication",
    "not authenticated",
    "gh auth login",
    "could not read",
    "http 401",
];
const RATE_LIMITED: &[&str] = &["rate limit"];
const NETWORK: &[&str] = &[
    "connection",
    "network",
    "no such host",
    "timed out",
];

impl TrackerError {
    /// Map free-form failure text onto a user-facing category
    pub fn categorize(text: &str) -> Self {
        let lower = text.to_lowercase();
        let matches = |table: &[&str]| table.iter().any(|needle| lower.contains(needle));

        if matches(NOT_INSTALLED) {
            TrackerError::NotInstalled
        } else if matches(NOT_AUTHENTICATED) {
            TrackerError::NotAuthenticated
        } else if matches(RATE_LIMITED) {
            TrackerError::RateLimited
        } else if matches(NETWORK) {
            TrackerError::Network
        } else {
            TrackerError::Other(text.trim().to_string())
        }
    }
}

impl From<ProcessError> for TrackerError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotInstalled(_) => TrackerError::NotInstalled,
            ProcessError::Failed { stderr, .. } => TrackerError::categorize(&stderr),
            ProcessError::Io(e) => TrackerError::categorize(&e.to_string()),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Parse(err.to_string())
    }
}
