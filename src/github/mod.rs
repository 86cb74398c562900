//! GitHub issue tracking through the `gh` CLI

pub mod cli;
pub mod error;
pub mod fetch;
pub mod issue;
pub mod mock;

use async_trait::async_trait;

pub use cli::GhCli;
pub use error::TrackerError;
pub use fetch::{fetch_all_issues, IssueFetch};
pub use issue::{bare_repo_name, issue_url, Issue, IssueKey, IssueState};
pub use mock::{MockTracker, TrackerCall};

/// Remote issue tracker operations used by the dashboard
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Repositories (`owner/name`) whose issues are shown
    async fn list_repositories(&self) -> Result<Vec<String>, TrackerError>;

    /// Open issues of a single repository
    async fn list_issues(&self, repo: &str) -> Result<Vec<Issue>, TrackerError>;

    async fn close_issue(&self, repo: &str, number: u64) -> Result<(), TrackerError>;

    async fn add_label(&self, repo: &str, number: u64, label: &str) -> Result<(), TrackerError>;
}
