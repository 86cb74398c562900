//! Concurrent issue fetch across every listed repository

use futures::future::join_all;
use tracing::{info, warn};

use crate::github::error::TrackerError;
use crate::github::issue::Issue;
use crate::github::IssueTracker;

/// Result of one full issue refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFetch {
    pub repositories: Vec<String>,
    pub issues: Vec<Issue>,
    /// Repositories whose issue listing failed
    pub failed: Vec<String>,
}

impl IssueFetch {
    /// Aggregated error naming every failed repository
    pub fn error(&self) -> Option<TrackerError> {
        if self.failed.is_empty() {
            None
        } else {
            Some(TrackerError::PartialFetch(self.failed.clone()))
        }
    }
}

/// List repositories, then fetch their open issues concurrently
///
/// A repository whose fetch fails is recorded in `failed`; the issues of the
/// others are still returned. Only a failure to list repositories is fatal.
pub async fn fetch_all_issues(tracker: &dyn IssueTracker) -> Result<IssueFetch, TrackerError> {
    let repositories = tracker.list_repositories().await?;

    let results = join_all(repositories.iter().map(|repo| tracker.list_issues(repo))).await;

    let mut fetch = IssueFetch {
        repositories: repositories.clone(),
        ..Default::default()
    };
    for (repo, result) in repositories.into_iter().zip(results) {
        match result {
            Ok(issues) => fetch.issues.extend(issues),
            Err(e) => {
                warn!(repo = %repo, error = %e, "Failed to fetch issues");
                fetch.failed.push(repo);
            }
        }
    }

    info!(
        repositories = fetch.repositories.len(),
        issues = fetch.issues.len(),
        failed = fetch.failed.len(),
        "Fetched issues"
    );
    Ok(fetch)
}
