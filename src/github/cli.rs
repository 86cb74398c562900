//! [`IssueTracker`] backed by the `gh` command line client

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::github::error::TrackerError;
use crate::github::issue::{GhIssue, GhRepo, Issue};
use crate::github::IssueTracker;
use crate::util::{CommandRunner, ProcessError};

pub struct GhCli {
    runner: Arc<dyn CommandRunner>,
    owner: String,
    repo_limit: usize,
    issue_limit: usize,
}

impl GhCli {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        owner: impl Into<String>,
        repo_limit: usize,
        issue_limit: usize,
    ) -> Self {
        Self {
            runner,
            owner: owner.into(),
            repo_limit,
            issue_limit,
        }
    }

    async fn gh(&self, args: Vec<String>) -> Result<String, ProcessError> {
        self.runner.output("gh", &args).await
    }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl IssueTracker for GhCli {
    async fn list_repositories(&self) -> Result<Vec<String>, TrackerError> {
        let mut argv = args(["repo", "list"]);
        if !self.owner.is_empty() {
            argv.push(self.owner.clone());
        }
        argv.extend(args(["--limit", &self.repo_limit.to_string(), "--json", "nameWithOwner"]));

        let out = self.gh(argv).await?;
        let repos: Vec<GhRepo> = serde_json::from_str(&out)?;
        debug!(count = repos.len(), "Listed repositories");
        Ok(repos.into_iter().map(|r| r.name_with_owner).collect())
    }

    async fn list_issues(&self, repo: &str) -> Result<Vec<Issue>, TrackerError> {
        let out = self
            .gh(args([
                "issue",
                "list",
                "--repo",
                repo,
                "--state",
                "open",
                "--limit",
                &self.issue_limit.to_string(),
                "--json",
                "number,title,state,labels",
            ]))
            .await?;
        let issues: Vec<GhIssue> = serde_json::from_str(&out)?;
        Ok(issues.into_iter().map(|i| i.into_issue(repo)).collect())
    }

    async fn close_issue(&self, repo: &str, number: u64) -> Result<(), TrackerError> {
        match self
            .gh(args(["issue", "close", &number.to_string(), "--repo", repo]))
            .await
        {
            Ok(_) => {
                info!(repo, number, "Closed issue");
                Ok(())
            }
            Err(ProcessError::Failed { stderr, .. })
                if stderr.contains("Could not resolve to an issue")
                    || stderr.contains("already closed") =>
            {
                warn!(repo, number, %stderr, "Issue missing or already closed");
                Err(TrackerError::IssueNotFound {
                    repo: repo.to_string(),
                    number,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn add_label(&self, repo: &str, number: u64, label: &str) -> Result<(), TrackerError> {
        self.gh(args([
            "issue",
            "edit",
            &number.to_string(),
            "--repo",
            repo,
            "--add-label",
            label,
        ]))
        .await?;
        info!(repo, number, label, "Added label");
        Ok(())
    }
}
