//! In-memory issue tracker for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::github::error::TrackerError;
use crate::github::issue::Issue;
use crate::github::IssueTracker;

/// Tracker call recorded by [`MockTracker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Close { repo: String, number: u64 },
    AddLabel { repo: String, number: u64, label: String },
}

#[derive(Debug, Default)]
pub struct MockTracker {
    repositories: Vec<String>,
    issues: Vec<Issue>,
    listing_error: Option<TrackerError>,
    repo_errors: HashMap<String, TrackerError>,
    action_error: Option<TrackerError>,
    calls: Mutex<Vec<TrackerCall>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, repo: impl Into<String>) -> Self {
        let repo = repo.into();
        if !self.repositories.contains(&repo) {
            self.repositories.push(repo);
        }
        self
    }

    /// Add an issue, registering its repository if new
    pub fn with_issue(self, issue: Issue) -> Self {
        let mut tracker = self.with_repository(issue.repo.clone());
        tracker.issues.push(issue);
        tracker
    }

    pub fn failing_listing(mut self, err: TrackerError) -> Self {
        self.listing_error = Some(err);
        self
    }

    pub fn failing_repo(mut self, repo: impl Into<String>, err: TrackerError) -> Self {
        self.repo_errors.insert(repo.into(), err);
        self
    }

    /// Make close and label calls fail
    pub fn failing_actions(mut self, err: TrackerError) -> Self {
        self.action_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, call: TrackerCall) -> Result<(), TrackerError> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
        match &self.action_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn list_repositories(&self) -> Result<Vec<String>, TrackerError> {
        match &self.listing_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.repositories.clone()),
        }
    }

    async fn list_issues(&self, repo: &str) -> Result<Vec<Issue>, TrackerError> {
        if let Some(err) = self.repo_errors.get(repo) {
            return Err(err.clone());
        }
        Ok(self
            .issues
            .iter()
            .filter(|issue| issue.repo == repo)
            .cloned()
            .collect())
    }

    async fn close_issue(&self, repo: &str, number: u64) -> Result<(), TrackerError> {
        self.record(TrackerCall::Close {
            repo: repo.to_string(),
            number,
        })
    }

    async fn add_label(&self, repo: &str, number: u64, label: &str) -> Result<(), TrackerError> {
        self.record(TrackerCall::AddLabel {
            repo: repo.to_string(),
            number,
            label: label.to_string(),
        })
    }
}
