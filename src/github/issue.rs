use serde::Deserialize;

/// Stable identity of an issue across refreshes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueKey {
    pub repo: String,
    pub number: u64,
}

impl IssueKey {
    pub fn new(repo: impl Into<String>, number: u64) -> Self {
        Self {
            repo: repo.into(),
            number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub labels: Vec<String>,
    /// Owning repository as `owner/name`
    pub repo: String,
}

impl Issue {
    pub fn new(repo: impl Into<String>, number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            state: IssueState::Open,
            labels: Vec::new(),
            repo: repo.into(),
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn key(&self) -> IssueKey {
        IssueKey::new(self.repo.clone(), self.number)
    }

    pub fn matches(&self, key: &IssueKey) -> bool {
        self.number == key.number && self.repo == key.repo
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Append a label unless already present; returns whether it was added
    pub fn add_label(&mut self, label: &str) -> bool {
        if self.has_label(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }
}

/// Repository name with the owner prefix (up to and including the first `/`) removed
pub fn bare_repo_name(repo: &str) -> &str {
    repo.split_once('/').map_or(repo, |(_, name)| name)
}

/// Browser URL of an issue
pub fn issue_url(repo: &str, number: u64) -> String {
    format!("https://github.com/{}/issues/{}", repo, number)
}

/// Issue as returned by `gh issue list --json number,title,state,labels`
#[derive(Debug, Deserialize)]
pub(crate) struct GhIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub state: IssueState,
    #[serde(default)]
    pub labels: Vec<GhLabel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GhLabel {
    pub name: String,
}

impl GhIssue {
    pub fn into_issue(self, repo: &str) -> Issue {
        Issue {
            number: self.number,
            title: self.title,
            state: self.state,
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            repo: repo.to_string(),
        }
    }
}

/// Repository as returned by `gh repo list --json nameWithOwner`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GhRepo {
    pub name_with_owner: String,
}
