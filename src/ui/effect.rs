use crate::github::IssueKey;

/// Side effects that should be executed outside the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Rescan agents and refetch every repository's issues
    Refresh,
    CloseIssue(IssueKey),
    /// The label is already applied locally; this persists it remotely
    AddLabel { issue: IssueKey, label: String },
    /// Open a tmux window for the issue and type the command prompt into it
    RunCommand { issue: IssueKey, prompt: String },
    /// Open a tmux window that starts an agent on a new issue
    CreateIssue { repo: String, title: String },
    OpenUrl(String),
}
