use crossterm::event::KeyEvent;

use crate::agent::Agent;
use crate::github::{IssueFetch, IssueKey};

/// Application-level events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Key press from the terminal
    Key(KeyEvent),

    /// Tick event for animations
    Tick,

    /// Terminal resized to (width, height)
    Resize(u16, u16),

    /// Background refresh finished
    RefreshCompleted(RefreshOutcome),

    /// Background effect finished
    ActionCompleted(ActionOutcome),
}

/// Result of one refresh cycle
#[derive(Debug, Clone, Default)]
pub struct RefreshOutcome {
    pub agents: Vec<Agent>,
    /// `None` when the repository listing itself failed; the previous issues
    /// are kept in that case
    pub issues: Option<IssueFetch>,
    /// Message for the error line, if anything went wrong
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The issue was closed remotely and can be dropped from the list
    IssueClosed(IssueKey),
    /// An action finished with nothing to update
    Done(String),
    Failed(String),
}
