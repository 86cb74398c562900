pub mod agent;
pub mod config;
pub mod github;
pub mod tmux;
pub mod ui;
pub mod util;

pub use agent::{Agent, AgentDetector, AgentError, ProcessAgentDetector};
pub use config::Config;
pub use github::{GhCli, Issue, IssueKey, IssueTracker, TrackerError};
pub use ui::{App, AppState, Services};
