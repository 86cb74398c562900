use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    /// The scan found no matching process. Expected, rendered as an empty state.
    #[error("no agents found")]
    NoAgentsFound,
    #[error("{command} failed: {message}")]
    CommandFailed { command: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    pub fn is_no_agents(&self) -> bool {
        matches!(self, AgentError::NoAgentsFound)
    }
}
